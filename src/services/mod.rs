pub mod hashing;
pub mod jwt;
pub mod mailer;
pub mod pdf;
pub mod security;
pub mod storage;
pub mod templates;
