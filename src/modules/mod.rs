pub mod attendance;
pub mod auth;
pub mod documents;
pub mod employees;
pub mod master;

use serde::Serialize;

/// Uniform error body: `{ "error": "<message>" }`.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
