use axum::http::StatusCode;
use chrono::Utc;
use uuid::Uuid;

use crate::config::DbPool;
use crate::modules::auth::model::{RefreshToken, User};
use crate::services::{hashing, jwt::JwtService};

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Email already in use")]
    EmailTaken,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    #[error("User not found")]
    UserNotFound,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Hashing error: {0}")]
    Hashing(String),

    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::EmailTaken => StatusCode::CONFLICT,
            Self::InvalidCredentials | Self::InvalidRefreshToken => StatusCode::UNAUTHORIZED,
            Self::UserNotFound => StatusCode::NOT_FOUND,
            Self::Database(_) | Self::Hashing(_) | Self::Token(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub user: User,
}

pub struct AuthCrud<'a> {
    pool: DbPool,
    jwt: &'a JwtService,
}

impl<'a> AuthCrud<'a> {
    pub fn new(pool: DbPool, jwt: &'a JwtService) -> Self {
        Self { pool, jwt }
    }

    pub async fn register(
        &self,
        email: &str,
        password: &str,
        role: &str,
    ) -> Result<User, AuthError> {
        if self.find_by_email(email).await?.is_some() {
            return Err(AuthError::EmailTaken);
        }

        let password_hash =
            hashing::hash_password(password).map_err(|e| AuthError::Hashing(e.to_string()))?;

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4().to_string(),
            email: email.to_string(),
            password_hash,
            role: role.to_string(),
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            r#"
            INSERT INTO users (id, email, password_hash, role, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&user.id)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.role)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            // UNIQUE violation from a racing insert
            if e.to_string().contains("UNIQUE") {
                AuthError::EmailTaken
            } else {
                AuthError::Database(e)
            }
        })?;

        Ok(user)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthTokens, AuthError> {
        let user = self
            .find_by_email(email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let is_valid = hashing::verify_password(password, &user.password_hash)
            .map_err(|e| AuthError::Hashing(e.to_string()))?;
        if !is_valid {
            return Err(AuthError::InvalidCredentials);
        }

        self.issue_tokens(user).await
    }

    /// Single-use rotation: the presented token's stored hash is revoked
    /// before a fresh pair is issued, so a replayed refresh token fails with
    /// Unauthorized.
    pub async fn refresh(&self, refresh_token: &str) -> Result<AuthTokens, AuthError> {
        let claims = self
            .jwt
            .verify_refresh_token(refresh_token)
            .map_err(|_| AuthError::InvalidRefreshToken)?
            .claims;

        let token_hash = hashing::token_hash(refresh_token);
        let stored: Option<RefreshToken> =
            sqlx::query_as("SELECT * FROM refresh_tokens WHERE token_hash = ?")
                .bind(&token_hash)
                .fetch_optional(&self.pool)
                .await?;

        let stored = stored.ok_or(AuthError::InvalidRefreshToken)?;
        if stored.revoked || stored.expires_at <= Utc::now() {
            return Err(AuthError::InvalidRefreshToken);
        }

        sqlx::query("UPDATE refresh_tokens SET revoked = 1 WHERE token_hash = ?")
            .bind(&token_hash)
            .execute(&self.pool)
            .await?;

        let user = self
            .find_by_id(&claims.sub)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        self.issue_tokens(user).await
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<User>, AuthError> {
        Ok(sqlx::query_as("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
        Ok(sqlx::query_as("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn issue_tokens(&self, user: User) -> Result<AuthTokens, AuthError> {
        let access_token = self.jwt.create_access_token(&user.id, &user.role)?;
        let refresh_token = self.jwt.create_refresh_token(&user.id)?;

        let now = Utc::now();
        sqlx::query(
            r#"
            INSERT INTO refresh_tokens (id, user_id, token_hash, expires_at, revoked, created_at)
            VALUES (?, ?, ?, ?, 0, ?)
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(&user.id)
        .bind(hashing::token_hash(&refresh_token))
        .bind(now + self.jwt.refresh_ttl())
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(AuthTokens {
            access_token,
            refresh_token,
            user,
        })
    }
}
