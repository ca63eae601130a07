use std::env;

/// Environment configuration
/// Loads and validates environment variables
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub jwt_access_secret: String,
    pub jwt_refresh_secret: String,
    pub access_ttl: String,
    pub refresh_ttl: String,
    pub smtp_host: Option<String>,
    pub smtp_port: u16,
    pub smtp_user: String,
    pub smtp_pass: String,
    pub smtp_from: String,
    pub upload_dir: String,
    pub templates_dir: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        dotenvy::dotenv().ok();

        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(5000);

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| "DATABASE_URL must be set".to_string())?;

        let jwt_access_secret = env::var("JWT_ACCESS_SECRET")
            .map_err(|_| "JWT_ACCESS_SECRET must be set".to_string())?;

        let jwt_refresh_secret = env::var("JWT_REFRESH_SECRET")
            .map_err(|_| "JWT_REFRESH_SECRET must be set".to_string())?;

        let access_ttl = env::var("ACCESS_TOKEN_TTL").unwrap_or_else(|_| "15m".to_string());
        let refresh_ttl = env::var("REFRESH_TOKEN_TTL").unwrap_or_else(|_| "7d".to_string());

        let smtp_host = env::var("SMTP_HOST").ok();
        let smtp_port = env::var("SMTP_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(587);
        let smtp_user = env::var("SMTP_USER").unwrap_or_default();
        let smtp_pass = env::var("SMTP_PASS").unwrap_or_default();
        let smtp_from = env::var("SMTP_FROM")
            .unwrap_or_else(|_| "HR Department <hr@company.com>".to_string());

        let upload_dir = env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string());
        let templates_dir = env::var("TEMPLATES_DIR").unwrap_or_else(|_| "templates".to_string());

        Ok(Self {
            port,
            database_url,
            jwt_access_secret,
            jwt_refresh_secret,
            access_ttl,
            refresh_ttl,
            smtp_host,
            smtp_port,
            smtp_user,
            smtp_pass,
            smtp_from,
            upload_dir,
            templates_dir,
        })
    }
}
