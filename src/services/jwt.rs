use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, TokenData, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    pub sub: String,        // user id
    pub role: String,       // ADMIN | EMPLOYEE
    pub exp: i64,           // expiration time
    pub iat: i64,           // issued at
    pub jti: String,        // unique token id
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RefreshClaims {
    pub sub: String,        // user id
    pub exp: i64,
    pub iat: i64,
    pub jti: String,        // unique token id
}

pub struct JwtService {
    access_secret: String,
    refresh_secret: String,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl JwtService {
    pub fn new(
        access_secret: String,
        refresh_secret: String,
        access_ttl: &str,
        refresh_ttl: &str,
    ) -> Self {
        Self {
            access_secret,
            refresh_secret,
            access_ttl: parse_ttl(access_ttl),
            refresh_ttl: parse_ttl(refresh_ttl),
        }
    }

    pub fn create_access_token(&self, user_id: &str, role: &str) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let exp = now + self.access_ttl;

        let claims = AccessClaims {
            sub: user_id.to_string(),
            role: role.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.access_secret.as_bytes()),
        )
    }

    pub fn create_refresh_token(&self, user_id: &str) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let exp = now + self.refresh_ttl;

        let claims = RefreshClaims {
            sub: user_id.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.refresh_secret.as_bytes()),
        )
    }

    pub fn verify_access_token(&self, token: &str) -> Result<TokenData<AccessClaims>, jsonwebtoken::errors::Error> {
        decode::<AccessClaims>(
            token,
            &DecodingKey::from_secret(self.access_secret.as_bytes()),
            &Validation::default(),
        )
    }

    pub fn verify_refresh_token(&self, token: &str) -> Result<TokenData<RefreshClaims>, jsonwebtoken::errors::Error> {
        decode::<RefreshClaims>(
            token,
            &DecodingKey::from_secret(self.refresh_secret.as_bytes()),
            &Validation::default(),
        )
    }

    pub fn refresh_ttl(&self) -> Duration {
        self.refresh_ttl
    }
}

/// Parses fixed-unit TTL strings such as "15m", "12h" or "7d".
/// Anything else falls back to 7 days, matching the documented behavior of the
/// config format; the fallback is logged because it usually means a typo in
/// ACCESS_TOKEN_TTL / REFRESH_TOKEN_TTL.
pub fn parse_ttl(ttl: &str) -> Duration {
    let fallback = Duration::days(7);

    let Some(unit) = ttl.chars().last() else {
        tracing::warn!("empty TTL string, falling back to 7d");
        return fallback;
    };

    let num: i64 = match ttl[..ttl.len() - unit.len_utf8()].parse() {
        Ok(n) => n,
        Err(_) => {
            tracing::warn!(ttl, "unparseable TTL string, falling back to 7d");
            return fallback;
        }
    };

    match unit {
        'm' => Duration::minutes(num),
        'h' => Duration::hours(num),
        'd' => Duration::days(num),
        other => {
            tracing::warn!(ttl, unit = %other, "unrecognized TTL unit, falling back to 7d");
            fallback
        }
    }
}
