use std::env;

/// Thirty days, the validity window of every issued token.
pub const DEFAULT_TOKEN_EXPIRY: i64 = 30 * 24 * 60 * 60;

#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    /// Token lifetime in seconds.
    pub token_expiry: i64,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        Self {
            secret: env::var("ACCESS_TOKEN_SECRET")
                .or_else(|_| env::var("JWT_SECRET"))
                .unwrap_or_else(|_| "your-secret-key-change-in-production".to_string()),
            token_expiry: env::var("JWT_EXPIRY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_TOKEN_EXPIRY),
        }
    }

    pub fn uses_default_secret(&self) -> bool {
        self.secret == "your-secret-key-change-in-production"
    }
}
