use std::env;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct StoreConfig {
    /// Postgres connection string. `None` selects the in-memory store.
    pub database_url: Option<String>,
    pub max_connections: u32,
    /// Upper bound on any single store call.
    pub call_timeout: Duration,
}

impl StoreConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL")
                .or_else(|_| env::var("URI"))
                .ok()
                .filter(|s| !s.trim().is_empty()),
            max_connections: env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(5),
            call_timeout: Duration::from_millis(
                env::var("STORE_TIMEOUT_MS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(5000),
            ),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            max_connections: 5,
            call_timeout: Duration::from_secs(5),
        }
    }
}
