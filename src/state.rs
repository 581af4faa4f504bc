use std::sync::Arc;

use laptopbay_config::{CorsConfig, JwtConfig, StoreConfig};
use laptopbay_db::{MemoryStore, PgDocumentStore, SharedStore, StoreError, TimeoutStore};
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(store: SharedStore, jwt_config: JwtConfig, cors_config: CorsConfig) -> Self {
        Self {
            store,
            jwt_config,
            cors_config,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Option<PrometheusHandle>) -> Self {
        self.metrics = metrics;
        self
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("cors_config", &self.cors_config)
            .field("metrics", &self.metrics.is_some())
            .finish_non_exhaustive()
    }
}

/// Builds the store selected by `config`, bounded by its call timeout.
///
/// Postgres is used when a connection string is configured (migrations run on
/// connect); otherwise the in-memory store.
pub async fn init_store(config: &StoreConfig) -> Result<SharedStore, StoreError> {
    match &config.database_url {
        Some(url) => {
            let store = PgDocumentStore::connect(url, config).await?;
            store.migrate().await?;
            tracing::info!("Database Connect Successful");
            Ok(Arc::new(TimeoutStore::new(store, config.call_timeout)))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory store; data will not persist");
            Ok(Arc::new(TimeoutStore::new(
                MemoryStore::new(),
                config.call_timeout,
            )))
        }
    }
}

pub async fn init_app_state() -> Result<AppState, StoreError> {
    let store = init_store(&StoreConfig::from_env()).await?;
    Ok(AppState::new(
        store,
        JwtConfig::from_env(),
        CorsConfig::from_env(),
    ))
}
