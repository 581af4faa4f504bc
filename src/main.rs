use dotenvy::dotenv;
use laptopbay::logging::init_tracing;
use laptopbay::metrics::init_metrics;
use laptopbay::router::init_router;
use laptopbay::state::init_app_state;
use laptopbay_config::ServerConfig;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing();

    let metrics = init_metrics();
    let state = init_app_state().await?.with_metrics(metrics);

    if state.jwt_config.uses_default_secret() {
        warn!("ACCESS_TOKEN_SECRET is not set; tokens are signed with a placeholder secret");
    }

    let app = init_router(state);

    let server_config = ServerConfig::from_env();
    let listener = tokio::net::TcpListener::bind(server_config.bind_address()).await?;
    info!(address = %server_config.bind_address(), "Server running");
    info!("Swagger UI available at /swagger-ui, Scalar UI at /scalar");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
