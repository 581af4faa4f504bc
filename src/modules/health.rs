use axum::{Router, routing::get};

use crate::state::AppState;

/// Liveness check.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Server is up", body = String)),
    tag = "Health"
)]
pub async fn liveness() -> &'static str {
    "Done"
}

pub fn init_health_router() -> Router<AppState> {
    Router::new().route("/", get(liveness))
}
