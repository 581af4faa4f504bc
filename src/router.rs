use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::metrics::{metrics_handler, metrics_middleware};
use crate::modules::auth::router::init_auth_router;
use crate::modules::blogs::router::init_blogs_router;
use crate::modules::categories::router::init_categories_router;
use crate::modules::health::init_health_router;
use crate::modules::orders::router::init_orders_router;
use crate::modules::products::router::{init_product_backfill_router, init_products_router};
use crate::modules::users::router::init_users_router;
use crate::state::AppState;
use axum::http::{HeaderValue, Method, header};
use axum::{Router, middleware, routing::get};
use laptopbay_config::CorsConfig;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

pub fn init_router(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .merge(init_health_router())
        .merge(init_auth_router())
        .merge(init_product_backfill_router())
        .nest("/users", init_users_router(&state))
        .nest("/category", init_categories_router(&state))
        .nest("/products", init_products_router(&state))
        .nest("/orders", init_orders_router(&state))
        .nest("/blog", init_blogs_router())
        .route("/metrics", get(metrics_handler))
        .with_state(state.clone())
        .layer(cors_layer(&state.cors_config))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(logging_middleware))
}

/// Any origin (without credentials) when no allow-list is configured,
/// otherwise exactly the listed origins.
fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT]);

    if config.allows_any_origin() {
        return layer.allow_origin(Any);
    }

    let allowed_origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    layer.allow_origin(allowed_origins).allow_credentials(true)
}
