use crate::middleware::role::require_admin;
use crate::modules::orders::controller::{create_order, delete_order, get_order, list_orders};
use crate::state::AppState;
use axum::{
    Router, middleware,
    routing::{delete, get, post},
};

/// Anyone may place or look up an order by id; listing and deletion are
/// admin-only.
pub fn init_orders_router(state: &AppState) -> Router<AppState> {
    let admin_gate = || middleware::from_fn_with_state(state.clone(), require_admin);

    Router::new()
        .route(
            "/",
            post(create_order).merge(get(list_orders).route_layer(admin_gate())),
        )
        .route(
            "/{id}",
            get(get_order).merge(delete(delete_order).route_layer(admin_gate())),
        )
}
