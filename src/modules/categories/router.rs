use crate::middleware::role::require_admin;
use crate::modules::categories::controller::{
    create_category, delete_category, get_category, list_categories,
};
use crate::state::AppState;
use axum::{
    Router, middleware,
    routing::{delete, get},
};

pub fn init_categories_router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(list_categories).post(create_category))
        .route(
            "/{id}",
            get(get_category).merge(delete(delete_category).route_layer(
                middleware::from_fn_with_state(state.clone(), require_admin),
            )),
        )
}
