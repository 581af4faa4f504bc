use crate::middleware::role::require_admin;
use crate::modules::products::controller::{
    backfill_years_of_use, create_product, delete_product, get_product, list_products,
};
use crate::state::AppState;
use axum::{
    Router, middleware,
    routing::{delete, get, put},
};

pub fn init_products_router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/{id}",
            get(get_product).merge(delete(delete_product).route_layer(
                middleware::from_fn_with_state(state.clone(), require_admin),
            )),
        )
}

/// `PUT /product` and `PUT /product/` both reach the backfill.
pub fn init_product_backfill_router() -> Router<AppState> {
    Router::new()
        .route("/product", put(backfill_years_of_use))
        .route("/product/", put(backfill_years_of_use))
}
