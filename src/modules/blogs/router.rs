use crate::modules::blogs::controller::{create_blog, get_blog, list_blogs};
use crate::state::AppState;
use axum::{Router, routing::get};

pub fn init_blogs_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_blogs).post(create_blog))
        .route("/{id}", get(get_blog))
}
