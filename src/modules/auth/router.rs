use crate::modules::auth::controller::create_jwt_token;
use crate::state::AppState;
use axum::{Router, routing::post};

pub fn init_auth_router() -> Router<AppState> {
    Router::new().route("/createJwtToken", post(create_jwt_token))
}
