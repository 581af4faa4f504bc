use crate::middleware::role::require_admin;
use crate::modules::users::controller::{
    delete_user, get_user_role, list_admins, list_users, list_users_by_role, promote_user,
    revoke_admin, upsert_admin_key, upsert_user,
};
use crate::state::AppState;
use axum::{
    Router, middleware,
    routing::{delete, get, put},
};

/// Read-only lookups and self-registration are open; listing, promotion,
/// revocation and deletion go through the admin gate.
pub fn init_users_router(state: &AppState) -> Router<AppState> {
    let admin_gate = || middleware::from_fn_with_state(state.clone(), require_admin);

    Router::new()
        .route("/", get(list_users).route_layer(admin_gate()))
        .route("/admin", get(list_admins).put(upsert_admin_key))
        .route(
            "/admin/{key}",
            get(get_user_role).merge(
                put(promote_user)
                    .delete(revoke_admin)
                    .route_layer(admin_gate()),
            ),
        )
        .route(
            "/{key}",
            get(list_users_by_role)
                .put(upsert_user)
                .merge(delete(delete_user).route_layer(admin_gate())),
        )
}
