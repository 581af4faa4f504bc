use anyhow::anyhow;
use axum::{
    Json,
    extract::{Path, State},
};
use laptopbay_core::{ApiResponse, AppError};
use laptopbay_db::{DeleteOutcome, Document, Filter, UpdateOutcome};
use tracing::instrument;

use crate::docs::{DocumentBody, Envelope, TokenErrorBody};
use crate::extract::JsonDocument;
use crate::middleware::auth::AuthUser;
use crate::modules::documents::{parse_id, store_failure};
use crate::modules::users::model::{RoleResponse, UpsertUserResponse, UserRole};
use crate::modules::users::service::UserService;
use crate::state::AppState;

/// Create or update a user keyed by email, returning a fresh token
#[utoipa::path(
    put,
    path = "/users/{email}",
    params(("email" = String, Path, description = "User email, the record key")),
    request_body = DocumentBody,
    responses(
        (status = 200, description = "User upserted, token issued", body = Envelope),
        (status = 500, description = "Store failure", body = Envelope)
    ),
    tag = "Users"
)]
#[instrument(skip(state, body))]
pub async fn upsert_user(
    State(state): State<AppState>,
    Path(email): Path<String>,
    JsonDocument(body): JsonDocument,
) -> Result<Json<UpsertUserResponse<UpdateOutcome>>, AppError> {
    upsert(&state, &email, body).await
}

/// `PUT /users/admin` is the upsert for the literal key `admin`; the static
/// `/admin` route shadows the `{email}` segment.
#[instrument(skip(state, body))]
pub async fn upsert_admin_key(
    State(state): State<AppState>,
    JsonDocument(body): JsonDocument,
) -> Result<Json<UpsertUserResponse<UpdateOutcome>>, AppError> {
    upsert(&state, "admin", body).await
}

async fn upsert(
    state: &AppState,
    email: &str,
    body: Document,
) -> Result<Json<UpsertUserResponse<UpdateOutcome>>, AppError> {
    let (outcome, token) =
        UserService::upsert_user(state.store.as_ref(), &state.jwt_config, email, body).await?;

    Ok(Json(UpsertUserResponse {
        data: outcome,
        token,
        success: true,
        message: "Successfully Created User".to_string(),
    }))
}

/// List every user (admin only)
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "All users", body = Envelope),
        (status = 401, description = "Missing or invalid token", body = TokenErrorBody),
        (status = 403, description = "Caller is not an admin", body = TokenErrorBody),
        (status = 500, description = "Store failure", body = Envelope)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<ApiResponse<Vec<Document>>, AppError> {
    let users = UserService::list_users(state.store.as_ref())
        .await
        .map_err(store_failure("Data Load Fail"))?;
    Ok(ApiResponse::ok(users, "Successfully find the all data"))
}

/// List users with the given role (`admin` or `user`)
#[utoipa::path(
    get,
    path = "/users/{role}",
    params(("role" = String, Path, description = "`admin` or `user`")),
    responses(
        (status = 200, description = "Users with the role", body = Envelope),
        (status = 400, description = "Unknown role", body = Envelope),
        (status = 500, description = "Store failure", body = Envelope)
    ),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn list_users_by_role(
    State(state): State<AppState>,
    Path(role): Path<String>,
) -> Result<ApiResponse<Vec<Document>>, AppError> {
    let role: UserRole = role.parse().map_err(AppError::bad_request)?;
    users_with_role(&state, role).await
}

/// `GET /users/admin` shares its prefix with the role lookup routes and is
/// routed here explicitly.
#[instrument(skip(state))]
pub async fn list_admins(
    State(state): State<AppState>,
) -> Result<ApiResponse<Vec<Document>>, AppError> {
    users_with_role(&state, UserRole::Admin).await
}

async fn users_with_role(
    state: &AppState,
    role: UserRole,
) -> Result<ApiResponse<Vec<Document>>, AppError> {
    let users = UserService::list_users_by_role(state.store.as_ref(), role)
        .await
        .map_err(store_failure("Data Load Fail"))?;
    Ok(ApiResponse::ok(users, "Successfully find the all data"))
}

/// Return the role recorded for an email
#[utoipa::path(
    get,
    path = "/users/admin/{email}",
    params(("email" = String, Path, description = "User email")),
    responses(
        (status = 200, description = "Role of the user, null when unknown", body = RoleResponse),
        (status = 500, description = "Store failure", body = Envelope)
    ),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn get_user_role(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<RoleResponse>, AppError> {
    let role = UserService::get_role(state.store.as_ref(), &email)
        .await
        .map_err(store_failure("Data Load Fail"))?;
    Ok(Json(RoleResponse { role }))
}

/// Promote a user to admin (admin only)
#[utoipa::path(
    put,
    path = "/users/admin/{id}",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "User promoted", body = Envelope),
        (status = 400, description = "Malformed id", body = Envelope),
        (status = 401, description = "Missing or invalid token", body = TokenErrorBody),
        (status = 403, description = "Caller is not an admin", body = TokenErrorBody),
        (status = 404, description = "No such user", body = Envelope)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state, auth_user), fields(actor = ?auth_user.email()))]
pub async fn promote_user(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<ApiResponse<UpdateOutcome>, AppError> {
    change_role(&state, &id, UserRole::Admin, "Successfully Made Admin").await
}

/// Revoke a user's admin role (admin only)
#[utoipa::path(
    delete,
    path = "/users/admin/{id}",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "Admin role removed", body = Envelope),
        (status = 400, description = "Malformed id", body = Envelope),
        (status = 401, description = "Missing or invalid token", body = TokenErrorBody),
        (status = 403, description = "Caller is not an admin", body = TokenErrorBody),
        (status = 404, description = "No such user", body = Envelope)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state, auth_user), fields(actor = ?auth_user.email()))]
pub async fn revoke_admin(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<ApiResponse<UpdateOutcome>, AppError> {
    change_role(&state, &id, UserRole::Standard, "Successfully Removed Admin").await
}

async fn change_role(
    state: &AppState,
    raw_id: &str,
    role: UserRole,
    message: &str,
) -> Result<ApiResponse<UpdateOutcome>, AppError> {
    let id = parse_id(raw_id)?;
    let outcome = UserService::set_role(state.store.as_ref(), &Filter::Id(id), role)
        .await
        .map_err(store_failure("Role Update Fail"))?;

    if outcome.matched_count == 0 {
        return Err(AppError::not_found(anyhow!("User not found")));
    }

    tracing::info!(user_id = %id, role = %role, "User role changed");
    Ok(ApiResponse::ok(outcome, message))
}

/// Delete a user by id (admin only)
#[utoipa::path(
    delete,
    path = "/users/{id}",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "Delete result", body = Envelope),
        (status = 400, description = "Malformed id", body = Envelope),
        (status = 401, description = "Missing or invalid token", body = TokenErrorBody),
        (status = 403, description = "Caller is not an admin", body = TokenErrorBody),
        (status = 500, description = "Store failure", body = Envelope)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state, auth_user), fields(actor = ?auth_user.email()))]
pub async fn delete_user(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<ApiResponse<DeleteOutcome>, AppError> {
    let id = parse_id(&id)?;
    let outcome = UserService::delete_user(state.store.as_ref(), id)
        .await
        .map_err(store_failure("Data Delete Fail"))?;
    Ok(ApiResponse::ok(outcome, "Successfully delete User"))
}
