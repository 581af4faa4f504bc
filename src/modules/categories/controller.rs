use anyhow::anyhow;
use axum::extract::{Path, State};
use laptopbay_core::{ApiResponse, AppError};
use laptopbay_db::{Collection, DeleteOutcome, Document, InsertOutcome};
use tracing::instrument;

use crate::docs::{DocumentBody, Envelope, TokenErrorBody};
use crate::extract::JsonDocument;
use crate::middleware::auth::AuthUser;
use crate::modules::documents::{DocumentService, parse_id, store_failure};
use crate::state::AppState;

/// Create a category
#[utoipa::path(
    post,
    path = "/category",
    request_body = DocumentBody,
    responses(
        (status = 200, description = "Category created", body = Envelope),
        (status = 500, description = "Store failure", body = Envelope)
    ),
    tag = "Categories"
)]
#[instrument(skip(state, body))]
pub async fn create_category(
    State(state): State<AppState>,
    JsonDocument(body): JsonDocument,
) -> Result<ApiResponse<InsertOutcome>, AppError> {
    let outcome = DocumentService::create(state.store.as_ref(), Collection::Categories, body)
        .await
        .map_err(store_failure("Category Created Fail"))?;
    Ok(ApiResponse::ok(outcome, "Category Created Successful"))
}

/// List all categories
#[utoipa::path(
    get,
    path = "/category",
    responses(
        (status = 200, description = "All categories", body = Envelope),
        (status = 500, description = "Store failure", body = Envelope)
    ),
    tag = "Categories"
)]
#[instrument(skip(state))]
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<ApiResponse<Vec<Document>>, AppError> {
    let categories = DocumentService::list(state.store.as_ref(), Collection::Categories)
        .await
        .map_err(store_failure("Data Load Fail"))?;
    Ok(ApiResponse::ok(categories, "Successfully find the all data"))
}

/// Fetch one category
#[utoipa::path(
    get,
    path = "/category/{id}",
    params(("id" = String, Path, description = "Category id")),
    responses(
        (status = 200, description = "The category", body = Envelope),
        (status = 400, description = "Malformed id", body = Envelope),
        (status = 404, description = "No such category", body = Envelope)
    ),
    tag = "Categories"
)]
#[instrument(skip(state))]
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<Document>, AppError> {
    let id = parse_id(&id)?;
    let category = DocumentService::get(state.store.as_ref(), Collection::Categories, id)
        .await
        .map_err(store_failure("Data Load Fail"))?
        .ok_or_else(|| AppError::not_found(anyhow!("Category not found")))?;
    Ok(ApiResponse::ok(category, "Successfully find the category"))
}

/// Delete a category (admin only)
#[utoipa::path(
    delete,
    path = "/category/{id}",
    params(("id" = String, Path, description = "Category id")),
    responses(
        (status = 200, description = "Delete result", body = Envelope),
        (status = 400, description = "Malformed id", body = Envelope),
        (status = 401, description = "Missing or invalid token", body = TokenErrorBody),
        (status = 403, description = "Caller is not an admin", body = TokenErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Categories"
)]
#[instrument(skip(state, auth_user), fields(actor = ?auth_user.email()))]
pub async fn delete_category(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<ApiResponse<DeleteOutcome>, AppError> {
    let id = parse_id(&id)?;
    let outcome = DocumentService::delete(state.store.as_ref(), Collection::Categories, id)
        .await
        .map_err(store_failure("Data Delete Fail"))?;
    Ok(ApiResponse::ok(outcome, "Successfully delete Category"))
}
