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

/// Place an order
#[utoipa::path(
    post,
    path = "/orders",
    request_body = DocumentBody,
    responses(
        (status = 200, description = "Order created", body = Envelope),
        (status = 500, description = "Store failure", body = Envelope)
    ),
    tag = "Orders"
)]
#[instrument(skip(state, body))]
pub async fn create_order(
    State(state): State<AppState>,
    JsonDocument(body): JsonDocument,
) -> Result<ApiResponse<InsertOutcome>, AppError> {
    let outcome = DocumentService::create(state.store.as_ref(), Collection::Orders, body)
        .await
        .map_err(store_failure("Order Created Fail"))?;
    Ok(ApiResponse::ok(outcome, "Order Created Successful"))
}

/// List all orders (admin only)
#[utoipa::path(
    get,
    path = "/orders",
    responses(
        (status = 200, description = "All orders", body = Envelope),
        (status = 401, description = "Missing or invalid token", body = TokenErrorBody),
        (status = 403, description = "Caller is not an admin", body = TokenErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
#[instrument(skip(state))]
pub async fn list_orders(
    State(state): State<AppState>,
) -> Result<ApiResponse<Vec<Document>>, AppError> {
    let orders = DocumentService::list(state.store.as_ref(), Collection::Orders)
        .await
        .map_err(store_failure("Data Load Fail"))?;
    Ok(ApiResponse::ok(orders, "Successfully find the all Order data"))
}

/// Fetch one order
#[utoipa::path(
    get,
    path = "/orders/{id}",
    params(("id" = String, Path, description = "Order id")),
    responses(
        (status = 200, description = "The order", body = Envelope),
        (status = 400, description = "Malformed id", body = Envelope),
        (status = 404, description = "No such order", body = Envelope)
    ),
    tag = "Orders"
)]
#[instrument(skip(state))]
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<Document>, AppError> {
    let id = parse_id(&id)?;
    let order = DocumentService::get(state.store.as_ref(), Collection::Orders, id)
        .await
        .map_err(store_failure("Data Load Fail"))?
        .ok_or_else(|| AppError::not_found(anyhow!("Order not found")))?;
    Ok(ApiResponse::ok(order, "Successfully find the Order data"))
}

/// Delete an order (admin only)
#[utoipa::path(
    delete,
    path = "/orders/{id}",
    params(("id" = String, Path, description = "Order id")),
    responses(
        (status = 200, description = "Delete result", body = Envelope),
        (status = 400, description = "Malformed id", body = Envelope),
        (status = 401, description = "Missing or invalid token", body = TokenErrorBody),
        (status = 403, description = "Caller is not an admin", body = TokenErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
#[instrument(skip(state, auth_user), fields(actor = ?auth_user.email()))]
pub async fn delete_order(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<ApiResponse<DeleteOutcome>, AppError> {
    let id = parse_id(&id)?;
    let outcome = DocumentService::delete(state.store.as_ref(), Collection::Orders, id)
        .await
        .map_err(store_failure("Data Delete Fail"))?;
    Ok(ApiResponse::ok(outcome, "Successfully delete Order"))
}
