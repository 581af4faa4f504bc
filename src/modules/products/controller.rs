use anyhow::anyhow;
use axum::extract::{Path, State};
use laptopbay_core::{ApiResponse, AppError};
use laptopbay_db::{Collection, DeleteOutcome, Document, Filter, InsertOutcome, UpdateOutcome};
use serde_json::Value;
use tracing::instrument;

use crate::docs::{DocumentBody, Envelope, TokenErrorBody};
use crate::extract::JsonDocument;
use crate::middleware::auth::AuthUser;
use crate::modules::documents::{DocumentService, parse_id, store_failure};
use crate::state::AppState;

/// Value written by the `years_of_use` backfill.
pub const DEFAULT_YEARS_OF_USE: u64 = 2;

/// Create a product listing
#[utoipa::path(
    post,
    path = "/products",
    request_body = DocumentBody,
    responses(
        (status = 200, description = "Product created", body = Envelope),
        (status = 500, description = "Store failure", body = Envelope)
    ),
    tag = "Products"
)]
#[instrument(skip(state, body))]
pub async fn create_product(
    State(state): State<AppState>,
    JsonDocument(body): JsonDocument,
) -> Result<ApiResponse<InsertOutcome>, AppError> {
    let outcome = DocumentService::create(state.store.as_ref(), Collection::Products, body)
        .await
        .map_err(store_failure("Product Created Fail"))?;
    Ok(ApiResponse::ok(outcome, "Created Product Successful"))
}

/// List all products
#[utoipa::path(
    get,
    path = "/products",
    responses(
        (status = 200, description = "All products", body = Envelope),
        (status = 500, description = "Store failure", body = Envelope)
    ),
    tag = "Products"
)]
#[instrument(skip(state))]
pub async fn list_products(
    State(state): State<AppState>,
) -> Result<ApiResponse<Vec<Document>>, AppError> {
    let products = DocumentService::list(state.store.as_ref(), Collection::Products)
        .await
        .map_err(store_failure("Data Load Fail"))?;
    Ok(ApiResponse::ok(products, "Successfully find the all Product data"))
}

/// Fetch one product
#[utoipa::path(
    get,
    path = "/products/{id}",
    params(("id" = String, Path, description = "Product id")),
    responses(
        (status = 200, description = "The product", body = Envelope),
        (status = 400, description = "Malformed id", body = Envelope),
        (status = 404, description = "No such product", body = Envelope)
    ),
    tag = "Products"
)]
#[instrument(skip(state))]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<Document>, AppError> {
    let id = parse_id(&id)?;
    let product = DocumentService::get(state.store.as_ref(), Collection::Products, id)
        .await
        .map_err(store_failure("Data Load Fail"))?
        .ok_or_else(|| AppError::not_found(anyhow!("Product not found")))?;
    Ok(ApiResponse::ok(product, "Successfully find the Product data"))
}

/// Delete a product (admin only)
#[utoipa::path(
    delete,
    path = "/products/{id}",
    params(("id" = String, Path, description = "Product id")),
    responses(
        (status = 200, description = "Delete result", body = Envelope),
        (status = 400, description = "Malformed id", body = Envelope),
        (status = 401, description = "Missing or invalid token", body = TokenErrorBody),
        (status = 403, description = "Caller is not an admin", body = TokenErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Products"
)]
#[instrument(skip(state, auth_user), fields(actor = ?auth_user.email()))]
pub async fn delete_product(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<ApiResponse<DeleteOutcome>, AppError> {
    let id = parse_id(&id)?;
    let outcome = DocumentService::delete(state.store.as_ref(), Collection::Products, id)
        .await
        .map_err(store_failure("Data Delete Fail"))?;
    Ok(ApiResponse::ok(outcome, "Successfully delete Product"))
}

/// Set `years_of_use` on every product
///
/// Maintenance backfill for listings created before the field existed.
/// Never creates a product.
#[utoipa::path(
    put,
    path = "/product",
    responses(
        (status = 200, description = "Update result", body = Envelope),
        (status = 500, description = "Store failure", body = Envelope)
    ),
    tag = "Products"
)]
#[instrument(skip(state))]
pub async fn backfill_years_of_use(
    State(state): State<AppState>,
) -> Result<ApiResponse<UpdateOutcome>, AppError> {
    let mut changes = Document::new();
    changes.insert("years_of_use".to_string(), Value::from(DEFAULT_YEARS_OF_USE));

    let outcome = state
        .store
        .update_many(Collection::Products, &Filter::All, changes)
        .await
        .map_err(store_failure("Product Update Fail"))?;

    tracing::info!(
        matched = outcome.matched_count,
        modified = outcome.modified_count,
        "Backfilled years_of_use"
    );
    Ok(ApiResponse::ok(outcome, "Successfully updated all Product data"))
}
