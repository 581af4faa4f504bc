use axum::extract::{Path, State};
use laptopbay_core::{ApiResponse, AppError};
use laptopbay_db::{Collection, Document, InsertOutcome};
use tracing::instrument;

use crate::docs::{DocumentBody, Envelope};
use crate::extract::JsonDocument;
use crate::modules::documents::{DocumentService, parse_id, store_failure};
use crate::state::AppState;

/// Publish a blog post
#[utoipa::path(
    post,
    path = "/blog",
    request_body = DocumentBody,
    responses(
        (status = 200, description = "Blog post created", body = Envelope),
        (status = 500, description = "Store failure", body = Envelope)
    ),
    tag = "Blogs"
)]
#[instrument(skip(state, body))]
pub async fn create_blog(
    State(state): State<AppState>,
    JsonDocument(body): JsonDocument,
) -> Result<ApiResponse<InsertOutcome>, AppError> {
    let outcome = DocumentService::create(state.store.as_ref(), Collection::Blogs, body)
        .await
        .map_err(store_failure("Blog Created Fail"))?;
    Ok(ApiResponse::ok(outcome, "Blog Created Successful"))
}

/// List all blog posts
#[utoipa::path(
    get,
    path = "/blog",
    responses(
        (status = 200, description = "All blog posts", body = Envelope),
        (status = 500, description = "Store failure", body = Envelope)
    ),
    tag = "Blogs"
)]
#[instrument(skip(state))]
pub async fn list_blogs(
    State(state): State<AppState>,
) -> Result<ApiResponse<Vec<Document>>, AppError> {
    let blogs = DocumentService::list(state.store.as_ref(), Collection::Blogs)
        .await
        .map_err(store_failure("Data Load Fail"))?;
    Ok(ApiResponse::ok(blogs, "Successfully find the all Blogs data"))
}

/// Fetch a blog post by id
///
/// Responds with a list holding the post, or an empty list.
#[utoipa::path(
    get,
    path = "/blog/{id}",
    params(("id" = String, Path, description = "Blog post id")),
    responses(
        (status = 200, description = "Zero or one blog posts", body = Envelope),
        (status = 400, description = "Malformed id", body = Envelope)
    ),
    tag = "Blogs"
)]
#[instrument(skip(state))]
pub async fn get_blog(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<Vec<Document>>, AppError> {
    let id = parse_id(&id)?;
    let blogs = DocumentService::find_by_id(state.store.as_ref(), Collection::Blogs, id)
        .await
        .map_err(store_failure("Data Load Fail"))?;
    Ok(ApiResponse::ok(blogs, "Successfully Find the blog data"))
}
