//! Single-operation data access shared by the catalog, order and blog
//! modules. Each call maps one-to-one onto a document store operation.

use anyhow::anyhow;
use axum::http::StatusCode;
use laptopbay_core::AppError;
use laptopbay_db::{
    Collection, DeleteOutcome, Document, DocumentStore, Filter, InsertOutcome, StoreError,
};
use uuid::Uuid;

pub struct DocumentService;

impl DocumentService {
    pub async fn create(
        store: &dyn DocumentStore,
        collection: Collection,
        document: Document,
    ) -> Result<InsertOutcome, StoreError> {
        store.insert_one(collection, document).await
    }

    pub async fn list(
        store: &dyn DocumentStore,
        collection: Collection,
    ) -> Result<Vec<Document>, StoreError> {
        store.find(collection, &Filter::All).await
    }

    pub async fn get(
        store: &dyn DocumentStore,
        collection: Collection,
        id: Uuid,
    ) -> Result<Option<Document>, StoreError> {
        store.find_one(collection, &Filter::Id(id)).await
    }

    /// Matching documents as a list of zero or one, the shape blog lookups
    /// have always returned.
    pub async fn find_by_id(
        store: &dyn DocumentStore,
        collection: Collection,
        id: Uuid,
    ) -> Result<Vec<Document>, StoreError> {
        store.find(collection, &Filter::Id(id)).await
    }

    pub async fn delete(
        store: &dyn DocumentStore,
        collection: Collection,
        id: Uuid,
    ) -> Result<DeleteOutcome, StoreError> {
        store.delete_one(collection, &Filter::Id(id)).await
    }
}

/// Parses a document identifier from a path segment.
pub fn parse_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::bad_request(anyhow!("Invalid id: {raw}")))
}

/// Maps a store failure to a `success: false` response carrying `message`.
/// The underlying error stays in the error chain for logs.
pub fn store_failure(message: &'static str) -> impl FnOnce(StoreError) -> AppError {
    move |err| {
        let status = match err {
            StoreError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        AppError::new(status, anyhow::Error::new(err).context(message))
    }
}
