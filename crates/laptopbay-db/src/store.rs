use std::sync::Arc;

use async_trait::async_trait;

use crate::collection::Collection;
use crate::document::{DeleteOutcome, Document, InsertOutcome, UpdateOutcome};
use crate::error::StoreError;
use crate::filter::Filter;

/// Store-access capability handed to the gate, the policy and every handler.
///
/// Returned documents always carry their identifier under `_id`. Identifiers
/// in documents passed in are ignored; the store assigns them.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn insert_one(
        &self,
        collection: Collection,
        document: Document,
    ) -> Result<InsertOutcome, StoreError>;

    /// All matching documents in insertion order.
    async fn find(&self, collection: Collection, filter: &Filter)
    -> Result<Vec<Document>, StoreError>;

    async fn find_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Option<Document>, StoreError>;

    /// Merges `changes` into the first matching document. With `upsert` and no
    /// match, creates a document from the filter's seed plus `changes`.
    async fn update_one(
        &self,
        collection: Collection,
        filter: &Filter,
        changes: Document,
        upsert: bool,
    ) -> Result<UpdateOutcome, StoreError>;

    /// Merges `changes` into every matching document.
    async fn update_many(
        &self,
        collection: Collection,
        filter: &Filter,
        changes: Document,
    ) -> Result<UpdateOutcome, StoreError>;

    async fn delete_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<DeleteOutcome, StoreError>;
}

pub type SharedStore = Arc<dyn DocumentStore>;
