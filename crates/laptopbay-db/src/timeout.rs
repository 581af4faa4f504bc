//! Bounded-time wrapper around any [`DocumentStore`].

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;

use crate::collection::Collection;
use crate::document::{DeleteOutcome, Document, InsertOutcome, UpdateOutcome};
use crate::error::StoreError;
use crate::filter::Filter;
use crate::store::DocumentStore;

/// Fails any call that runs longer than `budget` with [`StoreError::Timeout`].
pub struct TimeoutStore<S> {
    inner: S,
    budget: Duration,
}

impl<S> TimeoutStore<S> {
    pub fn new(inner: S, budget: Duration) -> Self {
        Self { inner, budget }
    }

    async fn bounded<T, F>(&self, operation: &'static str, call: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        match tokio::time::timeout(self.budget, call).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(operation, budget_ms = %self.budget.as_millis(), "Store call timed out");
                Err(StoreError::Timeout(self.budget))
            }
        }
    }
}

#[async_trait]
impl<S: DocumentStore> DocumentStore for TimeoutStore<S> {
    async fn insert_one(
        &self,
        collection: Collection,
        document: Document,
    ) -> Result<InsertOutcome, StoreError> {
        self.bounded("insert_one", self.inner.insert_one(collection, document))
            .await
    }

    async fn find(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Vec<Document>, StoreError> {
        self.bounded("find", self.inner.find(collection, filter)).await
    }

    async fn find_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Option<Document>, StoreError> {
        self.bounded("find_one", self.inner.find_one(collection, filter))
            .await
    }

    async fn update_one(
        &self,
        collection: Collection,
        filter: &Filter,
        changes: Document,
        upsert: bool,
    ) -> Result<UpdateOutcome, StoreError> {
        self.bounded(
            "update_one",
            self.inner.update_one(collection, filter, changes, upsert),
        )
        .await
    }

    async fn update_many(
        &self,
        collection: Collection,
        filter: &Filter,
        changes: Document,
    ) -> Result<UpdateOutcome, StoreError> {
        self.bounded(
            "update_many",
            self.inner.update_many(collection, filter, changes),
        )
        .await
    }

    async fn delete_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<DeleteOutcome, StoreError> {
        self.bounded("delete_one", self.inner.delete_one(collection, filter))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;

    struct StalledStore;

    #[async_trait]
    impl DocumentStore for StalledStore {
        async fn insert_one(&self, _: Collection, _: Document) -> Result<InsertOutcome, StoreError> {
            std::future::pending().await
        }

        async fn find(&self, _: Collection, _: &Filter) -> Result<Vec<Document>, StoreError> {
            std::future::pending().await
        }

        async fn find_one(
            &self,
            _: Collection,
            _: &Filter,
        ) -> Result<Option<Document>, StoreError> {
            std::future::pending().await
        }

        async fn update_one(
            &self,
            _: Collection,
            _: &Filter,
            _: Document,
            _: bool,
        ) -> Result<UpdateOutcome, StoreError> {
            std::future::pending().await
        }

        async fn update_many(
            &self,
            _: Collection,
            _: &Filter,
            _: Document,
        ) -> Result<UpdateOutcome, StoreError> {
            std::future::pending().await
        }

        async fn delete_one(&self, _: Collection, _: &Filter) -> Result<DeleteOutcome, StoreError> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn test_stalled_call_times_out() {
        let store = TimeoutStore::new(StalledStore, Duration::from_millis(20));
        let result = store.find(Collection::Users, &Filter::All).await;
        assert!(matches!(result, Err(StoreError::Timeout(d)) if d == Duration::from_millis(20)));
    }

    #[tokio::test]
    async fn test_fast_call_passes_through() {
        let store = TimeoutStore::new(MemoryStore::new(), Duration::from_secs(1));
        let outcome = store
            .insert_one(Collection::Blogs, Document::new())
            .await
            .unwrap();
        let found = store
            .find_one(Collection::Blogs, &Filter::Id(outcome.inserted_id))
            .await
            .unwrap();
        assert!(found.is_some());
    }
}
