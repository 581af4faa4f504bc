//! In-process document store used by tests and by local runs without a
//! database.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::collection::Collection;
use crate::document::{
    DeleteOutcome, Document, InsertOutcome, UpdateOutcome, apply_changes, strip_id, with_id,
};
use crate::error::StoreError;
use crate::filter::Filter;
use crate::store::DocumentStore;

#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<Collection, Vec<(Uuid, Document)>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert_one(
        &self,
        collection: Collection,
        document: Document,
    ) -> Result<InsertOutcome, StoreError> {
        let id = Uuid::new_v4();
        let mut collections = self.collections.write().await;
        collections
            .entry(collection)
            .or_default()
            .push((id, strip_id(document)));

        Ok(InsertOutcome {
            acknowledged: true,
            inserted_id: id,
        })
    }

    async fn find(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.read().await;
        let documents = collections
            .get(&collection)
            .map(|docs| {
                docs.iter()
                    .filter(|(id, doc)| filter.matches(id, doc))
                    .map(|(id, doc)| with_id(*id, doc.clone()))
                    .collect()
            })
            .unwrap_or_default();

        Ok(documents)
    }

    async fn find_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Option<Document>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections.get(&collection).and_then(|docs| {
            docs.iter()
                .find(|(id, doc)| filter.matches(id, doc))
                .map(|(id, doc)| with_id(*id, doc.clone()))
        }))
    }

    async fn update_one(
        &self,
        collection: Collection,
        filter: &Filter,
        changes: Document,
        upsert: bool,
    ) -> Result<UpdateOutcome, StoreError> {
        let changes = strip_id(changes);
        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection).or_default();

        if let Some((_, doc)) = docs.iter_mut().find(|(id, doc)| filter.matches(id, doc)) {
            let modified = apply_changes(doc, &changes);
            return Ok(UpdateOutcome::matched(1, u64::from(modified)));
        }

        if !upsert {
            return Ok(UpdateOutcome::matched(0, 0));
        }

        let id = filter.pinned_id().unwrap_or_else(Uuid::new_v4);
        let mut doc = filter.seed();
        apply_changes(&mut doc, &changes);
        docs.push((id, doc));

        Ok(UpdateOutcome::upserted(id))
    }

    async fn update_many(
        &self,
        collection: Collection,
        filter: &Filter,
        changes: Document,
    ) -> Result<UpdateOutcome, StoreError> {
        let changes = strip_id(changes);
        let mut collections = self.collections.write().await;
        let mut matched = 0;
        let mut modified = 0;

        if let Some(docs) = collections.get_mut(&collection) {
            for (id, doc) in docs.iter_mut() {
                if filter.matches(id, doc) {
                    matched += 1;
                    if apply_changes(doc, &changes) {
                        modified += 1;
                    }
                }
            }
        }

        Ok(UpdateOutcome::matched(matched, modified))
    }

    async fn delete_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<DeleteOutcome, StoreError> {
        let mut collections = self.collections.write().await;
        let deleted_count = match collections.get_mut(&collection) {
            Some(docs) => match docs.iter().position(|(id, doc)| filter.matches(id, doc)) {
                Some(index) => {
                    docs.remove(index);
                    1
                }
                None => 0,
            },
            None => 0,
        };

        Ok(DeleteOutcome {
            acknowledged: true,
            deleted_count,
        })
    }
}
