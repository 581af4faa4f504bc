//! PostgreSQL backend storing every collection in one JSONB `documents` table.
//!
//! Schema lives in `migrations/`. A partial unique index on `body->>'email'`
//! keeps user records unique per email.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use laptopbay_config::StoreConfig;

use crate::collection::Collection;
use crate::document::{
    DeleteOutcome, Document, InsertOutcome, UpdateOutcome, apply_changes, strip_id, with_id,
};
use crate::error::StoreError;
use crate::filter::Filter;
use crate::store::DocumentStore;

type Row = (Uuid, Json<Value>);

#[derive(Debug, Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str, config: &StoreConfig) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.call_timeout)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("../../migrations").run(&self.pool).await?;
        Ok(())
    }
}

fn scoped<'a>(sql: &str, collection: Collection, filter: &Filter) -> QueryBuilder<'a, Postgres> {
    let mut qb = QueryBuilder::new(sql);
    qb.push(" WHERE collection = ").push_bind(collection.as_str());
    push_filter_clause(&mut qb, filter);
    qb
}

fn push_filter_clause(qb: &mut QueryBuilder<'_, Postgres>, filter: &Filter) {
    match filter {
        Filter::All => {}
        Filter::Id(id) => {
            qb.push(" AND id = ").push_bind(*id);
        }
        Filter::Eq(field, value) => {
            qb.push(" AND body -> ")
                .push_bind(field.clone())
                .push(" = ")
                .push_bind(Json(value.clone()));
        }
        Filter::NotEq(field, value) => {
            qb.push(" AND (body -> ")
                .push_bind(field.clone())
                .push(") IS DISTINCT FROM ")
                .push_bind(Json(value.clone()));
        }
    }
}

fn into_document((id, Json(body)): Row) -> Result<Document, StoreError> {
    match body {
        Value::Object(map) => Ok(with_id(id, map)),
        _ => Err(StoreError::Corrupt),
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

impl PgDocumentStore {
    async fn try_update_one(
        &self,
        collection: Collection,
        filter: &Filter,
        changes: &Document,
        upsert: bool,
    ) -> Result<UpdateOutcome, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let mut qb = scoped("SELECT id, body FROM documents", collection, filter);
        qb.push(" ORDER BY seq LIMIT 1 FOR UPDATE");
        let existing: Option<Row> = qb.build_query_as().fetch_optional(&mut *tx).await?;

        let outcome = match existing {
            Some((id, Json(body))) => {
                let mut doc = match body {
                    Value::Object(map) => map,
                    _ => Document::new(),
                };
                let modified = apply_changes(&mut doc, changes);
                if modified {
                    sqlx::query("UPDATE documents SET body = $1 WHERE id = $2")
                        .bind(Json(doc))
                        .bind(id)
                        .execute(&mut *tx)
                        .await?;
                }
                UpdateOutcome::matched(1, u64::from(modified))
            }
            None if upsert => {
                let id = filter.pinned_id().unwrap_or_else(Uuid::new_v4);
                let mut doc = filter.seed();
                apply_changes(&mut doc, changes);
                sqlx::query("INSERT INTO documents (id, collection, body) VALUES ($1, $2, $3)")
                    .bind(id)
                    .bind(collection.as_str())
                    .bind(Json(doc))
                    .execute(&mut *tx)
                    .await?;
                UpdateOutcome::upserted(id)
            }
            None => UpdateOutcome::matched(0, 0),
        };

        tx.commit().await?;
        Ok(outcome)
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn insert_one(
        &self,
        collection: Collection,
        document: Document,
    ) -> Result<InsertOutcome, StoreError> {
        let id = Uuid::new_v4();
        sqlx::query("INSERT INTO documents (id, collection, body) VALUES ($1, $2, $3)")
            .bind(id)
            .bind(collection.as_str())
            .bind(Json(strip_id(document)))
            .execute(&self.pool)
            .await?;

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
        let mut qb = scoped("SELECT id, body FROM documents", collection, filter);
        qb.push(" ORDER BY seq");
        let rows: Vec<Row> = qb.build_query_as().fetch_all(&self.pool).await?;

        rows.into_iter().map(into_document).collect()
    }

    async fn find_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Option<Document>, StoreError> {
        let mut qb = scoped("SELECT id, body FROM documents", collection, filter);
        qb.push(" ORDER BY seq LIMIT 1");
        let row: Option<Row> = qb.build_query_as().fetch_optional(&self.pool).await?;

        row.map(into_document).transpose()
    }

    async fn update_one(
        &self,
        collection: Collection,
        filter: &Filter,
        changes: Document,
        upsert: bool,
    ) -> Result<UpdateOutcome, StoreError> {
        let changes = strip_id(changes);

        // A concurrent upsert may insert the same unique key first; the retry
        // then finds and updates that row.
        match self.try_update_one(collection, filter, &changes, upsert).await {
            Err(err) if upsert && is_unique_violation(&err) => {
                tracing::debug!(%collection, "Upsert raced with a concurrent insert, retrying");
                Ok(self
                    .try_update_one(collection, filter, &changes, upsert)
                    .await?)
            }
            result => Ok(result?),
        }
    }

    async fn update_many(
        &self,
        collection: Collection,
        filter: &Filter,
        changes: Document,
    ) -> Result<UpdateOutcome, StoreError> {
        let changes = strip_id(changes);
        let mut tx = self.pool.begin().await?;

        let mut count = scoped("SELECT COUNT(*) FROM documents", collection, filter);
        let matched: i64 = count.build_query_scalar().fetch_one(&mut *tx).await?;

        let mut update = QueryBuilder::<Postgres>::new("UPDATE documents SET body = body || ");
        update.push_bind(Json(changes.clone()));
        update.push(" WHERE collection = ").push_bind(collection.as_str());
        push_filter_clause(&mut update, filter);
        update
            .push(" AND body IS DISTINCT FROM body || ")
            .push_bind(Json(changes));
        let modified = update.build().execute(&mut *tx).await?.rows_affected();

        tx.commit().await?;

        Ok(UpdateOutcome::matched(matched as u64, modified))
    }

    async fn delete_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<DeleteOutcome, StoreError> {
        let mut qb = QueryBuilder::<Postgres>::new(
            "DELETE FROM documents WHERE id = (SELECT id FROM documents",
        );
        qb.push(" WHERE collection = ").push_bind(collection.as_str());
        push_filter_clause(&mut qb, filter);
        qb.push(" ORDER BY seq LIMIT 1)");
        let deleted_count = qb.build().execute(&self.pool).await?.rows_affected();

        Ok(DeleteOutcome {
            acknowledged: true,
            deleted_count,
        })
    }
}
