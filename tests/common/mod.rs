#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use laptopbay::router::init_router;
use laptopbay::state::AppState;
use laptopbay_auth::{Claims, create_token};
use laptopbay_config::{CorsConfig, JwtConfig};
use laptopbay_db::{
    Collection, DeleteOutcome, Document, DocumentStore, Filter, InsertOutcome, MemoryStore,
    StoreError, UpdateOutcome,
};
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "integration-test-secret-at-least-32-chars".to_string(),
        token_expiry: 3600,
    }
}

/// App state over a fresh in-memory store; the store handle is returned for
/// seeding and assertions.
pub fn setup_state() -> (AppState, Arc<MemoryStore>) {
    let memory = Arc::new(MemoryStore::new());
    let state = AppState::new(memory.clone(), test_jwt_config(), CorsConfig::default());
    (state, memory)
}

pub fn setup_test_app() -> (Router, Arc<MemoryStore>) {
    let (state, memory) = setup_state();
    (init_router(state), memory)
}

/// Sends one request and returns the status with the body parsed as JSON
/// (plain-text bodies come back as a JSON string).
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }

    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));

    (status, value)
}

pub fn document(value: Value) -> Document {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}

/// Inserts a user record directly into the store and returns its id.
pub async fn seed_user(store: &MemoryStore, email: &str, role: Option<&str>) -> Uuid {
    let mut user = document(json!({ "email": email, "name": "Test User" }));
    if let Some(role) = role {
        user.insert("role".to_string(), json!(role));
    }
    seed_document(store, Collection::Users, user).await
}

pub async fn seed(store: &MemoryStore, collection: Collection, value: Value) -> Uuid {
    seed_document(store, collection, document(value)).await
}

async fn seed_document(store: &MemoryStore, collection: Collection, doc: Document) -> Uuid {
    store.insert_one(collection, doc).await.unwrap().inserted_id
}

pub fn token_for(email: &str) -> String {
    create_token(&Claims::for_email(email), &test_jwt_config()).unwrap()
}

/// Store whose every call fails, for exercising error envelopes.
pub struct FailingStore;

#[async_trait]
impl DocumentStore for FailingStore {
    async fn insert_one(&self, _: Collection, _: Document) -> Result<InsertOutcome, StoreError> {
        Err(StoreError::Corrupt)
    }

    async fn find(&self, _: Collection, _: &Filter) -> Result<Vec<Document>, StoreError> {
        Err(StoreError::Corrupt)
    }

    async fn find_one(&self, _: Collection, _: &Filter) -> Result<Option<Document>, StoreError> {
        Err(StoreError::Corrupt)
    }

    async fn update_one(
        &self,
        _: Collection,
        _: &Filter,
        _: Document,
        _: bool,
    ) -> Result<UpdateOutcome, StoreError> {
        Err(StoreError::Corrupt)
    }

    async fn update_many(
        &self,
        _: Collection,
        _: &Filter,
        _: Document,
    ) -> Result<UpdateOutcome, StoreError> {
        Err(StoreError::Corrupt)
    }

    async fn delete_one(&self, _: Collection, _: &Filter) -> Result<DeleteOutcome, StoreError> {
        Err(StoreError::Corrupt)
    }
}

pub fn setup_failing_app() -> Router {
    let state = AppState::new(
        Arc::new(FailingStore),
        test_jwt_config(),
        CorsConfig::default(),
    );
    init_router(state)
}
