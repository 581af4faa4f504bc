//! Postgres backend tests. Run with a reachable `DATABASE_URL`:
//! `cargo test -p laptopbay-db -- --ignored`

use laptopbay_db::{Collection, DocumentStore, Filter, PgDocumentStore, UpdateOutcome};
use serde_json::{Value, json};
use sqlx::PgPool;

fn doc(value: Value) -> laptopbay_db::Document {
    value.as_object().cloned().unwrap()
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_insert_and_find_by_id(pool: PgPool) {
    let store = PgDocumentStore::new(pool);

    let outcome = store
        .insert_one(Collection::Products, doc(json!({ "name": "ThinkPad X1" })))
        .await
        .unwrap();

    let found = store
        .find_one(Collection::Products, &Filter::Id(outcome.inserted_id))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(found["name"], "ThinkPad X1");
    assert_eq!(found["_id"], json!(outcome.inserted_id.to_string()));
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_find_preserves_insertion_order(pool: PgPool) {
    let store = PgDocumentStore::new(pool);

    for title in ["first", "second", "third"] {
        store
            .insert_one(Collection::Blogs, doc(json!({ "title": title })))
            .await
            .unwrap();
    }

    let blogs = store.find(Collection::Blogs, &Filter::All).await.unwrap();
    let titles: Vec<&str> = blogs.iter().map(|b| b["title"].as_str().unwrap()).collect();
    assert_eq!(titles, vec!["first", "second", "third"]);
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_upsert_by_email(pool: PgPool) {
    let store = PgDocumentStore::new(pool);
    let filter = Filter::eq("email", "x@y.com");

    let created = store
        .update_one(Collection::Users, &filter, doc(json!({ "name": "X" })), true)
        .await
        .unwrap();
    assert!(created.upserted_id.is_some());

    let updated = store
        .update_one(Collection::Users, &filter, doc(json!({ "name": "X2" })), true)
        .await
        .unwrap();
    assert_eq!(updated, UpdateOutcome::matched(1, 1));

    let users = store.find(Collection::Users, &Filter::All).await.unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["email"], "x@y.com");
    assert_eq!(users[0]["name"], "X2");
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_role_filters(pool: PgPool) {
    let store = PgDocumentStore::new(pool);

    store
        .insert_one(Collection::Users, doc(json!({ "email": "a@x.com", "role": "admin" })))
        .await
        .unwrap();
    store
        .insert_one(Collection::Users, doc(json!({ "email": "b@x.com" })))
        .await
        .unwrap();

    let admins = store
        .find(Collection::Users, &Filter::eq("role", "admin"))
        .await
        .unwrap();
    assert_eq!(admins.len(), 1);

    let others = store
        .find(Collection::Users, &Filter::not_eq("role", "admin"))
        .await
        .unwrap();
    assert_eq!(others.len(), 1);
    assert_eq!(others[0]["email"], "b@x.com");
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_update_many_and_delete(pool: PgPool) {
    let store = PgDocumentStore::new(pool);

    let first = store
        .insert_one(Collection::Products, doc(json!({ "name": "A" })))
        .await
        .unwrap();
    store
        .insert_one(Collection::Products, doc(json!({ "name": "B", "years_of_use": 2 })))
        .await
        .unwrap();

    let outcome = store
        .update_many(Collection::Products, &Filter::All, doc(json!({ "years_of_use": 2 })))
        .await
        .unwrap();
    assert_eq!(outcome, UpdateOutcome::matched(2, 1));

    let deleted = store
        .delete_one(Collection::Products, &Filter::Id(first.inserted_id))
        .await
        .unwrap();
    assert_eq!(deleted.deleted_count, 1);
    assert_eq!(
        store.find(Collection::Products, &Filter::All).await.unwrap().len(),
        1
    );
}
