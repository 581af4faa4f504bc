//! Admin policy: resolves the caller's role from the user store on every
//! request. Roles are never read from the token, so revoking admin rights
//! takes effect on the very next request.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use laptopbay_auth::{AuthError, Claims};
use laptopbay_core::AppError;
use laptopbay_db::{Collection, DocumentStore, Filter};

use crate::middleware::auth::{AuthUser, authenticate, reject};
use crate::modules::documents::store_failure;
use crate::modules::users::model::UserRole;
use crate::state::AppState;

/// Looks up the record for the claim's email and requires [`UserRole::Admin`].
///
/// A claim without an email, a missing record, or any other role is rejected
/// with [`AuthError::Forbidden`]. Store failures become a `Data Load Fail`
/// envelope (500, or 504 on timeout); the store's own error text only goes
/// to the logs.
pub async fn authorize_admin(store: &dyn DocumentStore, claims: &Claims) -> Result<(), AppError> {
    let Some(email) = claims.email() else {
        return Err(reject(AuthError::Forbidden));
    };

    let record = store
        .find_one(Collection::Users, &Filter::eq("email", email))
        .await
        .map_err(store_failure("Data Load Fail"))?;

    match record.as_ref().map(UserRole::from_document) {
        Some(UserRole::Admin) => Ok(()),
        _ => Err(reject(AuthError::Forbidden)),
    }
}

/// Gate chain for privileged routes: authenticate, then authorize, then run
/// the handler with [`AuthUser`] attached. Each step short-circuits with its
/// own terminal response.
///
/// ```rust,ignore
/// use axum::{Router, middleware, routing::delete};
///
/// let routes = Router::new().route(
///     "/{id}",
///     delete(delete_category).route_layer(middleware::from_fn_with_state(state.clone(), require_admin)),
/// );
/// ```
pub async fn require_admin(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let claims = authenticate(req.headers(), &state.jwt_config).map_err(reject)?;
    authorize_admin(state.store.as_ref(), &claims).await?;

    req.extensions_mut().insert(AuthUser(claims));
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use laptopbay_db::{
        DeleteOutcome, Document, InsertOutcome, MemoryStore, StoreError, TimeoutStore,
        UpdateOutcome,
    };
    use serde_json::json;
    use std::time::Duration;

    struct StalledStore;

    #[async_trait]
    impl DocumentStore for StalledStore {
        async fn insert_one(&self, _: Collection, _: Document) -> Result<InsertOutcome, StoreError> {
            std::future::pending().await
        }

        async fn find(&self, _: Collection, _: &Filter) -> Result<Vec<Document>, StoreError> {
            std::future::pending().await
        }

        async fn find_one(&self, _: Collection, _: &Filter) -> Result<Option<Document>, StoreError> {
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

    async fn store_with(email: &str, role: Option<&str>) -> MemoryStore {
        let store = MemoryStore::new();
        let mut doc = json!({ "email": email });
        if let Some(role) = role {
            doc["role"] = json!(role);
        }
        store
            .insert_one(Collection::Users, doc.as_object().cloned().unwrap())
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn test_admin_record_is_authorized() {
        let store = store_with("a@x.com", Some("admin")).await;
        assert!(authorize_admin(&store, &Claims::for_email("a@x.com")).await.is_ok());
    }

    #[tokio::test]
    async fn test_unknown_email_is_forbidden() {
        let store = store_with("a@x.com", Some("admin")).await;
        let err = authorize_admin(&store, &Claims::for_email("b@x.com"))
            .await
            .unwrap_err();
        assert_eq!(err.status.as_u16(), 403);
    }

    #[tokio::test]
    async fn test_standard_role_is_forbidden() {
        let store = store_with("b@x.com", None).await;
        let err = authorize_admin(&store, &Claims::for_email("b@x.com"))
            .await
            .unwrap_err();
        assert_eq!(err.status.as_u16(), 403);
    }

    #[tokio::test]
    async fn test_unrecognized_role_is_forbidden() {
        let store = store_with("c@x.com", Some("superuser")).await;
        let err = authorize_admin(&store, &Claims::for_email("c@x.com"))
            .await
            .unwrap_err();
        assert_eq!(err.status.as_u16(), 403);
    }

    #[tokio::test]
    async fn test_store_timeout_hides_store_error_text() {
        let store = TimeoutStore::new(StalledStore, Duration::from_millis(10));
        let err = authorize_admin(&store, &Claims::for_email("a@x.com"))
            .await
            .unwrap_err();
        assert_eq!(err.status.as_u16(), 504);
        assert_eq!(err.message(), "Data Load Fail");
    }

    #[tokio::test]
    async fn test_claim_without_email_is_forbidden() {
        let store = store_with("a@x.com", Some("admin")).await;
        let err = authorize_admin(&store, &Claims::default()).await.unwrap_err();
        assert_eq!(err.status.as_u16(), 403);
    }
}
