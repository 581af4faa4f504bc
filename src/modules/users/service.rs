use laptopbay_auth::{Claims, create_token};
use laptopbay_config::JwtConfig;
use laptopbay_core::AppError;
use laptopbay_db::{
    Collection, DeleteOutcome, Document, DocumentStore, Filter, ID_FIELD, StoreError,
    UpdateOutcome,
};
use serde_json::Value;
use uuid::Uuid;

use crate::metrics::track_token_issued;
use crate::modules::documents::store_failure;
use crate::modules::users::model::UserRole;

pub struct UserService;

impl UserService {
    /// Creates or overwrites the record for `email` and issues a token for it.
    ///
    /// `role` and `_id` in the body are ignored; roles only change through
    /// [`UserService::set_role`]. The path email wins over any body `email`.
    pub async fn upsert_user(
        store: &dyn DocumentStore,
        jwt_config: &JwtConfig,
        email: &str,
        mut body: Document,
    ) -> Result<(UpdateOutcome, String), AppError> {
        body.remove("role");
        body.remove(ID_FIELD);
        body.insert("email".to_string(), Value::String(email.to_string()));

        let outcome = store
            .update_one(
                Collection::Users,
                &Filter::eq("email", email),
                body.clone(),
                true,
            )
            .await
            .map_err(store_failure("User Created Fail"))?;

        let token = create_token(&Claims::new(body), jwt_config)?;
        track_token_issued("user_upsert");

        Ok((outcome, token))
    }

    pub async fn list_users(store: &dyn DocumentStore) -> Result<Vec<Document>, StoreError> {
        store.find(Collection::Users, &Filter::All).await
    }

    pub async fn list_users_by_role(
        store: &dyn DocumentStore,
        role: UserRole,
    ) -> Result<Vec<Document>, StoreError> {
        let filter = match role {
            UserRole::Admin => Filter::eq("role", UserRole::Admin.as_str()),
            UserRole::Standard => Filter::not_eq("role", UserRole::Admin.as_str()),
        };
        store.find(Collection::Users, &filter).await
    }

    /// Role of the record for `email`, or `None` when no record exists.
    pub async fn get_role(
        store: &dyn DocumentStore,
        email: &str,
    ) -> Result<Option<UserRole>, StoreError> {
        let record = store
            .find_one(Collection::Users, &Filter::eq("email", email))
            .await?;
        Ok(record.as_ref().map(UserRole::from_document))
    }

    /// Sets the role of an existing record. Never creates one.
    pub async fn set_role(
        store: &dyn DocumentStore,
        filter: &Filter,
        role: UserRole,
    ) -> Result<UpdateOutcome, StoreError> {
        let mut changes = Document::new();
        changes.insert("role".to_string(), Value::String(role.as_str().to_string()));
        store
            .update_one(Collection::Users, filter, changes, false)
            .await
    }

    pub async fn delete_user(
        store: &dyn DocumentStore,
        id: Uuid,
    ) -> Result<DeleteOutcome, StoreError> {
        store.delete_one(Collection::Users, &Filter::Id(id)).await
    }
}
