//! Operator commands. Admin rights are never granted over HTTP without an
//! existing admin, so the first one is promoted from here.

use anyhow::{Context, bail};
use laptopbay_auth::{Claims, create_token};
use laptopbay_config::JwtConfig;
use laptopbay_db::{DocumentStore, Filter};

use crate::metrics::track_token_issued;
use crate::modules::users::model::UserRole;
use crate::modules::users::service::UserService;

/// Grants the admin role to the existing user record for `email`.
pub async fn promote_admin(store: &dyn DocumentStore, email: &str) -> anyhow::Result<()> {
    let outcome = UserService::set_role(store, &Filter::eq("email", email), UserRole::Admin)
        .await
        .context("Failed to update user role")?;

    if outcome.matched_count == 0 {
        bail!("No user registered with email {email}");
    }

    Ok(())
}

/// Signs a token whose claim holds only `email`.
pub fn issue_token(jwt_config: &JwtConfig, email: &str) -> anyhow::Result<String> {
    let token = create_token(&Claims::for_email(email), jwt_config)?;
    track_token_issued("cli");
    Ok(token)
}
