//! Request gates for privileged routes.
//!
//! - [`auth`]: the authentication gate ([`auth::require_auth`], [`auth::AuthUser`])
//! - [`role`]: the admin policy ([`role::require_admin`])
//!
//! # Flow for a privileged request
//!
//! 1. Client sends `Authorization: Bearer <token>`
//! 2. The token is verified; failure ends the request with `401`
//! 3. The caller's user record is loaded by the claim's `email`; a missing
//!    record or a non-admin role ends the request with `403`
//! 4. The handler runs with [`auth::AuthUser`] in the request extensions

pub mod auth;
pub mod role;
