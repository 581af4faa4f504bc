//! Authentication gate: establishes who is calling, never what they may do.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header, request::Parts},
    middleware::Next,
    response::Response,
};
use laptopbay_auth::{AuthError, Claims, verify_token};
use laptopbay_config::JwtConfig;
use laptopbay_core::AppError;

use crate::metrics::track_auth_rejection;
use crate::state::AppState;

/// The decoded claim of an authenticated caller.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn email(&self) -> Option<&str> {
        self.0.email()
    }
}

/// Reads `Authorization: Bearer <token>` and verifies the token.
///
/// The header is split on whitespace and its second part is taken as the
/// credential, so the scheme word itself is not checked.
pub fn authenticate(headers: &HeaderMap, jwt_config: &JwtConfig) -> Result<Claims, AuthError> {
    let header = headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingCredential)?;

    let token = header
        .to_str()
        .ok()
        .and_then(|value| value.split_whitespace().nth(1))
        .ok_or(AuthError::Malformed)?;

    verify_token(token, jwt_config)
}

/// Logs and counts a gate rejection, then maps it to its HTTP error.
pub(crate) fn reject(err: AuthError) -> AppError {
    tracing::debug!(reason = err.reason(), "Request rejected by auth gate");
    track_auth_rejection(err.reason());
    err.into()
}

/// Gate step: rejects with 401 unless a valid token is presented, then
/// attaches [`AuthUser`] to the request.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let claims = authenticate(req.headers(), &state.jwt_config).map_err(reject)?;
    req.extensions_mut().insert(AuthUser(claims));
    Ok(next.run(req).await)
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Routes behind a gate already carry the decoded claim.
        if let Some(user) = parts.extensions.get::<AuthUser>() {
            return Ok(user.clone());
        }

        authenticate(&parts.headers, &state.jwt_config)
            .map(AuthUser)
            .map_err(reject)
    }
}
