use anyhow::anyhow;
use axum::extract::State;
use laptopbay_auth::{Claims, create_token};
use laptopbay_core::{ApiResponse, AppError};
use tracing::instrument;

use crate::docs::{DocumentBody, Envelope};
use crate::extract::JsonDocument;
use crate::metrics::track_token_issued;
use crate::state::AppState;

/// Issue a token for the posted claim
///
/// The whole body becomes the token's claim. It must carry a string `email`,
/// the key the admin policy resolves users by.
#[utoipa::path(
    post,
    path = "/createJwtToken",
    request_body = DocumentBody,
    responses(
        (status = 200, description = "Token issued", body = Envelope),
        (status = 400, description = "Claim has no email", body = Envelope)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, body))]
pub async fn create_jwt_token(
    State(state): State<AppState>,
    JsonDocument(body): JsonDocument,
) -> Result<ApiResponse<String>, AppError> {
    let claims = Claims::new(body);
    if claims.email().is_none() {
        return Err(AppError::bad_request(anyhow!(
            "Claim must include an email"
        )));
    }

    let token = create_token(&claims, &state.jwt_config)?;
    track_token_issued("create_jwt_token");

    Ok(ApiResponse::ok(token, "JWT Token Generate Successful"))
}
