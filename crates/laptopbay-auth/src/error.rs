use laptopbay_core::AppError;
use thiserror::Error;

/// Why a request failed the token gate or the admin policy.
///
/// The credential variants all surface as `401 unauthorized`; the
/// distinction is only kept for logs and metrics.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("missing authorization header")]
    MissingCredential,
    #[error("malformed token")]
    Malformed,
    #[error("token signature does not match")]
    InvalidSignature,
    #[error("token has expired")]
    Expired,
    #[error("insufficient role")]
    Forbidden,
    #[error("failed to sign token: {0}")]
    TokenCreation(String),
}

impl AuthError {
    /// Short label used as a metrics dimension.
    pub fn reason(&self) -> &'static str {
        match self {
            AuthError::MissingCredential => "missing_credential",
            AuthError::Malformed => "malformed",
            AuthError::InvalidSignature => "invalid_signature",
            AuthError::Expired => "expired",
            AuthError::Forbidden => "forbidden",
            AuthError::TokenCreation(_) => "token_creation",
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingCredential
            | AuthError::Malformed
            | AuthError::InvalidSignature
            | AuthError::Expired => AppError::unauthorized("unauthorized"),
            AuthError::Forbidden => AppError::forbidden("Forbidden Access"),
            AuthError::TokenCreation(_) => AppError::internal(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_errors_collapse_to_unauthorized() {
        for err in [
            AuthError::MissingCredential,
            AuthError::Malformed,
            AuthError::InvalidSignature,
            AuthError::Expired,
        ] {
            let app_err: AppError = err.into();
            assert_eq!(app_err.status.as_u16(), 401);
            assert_eq!(app_err.message(), "unauthorized");
        }
    }

    #[test]
    fn test_forbidden_maps_to_403() {
        let app_err: AppError = AuthError::Forbidden.into();
        assert_eq!(app_err.status.as_u16(), 403);
        assert_eq!(app_err.message(), "Forbidden Access");
    }

    #[test]
    fn test_token_creation_is_internal() {
        let app_err: AppError = AuthError::TokenCreation("boom".to_string()).into();
        assert_eq!(app_err.status.as_u16(), 500);
    }

    #[test]
    fn test_reason_labels() {
        assert_eq!(AuthError::Expired.reason(), "expired");
        assert_eq!(AuthError::InvalidSignature.reason(), "invalid_signature");
    }
}
