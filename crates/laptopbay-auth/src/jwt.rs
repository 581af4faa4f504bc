//! Signed token issuance and verification.
//!
//! Tokens are HS256 JWTs whose payload is the caller's claim with `exp` and
//! `iat` added. Verification checks the signature first and only then the
//! expiry, so a tampered token always reports [`AuthError::InvalidSignature`].
//! MAC comparison inside `jsonwebtoken` is constant-time.
//!
//! # Example
//!
//! ```ignore
//! use laptopbay_auth::{Claims, create_token, verify_token};
//! use laptopbay_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = create_token(&Claims::for_email("x@y.com"), &config)?;
//! let claims = verify_token(&token, &config)?;
//! assert_eq!(claims.email(), Some("x@y.com"));
//! ```

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use laptopbay_config::JwtConfig;

use crate::claims::{Claims, SignedClaims};
use crate::error::AuthError;

/// Signs `claims` with an expiry of `now + jwt_config.token_expiry`.
///
/// Any `exp`/`iat` keys present in `claims` are replaced by the codec's own.
/// A claim without `email` is accepted here; it simply never passes the admin
/// policy later.
pub fn create_token(claims: &Claims, jwt_config: &JwtConfig) -> Result<String, AuthError> {
    let now = Utc::now().timestamp();
    let exp = now.checked_add(jwt_config.token_expiry).ok_or_else(|| {
        AuthError::TokenCreation(format!(
            "token expiry of {}s is out of range",
            jwt_config.token_expiry
        ))
    })?;

    let signed = SignedClaims {
        claims: claims.without_reserved(),
        exp,
        iat: now,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &signed,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AuthError::TokenCreation(e.to_string()))
}

/// Verifies `token` and returns the claim it was issued for.
///
/// # Errors
///
/// - [`AuthError::InvalidSignature`] when the token was signed with another secret
/// - [`AuthError::Expired`] when the current time is at or past `exp`
/// - [`AuthError::Malformed`] when the token cannot be decoded at all
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    // Expiry is checked below with no leeway; `exp == now` is already expired.
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp"]);

    let data = decode::<SignedClaims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &validation,
    )
    .map_err(classify)?;

    if Utc::now().timestamp() >= data.claims.exp {
        return Err(AuthError::Expired);
    }

    Ok(data.claims.claims)
}

fn classify(err: jsonwebtoken::errors::Error) -> AuthError {
    match err.kind() {
        ErrorKind::InvalidSignature => AuthError::InvalidSignature,
        ErrorKind::ExpiredSignature => AuthError::Expired,
        _ => AuthError::Malformed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn get_test_jwt_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-key-at-least-32-characters-long".to_string(),
            token_expiry: 3600,
        }
    }

    fn claims_from(value: Value) -> Claims {
        match value {
            Value::Object(map) => Claims::new(map),
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_create_token_success() {
        let config = get_test_jwt_config();
        let token = create_token(&Claims::for_email("test@example.com"), &config).unwrap();
        assert_eq!(token.split('.').count(), 3);
    }

    #[test]
    fn test_verify_returns_original_claims() {
        let config = get_test_jwt_config();
        let claims = claims_from(json!({
            "email": "test@example.com",
            "name": "Tester",
            "address": { "city": "Dhaka" }
        }));

        let token = create_token(&claims, &config).unwrap();
        let decoded = verify_token(&token, &config).unwrap();

        assert_eq!(decoded, claims);
    }

    #[test]
    fn test_verify_token_wrong_secret() {
        let config = get_test_jwt_config();
        let token = create_token(&Claims::for_email("test@example.com"), &config).unwrap();

        let wrong_config = JwtConfig {
            secret: "different-secret-key-at-least-32-characters".to_string(),
            token_expiry: 3600,
        };

        assert_eq!(
            verify_token(&token, &wrong_config),
            Err(AuthError::InvalidSignature)
        );
    }

    #[test]
    fn test_zero_ttl_is_expired() {
        let config = JwtConfig {
            token_expiry: 0,
            ..get_test_jwt_config()
        };
        let token = create_token(&Claims::for_email("test@example.com"), &config).unwrap();

        assert_eq!(verify_token(&token, &config), Err(AuthError::Expired));
    }

    #[test]
    fn test_elapsed_ttl_is_expired() {
        let config = JwtConfig {
            token_expiry: -60,
            ..get_test_jwt_config()
        };
        let token = create_token(&Claims::for_email("test@example.com"), &config).unwrap();

        assert_eq!(verify_token(&token, &config), Err(AuthError::Expired));
    }

    #[test]
    fn test_out_of_range_ttl_fails_creation() {
        let config = JwtConfig {
            token_expiry: i64::MAX,
            ..get_test_jwt_config()
        };
        let result = create_token(&Claims::for_email("test@example.com"), &config);

        assert!(matches!(result, Err(AuthError::TokenCreation(_))));
    }

    #[test]
    fn test_verify_garbage_is_malformed() {
        let config = get_test_jwt_config();
        assert_eq!(
            verify_token("invalid.token.here", &config),
            Err(AuthError::Malformed)
        );
        assert_eq!(verify_token("", &config), Err(AuthError::Malformed));
    }

    #[test]
    fn test_caller_timing_keys_are_overridden() {
        let config = get_test_jwt_config();
        let claims = claims_from(json!({ "email": "test@example.com", "exp": 1 }));

        let token = create_token(&claims, &config).unwrap();
        let decoded = verify_token(&token, &config).unwrap();

        assert_eq!(decoded.email(), Some("test@example.com"));
        assert!(decoded.get("exp").is_none());
    }

    #[test]
    fn test_claim_without_email_still_issues() {
        let config = get_test_jwt_config();
        let claims = claims_from(json!({ "name": "anonymous" }));

        let token = create_token(&claims, &config).unwrap();
        let decoded = verify_token(&token, &config).unwrap();

        assert_eq!(decoded.email(), None);
    }

    #[test]
    fn test_claim_with_audience_key_verifies() {
        let config = get_test_jwt_config();
        let claims = claims_from(json!({ "email": "test@example.com", "aud": "shop" }));

        let token = create_token(&claims, &config).unwrap();
        assert!(verify_token(&token, &config).is_ok());
    }
}
