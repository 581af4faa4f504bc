//! Identity claims carried inside signed tokens.
//!
//! A claim is an open attribute bag supplied by the caller. The only key the
//! rest of the system reads is `email`, the subject key used to resolve the
//! caller's user record.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Keys owned by the token codec. Caller-supplied values are dropped.
pub const RESERVED_KEYS: [&str; 2] = ["exp", "iat"];

/// Decoded identity claim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Claims(Map<String, Value>);

impl Claims {
    pub fn new(attributes: Map<String, Value>) -> Self {
        Self(attributes)
    }

    /// Claim holding only an email, as issued by the CLI.
    pub fn for_email(email: &str) -> Self {
        let mut attributes = Map::new();
        attributes.insert("email".to_string(), Value::String(email.to_string()));
        Self(attributes)
    }

    pub fn email(&self) -> Option<&str> {
        self.0.get("email").and_then(Value::as_str)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub(crate) fn without_reserved(&self) -> Self {
        let mut attributes = self.0.clone();
        for key in RESERVED_KEYS {
            attributes.remove(key);
        }
        Self(attributes)
    }
}

/// Wire payload: the claim plus the codec's timing fields.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct SignedClaims {
    #[serde(flatten)]
    pub claims: Claims,
    pub exp: i64,
    pub iat: i64,
}
