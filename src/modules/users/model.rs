use std::fmt;
use std::str::FromStr;

use laptopbay_db::Document;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Privilege level of a user record.
///
/// Stored as the `role` field: `"admin"` or `"user"`. A record without a role
/// is a standard user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    #[serde(rename = "user")]
    Standard,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Standard => "user",
            UserRole::Admin => "admin",
        }
    }

    /// Role of a stored user record. Unrecognized values are treated as
    /// [`UserRole::Standard`].
    pub fn from_document(document: &Document) -> Self {
        match document.get("role") {
            None | Some(serde_json::Value::Null) => UserRole::Standard,
            Some(value) => match value.as_str().map(str::parse) {
                Some(Ok(role)) => role,
                _ => {
                    tracing::warn!(role = %value, "Unrecognized stored role, treating as standard user");
                    UserRole::Standard
                }
            },
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRole(pub String);

impl fmt::Display for UnknownRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown role: {}", self.0)
    }
}

impl std::error::Error for UnknownRole {}

impl FromStr for UserRole {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(UserRole::Admin),
            "user" | "standard" => Ok(UserRole::Standard),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// Body of `GET /users/admin/{email}`. `role` is `null` when no record exists.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RoleResponse {
    pub role: Option<UserRole>,
}

/// Body of `PUT /users/{email}`: the standard envelope plus a fresh token.
#[derive(Debug, Serialize)]
pub struct UpsertUserResponse<T> {
    pub data: T,
    pub token: String,
    pub success: bool,
    pub message: String,
}
