//! Equality filters over documents.

use serde_json::Value;
use uuid::Uuid;

use crate::document::Document;

/// Selects documents within a collection.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    All,
    Id(Uuid),
    /// Top-level field equals the value.
    Eq(String, Value),
    /// Top-level field is absent or differs from the value.
    NotEq(String, Value),
}

impl Filter {
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Eq(field.into(), value.into())
    }

    pub fn not_eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::NotEq(field.into(), value.into())
    }

    pub fn matches(&self, id: &Uuid, document: &Document) -> bool {
        match self {
            Filter::All => true,
            Filter::Id(wanted) => wanted == id,
            Filter::Eq(field, value) => document.get(field) == Some(value),
            Filter::NotEq(field, value) => document.get(field) != Some(value),
        }
    }

    /// Fields an upsert seeds into a newly created document, mirroring the
    /// equality the filter asserted.
    pub fn seed(&self) -> Document {
        let mut seed = Document::new();
        if let Filter::Eq(field, value) = self {
            seed.insert(field.clone(), value.clone());
        }
        seed
    }

    /// Identifier an upsert must use for a newly created document.
    pub fn pinned_id(&self) -> Option<Uuid> {
        match self {
            Filter::Id(id) => Some(*id),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_eq_matches_field() {
        let id = Uuid::new_v4();
        let filter = Filter::eq("email", "a@x.com");
        assert!(filter.matches(&id, &doc(json!({ "email": "a@x.com" }))));
        assert!(!filter.matches(&id, &doc(json!({ "email": "b@x.com" }))));
        assert!(!filter.matches(&id, &doc(json!({}))));
    }

    #[test]
    fn test_not_eq_matches_absent_field() {
        let id = Uuid::new_v4();
        let filter = Filter::not_eq("role", "admin");
        assert!(filter.matches(&id, &doc(json!({}))));
        assert!(filter.matches(&id, &doc(json!({ "role": "user" }))));
        assert!(!filter.matches(&id, &doc(json!({ "role": "admin" }))));
    }

    #[test]
    fn test_id_filter() {
        let id = Uuid::new_v4();
        assert!(Filter::Id(id).matches(&id, &doc(json!({}))));
        assert!(!Filter::Id(Uuid::new_v4()).matches(&id, &doc(json!({}))));
        assert_eq!(Filter::Id(id).pinned_id(), Some(id));
    }

    #[test]
    fn test_seed_from_eq() {
        let seed = Filter::eq("email", "x@y.com").seed();
        assert_eq!(seed["email"], "x@y.com");
        assert!(Filter::All.seed().is_empty());
    }
}
