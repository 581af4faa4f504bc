//! Stored documents and the raw results of write operations.

use serde::Serialize;
use serde_json::{Map, Value};
use uuid::Uuid;

/// A JSON object as stored in a collection.
pub type Document = Map<String, Value>;

/// Key under which a document's identifier is exposed.
pub const ID_FIELD: &str = "_id";

/// Returns `document` with its identifier exposed under [`ID_FIELD`].
pub fn with_id(id: Uuid, mut document: Document) -> Document {
    document.insert(ID_FIELD.to_string(), Value::String(id.to_string()));
    document
}

/// Drops any caller-supplied identifier; ids are assigned by the store.
pub fn strip_id(mut document: Document) -> Document {
    document.remove(ID_FIELD);
    document
}

/// Shallow merge of `changes` into `target`, returning whether anything changed.
pub fn apply_changes(target: &mut Document, changes: &Document) -> bool {
    let mut modified = false;
    for (key, value) in changes {
        if target.get(key) != Some(value) {
            target.insert(key.clone(), value.clone());
            modified = true;
        }
    }
    modified
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertOutcome {
    pub acknowledged: bool,
    pub inserted_id: Uuid,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOutcome {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_id: Option<Uuid>,
}

impl UpdateOutcome {
    pub fn matched(matched_count: u64, modified_count: u64) -> Self {
        Self {
            acknowledged: true,
            matched_count,
            modified_count,
            upserted_id: None,
        }
    }

    pub fn upserted(id: Uuid) -> Self {
        Self {
            acknowledged: true,
            matched_count: 0,
            modified_count: 0,
            upserted_id: Some(id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteOutcome {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_apply_changes_reports_modification() {
        let mut target = doc(json!({ "name": "X", "role": "user" }));
        assert!(apply_changes(&mut target, &doc(json!({ "role": "admin" }))));
        assert_eq!(target["role"], "admin");
        assert_eq!(target["name"], "X");
    }

    #[test]
    fn test_apply_identical_changes_is_noop() {
        let mut target = doc(json!({ "role": "admin" }));
        assert!(!apply_changes(&mut target, &doc(json!({ "role": "admin" }))));
    }

    #[test]
    fn test_with_id_and_strip_id() {
        let id = Uuid::new_v4();
        let exposed = with_id(id, doc(json!({ "name": "X" })));
        assert_eq!(exposed[ID_FIELD], json!(id.to_string()));
        assert!(strip_id(exposed).get(ID_FIELD).is_none());
    }

    #[test]
    fn test_outcomes_serialize_camel_case() {
        let value = serde_json::to_value(UpdateOutcome::matched(1, 0)).unwrap();
        assert_eq!(
            value,
            json!({ "acknowledged": true, "matchedCount": 1, "modifiedCount": 0, "upsertedId": null })
        );

        let value = serde_json::to_value(DeleteOutcome {
            acknowledged: true,
            deleted_count: 1,
        })
        .unwrap();
        assert_eq!(value["deletedCount"], 1);
    }
}
