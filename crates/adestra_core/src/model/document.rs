//! Top-level persisted document.
//!
//! # Invariants
//! - All four collections are always present (possibly empty).
//! - `meta.version` is carried through unchanged; nothing interprets it yet.

use super::client::Client;
use super::dog::Dog;
use super::lesson::Lesson;
use super::payment::Payment;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Collection keys a snapshot must carry, with the names older backups use.
pub const REQUIRED_COLLECTIONS: [(&str, &str); 4] = [
    ("clients", "clientes"),
    ("dogs", "caes"),
    ("lessons", "aulas"),
    ("payments", "pagamentos"),
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Meta {
    /// Application version that created the document.
    #[serde(deserialize_with = "crate::model::lenient::text")]
    pub version: String,
    #[serde(deserialize_with = "crate::model::lenient::or_default")]
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The whole record store as one serializable value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default, deserialize_with = "crate::model::lenient::or_default")]
    pub meta: Meta,
    #[serde(alias = "clientes")]
    pub clients: Vec<Client>,
    #[serde(alias = "caes")]
    pub dogs: Vec<Dog>,
    #[serde(alias = "aulas")]
    pub lessons: Vec<Lesson>,
    #[serde(alias = "pagamentos")]
    pub payments: Vec<Payment>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Document {
    /// Creates an empty document stamped with `version` and `created_at`.
    pub fn empty(version: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            meta: Meta {
                version: version.into(),
                created_at,
                extra: Map::new(),
            },
            clients: Vec::new(),
            dogs: Vec::new(),
            lessons: Vec::new(),
            payments: Vec::new(),
            extra: Map::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
            && self.dogs.is_empty()
            && self.lessons.is_empty()
            && self.payments.is_empty()
    }
}

/// Returns the required collections that `value` lacks (or holds as non-arrays).
///
/// Only the top-level shape is inspected; records are not looked at.
pub fn missing_collections(value: &Value) -> Vec<&'static str> {
    let Some(object) = value.as_object() else {
        return REQUIRED_COLLECTIONS.iter().map(|(name, _)| *name).collect();
    };

    REQUIRED_COLLECTIONS
        .iter()
        .filter(|(name, legacy)| {
            let present = object
                .get(*name)
                .or_else(|| object.get(*legacy))
                .is_some_and(Value::is_array);
            !present
        })
        .map(|(name, _)| *name)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{missing_collections, Document};
    use chrono::Utc;
    use serde_json::json;

    #[test]
    fn empty_document_serializes_all_collections() {
        let document = Document::empty("v1.0.0", Utc::now());
        let json = serde_json::to_value(&document).unwrap();
        for key in ["clients", "dogs", "lessons", "payments"] {
            assert_eq!(json[key], json!([]), "missing {key}");
        }
        assert_eq!(json["meta"]["version"], "v1.0.0");
        assert!(json["meta"]["createdAt"].is_string());
    }

    #[test]
    fn missing_collections_accepts_legacy_names() {
        let legacy = json!({"clientes": [], "caes": [], "aulas": [], "pagamentos": []});
        assert!(missing_collections(&legacy).is_empty());

        let partial = json!({"clientes": []});
        assert_eq!(
            missing_collections(&partial),
            vec!["dogs", "lessons", "payments"]
        );
    }

    #[test]
    fn non_array_collection_counts_as_missing() {
        let value = json!({"clients": null, "dogs": [], "lessons": {}, "payments": []});
        assert_eq!(missing_collections(&value), vec!["clients", "lessons"]);
        assert_eq!(missing_collections(&json!([])).len(), 4);
    }

    #[test]
    fn unknown_top_level_fields_survive_roundtrip() {
        let value = json!({
            "meta": {"version": "v1.0.0", "createdAt": "2024-01-01T00:00:00.000Z"},
            "clients": [], "dogs": [], "lessons": [], "payments": [],
            "settings": {"theme": "dark"}
        });
        let document: Document = serde_json::from_value(value).unwrap();
        assert_eq!(document.extra["settings"]["theme"], "dark");
        let back = serde_json::to_value(&document).unwrap();
        assert_eq!(back["settings"]["theme"], "dark");
    }
}
