//! Client record.
//!
//! # Invariants
//! - `name` is required and non-blank.
//! - Deleting a client never touches the dogs, lessons or payments that
//!   reference it.

use super::collation::compare_names;
use super::document::Document;
use super::id::RecordId;
use super::validation::{require_text, ValidationError};
use super::{apply, EntityKind, Record};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::cmp::Ordering;

/// A customer of the training business.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Client {
    #[serde(deserialize_with = "crate::model::lenient::text")]
    pub id: RecordId,
    #[serde(alias = "nome", deserialize_with = "crate::model::lenient::text")]
    pub name: String,
    #[serde(alias = "telefone", deserialize_with = "crate::model::lenient::text")]
    pub phone: String,
    #[serde(deserialize_with = "crate::model::lenient::text")]
    pub email: String,
    #[serde(alias = "obs", deserialize_with = "crate::model::lenient::text")]
    pub notes: String,
    #[serde(deserialize_with = "crate::model::lenient::or_default")]
    pub created_at: DateTime<Utc>,
    /// Fields written by other versions, carried through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Submitted fields for a new client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewClient {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub notes: String,
}

impl NewClient {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientPatch {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub notes: Option<String>,
}

impl Record for Client {
    type New = NewClient;
    type Patch = ClientPatch;
    type Filter = ();

    const KIND: EntityKind = EntityKind::Client;

    fn build(new: NewClient, id: RecordId, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: new.name.trim().to_string(),
            phone: new.phone.trim().to_string(),
            email: new.email.trim().to_string(),
            notes: new.notes.trim().to_string(),
            created_at,
            extra: Map::new(),
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text(Self::KIND, "name", &self.name)
    }

    fn merge(&self, patch: &ClientPatch) -> Self {
        let mut merged = self.clone();
        apply(&mut merged.name, &patch.name);
        apply(&mut merged.phone, &patch.phone);
        apply(&mut merged.email, &patch.email);
        apply(&mut merged.notes, &patch.notes);
        merged
    }

    fn matches(&self, _filter: &()) -> bool {
        true
    }

    fn display_cmp(&self, other: &Self) -> Ordering {
        compare_names(&self.name, &other.name)
    }

    fn collection(document: &Document) -> &Vec<Self> {
        &document.clients
    }

    fn collection_mut(document: &mut Document) -> &mut Vec<Self> {
        &mut document.clients
    }
}
