//! Dog record, owned by a client through `client_id`.

use super::collation::compare_names;
use super::document::Document;
use super::id::RecordId;
use super::validation::{require_text, ValidationError};
use super::{apply, EntityKind, Record};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::cmp::Ordering;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Dog {
    #[serde(deserialize_with = "crate::model::lenient::text")]
    pub id: RecordId,
    #[serde(alias = "nome", deserialize_with = "crate::model::lenient::text")]
    pub name: String,
    #[serde(alias = "raca", deserialize_with = "crate::model::lenient::text")]
    pub breed: String,
    /// Age in years; `0` when unknown.
    #[serde(alias = "idade", with = "crate::model::lenient::number")]
    pub age: f64,
    #[serde(alias = "clienteId", deserialize_with = "crate::model::lenient::text")]
    pub client_id: RecordId,
    #[serde(alias = "obs", deserialize_with = "crate::model::lenient::text")]
    pub notes: String,
    #[serde(deserialize_with = "crate::model::lenient::or_default")]
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewDog {
    pub name: String,
    pub breed: String,
    pub age: f64,
    pub client_id: RecordId,
    pub notes: String,
}

impl NewDog {
    pub fn owned_by(name: impl Into<String>, client_id: impl Into<RecordId>) -> Self {
        Self {
            name: name.into(),
            client_id: client_id.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DogPatch {
    pub name: Option<String>,
    pub breed: Option<String>,
    pub age: Option<f64>,
    pub client_id: Option<RecordId>,
    pub notes: Option<String>,
}

/// Equality filters for dog listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DogFilter {
    pub client_id: Option<RecordId>,
}

impl DogFilter {
    pub fn for_client(client_id: impl Into<RecordId>) -> Self {
        Self {
            client_id: Some(client_id.into()),
        }
    }
}

impl Record for Dog {
    type New = NewDog;
    type Patch = DogPatch;
    type Filter = DogFilter;

    const KIND: EntityKind = EntityKind::Dog;

    fn build(new: NewDog, id: RecordId, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: new.name.trim().to_string(),
            breed: new.breed.trim().to_string(),
            age: new.age,
            client_id: new.client_id,
            notes: new.notes.trim().to_string(),
            created_at,
            extra: Map::new(),
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text(Self::KIND, "name", &self.name)?;
        require_text(Self::KIND, "clientId", &self.client_id)
    }

    fn merge(&self, patch: &DogPatch) -> Self {
        let mut merged = self.clone();
        apply(&mut merged.name, &patch.name);
        apply(&mut merged.breed, &patch.breed);
        apply(&mut merged.age, &patch.age);
        apply(&mut merged.client_id, &patch.client_id);
        apply(&mut merged.notes, &patch.notes);
        merged
    }

    fn matches(&self, filter: &DogFilter) -> bool {
        filter
            .client_id
            .as_deref()
            .map_or(true, |client_id| self.client_id == client_id)
    }

    fn display_cmp(&self, other: &Self) -> Ordering {
        compare_names(&self.name, &other.name)
    }

    fn collection(document: &Document) -> &Vec<Self> {
        &document.dogs
    }

    fn collection_mut(document: &mut Document) -> &mut Vec<Self> {
        &mut document.dogs
    }
}
