//! Lesson record: one training session for a client's dog.
//!
//! # Invariants
//! - `date` is an ISO calendar date (`YYYY-MM-DD`); lexical order of the
//!   string is chronological order.
//! - `client_id` and `dog_id` are required but not checked against the
//!   referenced collections.

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
pub struct Lesson {
    #[serde(deserialize_with = "crate::model::lenient::text")]
    pub id: RecordId,
    #[serde(alias = "data", deserialize_with = "crate::model::lenient::text")]
    pub date: String,
    #[serde(alias = "duracao", with = "crate::model::lenient::number")]
    pub duration_minutes: f64,
    #[serde(alias = "clienteId", deserialize_with = "crate::model::lenient::text")]
    pub client_id: RecordId,
    #[serde(alias = "caoId", deserialize_with = "crate::model::lenient::text")]
    pub dog_id: RecordId,
    #[serde(alias = "obs", deserialize_with = "crate::model::lenient::text")]
    pub notes: String,
    #[serde(deserialize_with = "crate::model::lenient::or_default")]
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewLesson {
    pub date: String,
    pub duration_minutes: f64,
    pub client_id: RecordId,
    pub dog_id: RecordId,
    pub notes: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LessonPatch {
    pub date: Option<String>,
    pub duration_minutes: Option<f64>,
    pub client_id: Option<RecordId>,
    pub dog_id: Option<RecordId>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LessonFilter {
    pub client_id: Option<RecordId>,
    pub dog_id: Option<RecordId>,
}

impl LessonFilter {
    pub fn for_client(client_id: impl Into<RecordId>) -> Self {
        Self {
            client_id: Some(client_id.into()),
            dog_id: None,
        }
    }
}

impl Record for Lesson {
    type New = NewLesson;
    type Patch = LessonPatch;
    type Filter = LessonFilter;

    const KIND: EntityKind = EntityKind::Lesson;

    fn build(new: NewLesson, id: RecordId, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            date: new.date.trim().to_string(),
            duration_minutes: new.duration_minutes,
            client_id: new.client_id,
            dog_id: new.dog_id,
            notes: new.notes.trim().to_string(),
            created_at,
            extra: Map::new(),
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text(Self::KIND, "date", &self.date)?;
        require_text(Self::KIND, "clientId", &self.client_id)?;
        require_text(Self::KIND, "dogId", &self.dog_id)
    }

    fn merge(&self, patch: &LessonPatch) -> Self {
        let mut merged = self.clone();
        apply(&mut merged.date, &patch.date);
        apply(&mut merged.duration_minutes, &patch.duration_minutes);
        apply(&mut merged.client_id, &patch.client_id);
        apply(&mut merged.dog_id, &patch.dog_id);
        apply(&mut merged.notes, &patch.notes);
        merged
    }

    fn matches(&self, filter: &LessonFilter) -> bool {
        let client_ok = filter
            .client_id
            .as_deref()
            .map_or(true, |client_id| self.client_id == client_id);
        let dog_ok = filter
            .dog_id
            .as_deref()
            .map_or(true, |dog_id| self.dog_id == dog_id);
        client_ok && dog_ok
    }

    fn display_cmp(&self, other: &Self) -> Ordering {
        self.date.cmp(&other.date)
    }

    fn collection(document: &Document) -> &Vec<Self> {
        &document.lessons
    }

    fn collection_mut(document: &mut Document) -> &mut Vec<Self> {
        &mut document.lessons
    }
}

#[cfg(test)]
mod tests {
    use super::{Lesson, LessonFilter, NewLesson};
    use crate::model::Record;
    use chrono::Utc;

    fn lesson(client_id: &str, dog_id: &str) -> Lesson {
        Lesson::build(
            NewLesson {
                date: "2024-01-10".to_string(),
                duration_minutes: 60.0,
                client_id: client_id.to_string(),
                dog_id: dog_id.to_string(),
                notes: String::new(),
            },
            "l1".to_string(),
            Utc::now(),
        )
    }

    #[test]
    fn filters_combine_with_and() {
        let item = lesson("c1", "d1");
        let both = LessonFilter {
            client_id: Some("c1".to_string()),
            dog_id: Some("d1".to_string()),
        };
        let wrong_dog = LessonFilter {
            client_id: Some("c1".to_string()),
            dog_id: Some("d2".to_string()),
        };
        assert!(item.matches(&both));
        assert!(!item.matches(&wrong_dog));
    }

    #[test]
    fn missing_dog_fails_validation() {
        let err = lesson("c1", "").validate().unwrap_err();
        assert_eq!(err.field, "dogId");
    }
}
