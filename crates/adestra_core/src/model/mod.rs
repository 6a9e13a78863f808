//! Domain model for the training-business record store.
//!
//! # Responsibility
//! - Define the four record kinds (clients, dogs, lessons, payments) and the
//!   top-level document that holds them.
//! - Provide pure construction, merge and validation helpers per record.
//!
//! # Invariants
//! - Every record is identified by an opaque `RecordId` unique within its
//!   collection.
//! - Cross-record references (`client_id`, `dog_id`) are plain ids and are
//!   never enforced; dangling references are a valid state.
//! - Collections are unordered; display order is computed by `Record::display_cmp`.

pub mod client;
pub mod collation;
pub mod document;
pub mod dog;
pub mod id;
mod lenient;
pub mod lesson;
pub mod payment;
pub mod validation;

use chrono::{DateTime, Utc};
use document::Document;
use id::RecordId;
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use validation::ValidationError;

/// Discriminates the four record collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Client,
    Dog,
    Lesson,
    Payment,
}

impl EntityKind {
    /// Stable lowercase name used in log events and error messages.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Dog => "dog",
            Self::Lesson => "lesson",
            Self::Payment => "payment",
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Common contract implemented by every stored record kind.
///
/// The store is generic over this trait, so create/update/delete/query are
/// written once and the per-entity methods are thin wrappers.
pub trait Record: Clone {
    /// Caller-supplied fields for a new record.
    type New;
    /// Partial update: `Some` fields overwrite, `None` fields are retained.
    type Patch;
    /// Equality filters accepted by `Store::query`.
    type Filter;

    const KIND: EntityKind;

    /// Builds a record from submitted fields plus generated identity.
    fn build(new: Self::New, id: RecordId, created_at: DateTime<Utc>) -> Self;

    fn id(&self) -> &str;

    /// Presence checks for required fields.
    fn validate(&self) -> Result<(), ValidationError>;

    /// Returns a new record with `patch` shallow-merged over `self`.
    fn merge(&self, patch: &Self::Patch) -> Self;

    fn matches(&self, filter: &Self::Filter) -> bool;

    /// Natural display ordering (name for people/dogs, date for events).
    fn display_cmp(&self, other: &Self) -> Ordering;

    fn collection(document: &Document) -> &Vec<Self>;

    fn collection_mut(document: &mut Document) -> &mut Vec<Self>;
}

/// Shallow-merges `patch` over `existing` without touching either.
pub fn merge<R: Record>(existing: &R, patch: &R::Patch) -> R {
    existing.merge(patch)
}

/// Overwrites `target` when the patch carries a value for it.
pub(crate) fn apply<T: Clone>(target: &mut T, value: &Option<T>) {
    if let Some(value) = value {
        *target = value.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::EntityKind;

    #[test]
    fn entity_kind_names_are_stable() {
        assert_eq!(EntityKind::Client.as_str(), "client");
        assert_eq!(EntityKind::Payment.to_string(), "payment");
    }
}
