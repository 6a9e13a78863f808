//! Document store: the single source of truth for all records.
//!
//! # Responsibility
//! - Own the in-memory document and the backend it is persisted to.
//! - Provide create/update/delete/query over the four collections.
//! - Import and export whole-document snapshots.
//!
//! # Invariants
//! - Every successful mutation persists the whole document before returning.
//! - A failed mutation (validation or storage) leaves the in-memory document
//!   exactly as it was.
//! - Deletes never cascade; references to a removed record stay dangling.
//! - Query results are ordered by `Record::display_cmp`; stored order is
//!   insertion order and carries no meaning.

mod entities;
mod error;
mod migrate;
mod persist;
mod snapshot;

pub use entities::ClientSummary;
pub use error::{ImportError, StoreError, StoreResult};
pub use migrate::migrate;
pub use persist::{load_document, save_document, LoadOutcome};
pub use snapshot::{export_file_name, export_snapshot, parse_snapshot};

use crate::config::StoreConfig;
use crate::model::document::Document;
use crate::model::id::generate_id;
use crate::model::Record;
use crate::storage::KeyValueStorage;
use chrono::Utc;
use log::{debug, info, warn};

/// Owned document store over a key-value backend.
pub struct Store<S: KeyValueStorage> {
    storage: S,
    config: StoreConfig,
    document: Document,
    load_outcome: LoadOutcome,
}

impl<S: KeyValueStorage> Store<S> {
    /// Loads the store from `storage` using the default configuration.
    pub fn open(storage: S) -> StoreResult<Self> {
        Self::open_with_config(storage, StoreConfig::default())
    }

    /// Loads the store, recovering from a missing or corrupt blob.
    ///
    /// Inspect `load_outcome()` to learn whether recovery happened.
    pub fn open_with_config(mut storage: S, config: StoreConfig) -> StoreResult<Self> {
        let (document, load_outcome) = load_document(&mut storage, &config)?;
        Ok(Self {
            storage,
            config,
            document,
            load_outcome,
        })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn load_outcome(&self) -> &LoadOutcome {
        &self.load_outcome
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Persists the current document, overwriting the stored blob.
    pub fn save(&mut self) -> StoreResult<()> {
        save_document(&mut self.storage, &self.config.storage_key, &self.document)
    }

    /// Validates and appends a new record with a fresh id and timestamp.
    pub fn create<R: Record>(&mut self, new: R::New) -> StoreResult<R> {
        let record = R::build(new, generate_id(), Utc::now());
        if let Err(err) = record.validate() {
            warn!(
                "event=record_create module=store status=rejected entity={} field={}",
                R::KIND,
                err.field
            );
            return Err(err.into());
        }

        R::collection_mut(&mut self.document).push(record.clone());
        if let Err(err) = self.save() {
            R::collection_mut(&mut self.document).pop();
            return Err(err);
        }

        info!(
            "event=record_create module=store status=ok entity={} id={}",
            R::KIND,
            record.id()
        );
        Ok(record)
    }

    /// Shallow-merges `patch` into the record with `id`.
    ///
    /// Returns `Ok(None)` without persisting when no such record exists.
    pub fn update<R: Record>(&mut self, id: &str, patch: &R::Patch) -> StoreResult<Option<R>> {
        let Some(index) = self.position::<R>(id) else {
            debug!(
                "event=record_update module=store status=not_found entity={} id={id}",
                R::KIND
            );
            return Ok(None);
        };

        let merged = R::collection(&self.document)[index].merge(patch);
        if let Err(err) = merged.validate() {
            warn!(
                "event=record_update module=store status=rejected entity={} field={}",
                R::KIND,
                err.field
            );
            return Err(err.into());
        }

        let previous = std::mem::replace(
            &mut R::collection_mut(&mut self.document)[index],
            merged.clone(),
        );
        if let Err(err) = self.save() {
            R::collection_mut(&mut self.document)[index] = previous;
            return Err(err);
        }

        info!(
            "event=record_update module=store status=ok entity={} id={id}",
            R::KIND
        );
        Ok(Some(merged))
    }

    /// Removes the record with `id`; other collections are left untouched.
    ///
    /// Returns whether a record was removed.
    pub fn delete<R: Record>(&mut self, id: &str) -> StoreResult<bool> {
        let Some(index) = self.position::<R>(id) else {
            debug!(
                "event=record_delete module=store status=not_found entity={} id={id}",
                R::KIND
            );
            return Ok(false);
        };

        let removed = R::collection_mut(&mut self.document).remove(index);
        if let Err(err) = self.save() {
            R::collection_mut(&mut self.document).insert(index, removed);
            return Err(err);
        }

        info!(
            "event=record_delete module=store status=ok entity={} id={id}",
            R::KIND
        );
        Ok(true)
    }

    pub fn get<R: Record>(&self, id: &str) -> Option<&R> {
        R::collection(&self.document)
            .iter()
            .find(|record| record.id() == id)
    }

    /// Returns records matching `filter`, in display order.
    pub fn query<R: Record>(&self, filter: &R::Filter) -> Vec<&R> {
        let mut records: Vec<&R> = R::collection(&self.document)
            .iter()
            .filter(|record| record.matches(filter))
            .collect();
        records.sort_by(|a, b| a.display_cmp(b));
        records
    }

    pub fn export_snapshot(&self) -> StoreResult<String> {
        export_snapshot(&self.document)
    }

    /// Replaces the whole document with a parsed snapshot and persists it.
    ///
    /// On any failure the current document is kept unchanged.
    pub fn import_snapshot(&mut self, blob: &str) -> StoreResult<()> {
        let incoming = match parse_snapshot(blob, &self.config.app_version) {
            Ok(document) => document,
            Err(err) => {
                warn!("event=snapshot_import module=store status=rejected error={err}");
                return Err(err.into());
            }
        };

        let previous = std::mem::replace(&mut self.document, incoming);
        if let Err(err) = self.save() {
            self.document = previous;
            return Err(err);
        }

        info!(
            "event=snapshot_import module=store status=ok clients={} dogs={} lessons={} payments={}",
            self.document.clients.len(),
            self.document.dogs.len(),
            self.document.lessons.len(),
            self.document.payments.len()
        );
        Ok(())
    }

    fn position<R: Record>(&self, id: &str) -> Option<usize> {
        R::collection(&self.document)
            .iter()
            .position(|record| record.id() == id)
    }
}
