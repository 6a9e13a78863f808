//! Whole-document load/save against a key-value backend.
//!
//! # Invariants
//! - A missing or unparseable blob is replaced by a fresh empty document that
//!   is persisted before `load_document` returns.
//! - A blob that parses as a document is never discarded, whatever its field
//!   types; odd scalars fall back to defaults.
//! - Corruption never surfaces as an error; it is reported through
//!   `LoadOutcome::Recovered` and an error-level log event.
//! - A backend read failure is returned as an error and nothing is written.
//! - `save_document` performs exactly one `set` call.

use super::error::{StoreError, StoreResult};
use super::migrate::migrate;
use crate::config::StoreConfig;
use crate::model::document::Document;
use crate::storage::KeyValueStorage;
use chrono::Utc;
use log::{debug, error, info};

/// How the in-memory document was obtained on open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A persisted document was read and parsed.
    Loaded,
    /// Nothing was persisted yet; an empty document was created.
    Initialized,
    /// The persisted blob could not be parsed and was discarded.
    Recovered { reason: String },
}

impl LoadOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Loaded => "loaded",
            Self::Initialized => "initialized",
            Self::Recovered { .. } => "recovered",
        }
    }
}

/// Reads the document stored under `config.storage_key`.
///
/// # Errors
/// - The backend read fails; the stored blob is left untouched.
/// - Persisting the replacement document fails.
pub fn load_document<S: KeyValueStorage>(
    storage: &mut S,
    config: &StoreConfig,
) -> StoreResult<(Document, LoadOutcome)> {
    let raw = storage.get(&config.storage_key).map_err(|err| {
        error!("event=store_load module=store status=error reason=read_failed error={err}");
        StoreError::from(err)
    })?;

    let Some(raw) = raw else {
        info!("event=store_load module=store status=initialized");
        return reinitialize(storage, config, LoadOutcome::Initialized);
    };

    match serde_json::from_str::<Document>(&raw) {
        Ok(document) => {
            info!(
                "event=store_load module=store status=ok clients={} dogs={} lessons={} payments={}",
                document.clients.len(),
                document.dogs.len(),
                document.lessons.len(),
                document.payments.len()
            );
            Ok((migrate(document, &config.app_version), LoadOutcome::Loaded))
        }
        Err(err) => {
            error!(
                "event=store_load module=store status=recovered reason=parse_failed bytes={} error={err}",
                raw.len()
            );
            let outcome = LoadOutcome::Recovered {
                reason: err.to_string(),
            };
            reinitialize(storage, config, outcome)
        }
    }
}

/// Serializes `document` and overwrites the blob stored under `key`.
pub fn save_document<S: KeyValueStorage>(
    storage: &mut S,
    key: &str,
    document: &Document,
) -> StoreResult<()> {
    let blob = serde_json::to_string(document).map_err(StoreError::Serialize)?;
    if let Err(err) = storage.set(key, &blob) {
        error!("event=store_save module=store status=error error={err}");
        return Err(err.into());
    }
    debug!("event=store_save module=store status=ok bytes={}", blob.len());
    Ok(())
}

fn reinitialize<S: KeyValueStorage>(
    storage: &mut S,
    config: &StoreConfig,
    outcome: LoadOutcome,
) -> StoreResult<(Document, LoadOutcome)> {
    let document = Document::empty(config.app_version.as_str(), Utc::now());
    save_document(storage, &config.storage_key, &document)?;
    Ok((document, outcome))
}
