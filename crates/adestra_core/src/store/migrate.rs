//! Document migration hook.
//!
//! Runs on every load and import. No schema change has shipped yet, so the
//! document is returned as-is; a version mismatch is only logged.

use crate::model::document::Document;
use log::debug;

pub fn migrate(document: Document, current_version: &str) -> Document {
    if document.meta.version != current_version {
        debug!(
            "event=store_migrate module=store status=noop from={} to={}",
            document.meta.version, current_version
        );
    }
    document
}
