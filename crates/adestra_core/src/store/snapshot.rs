//! Backup export/import format.
//!
//! An exported snapshot is the pretty-printed document, structurally
//! identical to what is persisted. Import accepts any JSON object carrying
//! the four collections; records are not validated individually.

use super::error::{ImportError, StoreError, StoreResult};
use super::migrate::migrate;
use crate::model::document::{missing_collections, Document};
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;

const EXPORT_FILE_PREFIX: &str = "adestra-backup";

pub fn export_snapshot(document: &Document) -> StoreResult<String> {
    serde_json::to_string_pretty(document).map_err(StoreError::Serialize)
}

/// Parses and structurally checks a snapshot without touching any store.
pub fn parse_snapshot(blob: &str, current_version: &str) -> Result<Document, ImportError> {
    let value: Value = serde_json::from_str(blob).map_err(ImportError::Parse)?;

    let missing = missing_collections(&value);
    if !missing.is_empty() {
        return Err(ImportError::MissingCollections(missing));
    }

    let document = serde_json::from_value(value).map_err(ImportError::Parse)?;
    Ok(migrate(document, current_version))
}

/// Download name for a snapshot taken at `now`, e.g.
/// `adestra-backup-2024-01-10T12-00-00-000Z.json`.
pub fn export_file_name(now: DateTime<Utc>) -> String {
    let stamp = now
        .to_rfc3339_opts(SecondsFormat::Millis, true)
        .replace([':', '.'], "-");
    format!("{EXPORT_FILE_PREFIX}-{stamp}.json")
}

#[cfg(test)]
mod tests {
    use super::{export_file_name, parse_snapshot};
    use crate::store::error::ImportError;
    use chrono::{TimeZone, Utc};

    #[test]
    fn file_name_embeds_filesystem_safe_utc_stamp() {
        let now = Utc.with_ymd_and_hms(2024, 1, 10, 12, 30, 5).unwrap();
        assert_eq!(
            export_file_name(now),
            "adestra-backup-2024-01-10T12-30-05-000Z.json"
        );
    }

    #[test]
    fn garbage_is_a_parse_error() {
        let err = parse_snapshot("not json at all", "v1.0.0").unwrap_err();
        assert!(matches!(err, ImportError::Parse(_)));
    }

    #[test]
    fn partial_document_reports_missing_names() {
        let err = parse_snapshot(r#"{"clientes": []}"#, "v1.0.0").unwrap_err();
        match err {
            ImportError::MissingCollections(names) => {
                assert_eq!(names, vec!["dogs", "lessons", "payments"])
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn legacy_backup_is_accepted() {
        let blob = r#"{
            "meta": {"version": "v1.0.0", "createdAt": "2024-01-01T00:00:00.000Z"},
            "clientes": [{"id": "c1", "nome": "Ana", "telefone": "", "email": "", "obs": "",
                          "createdAt": "2024-01-01T00:00:00.000Z"}],
            "caes": [], "aulas": [], "pagamentos": []
        }"#;
        let document = parse_snapshot(blob, "v1.0.0").unwrap();
        assert_eq!(document.clients.len(), 1);
        assert_eq!(document.clients[0].name, "Ana");
    }
}
