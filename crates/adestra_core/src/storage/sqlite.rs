//! SQLite-backed key-value storage.
//!
//! # Invariants
//! - Constructed only over connections whose schema matches this binary.
//! - Each `set` is one upsert statement, atomic per key.

use super::{ensure_valid_key, KeyValueStorage, StorageError, StorageResult};
use crate::db::migrations::{current_version, latest_version};
use rusqlite::{params, Connection, OptionalExtension};

const KV_TABLE: &str = "kv";

pub struct SqliteStorage<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteStorage<'conn> {
    /// Wraps a connection opened through `db::open_db` / `db::open_db_in_memory`.
    ///
    /// # Errors
    /// - `UninitializedSchema` when migrations were not applied.
    /// - `MissingRequiredTable` when the version matches but `kv` is absent.
    pub fn try_new(conn: &'conn Connection) -> StorageResult<Self> {
        let expected_version = latest_version();
        let actual_version = current_version(conn)?;
        if actual_version != expected_version {
            return Err(StorageError::UninitializedSchema {
                expected_version,
                actual_version,
            });
        }

        let table_exists: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1);",
            [KV_TABLE],
            |row| row.get(0),
        )?;
        if !table_exists {
            return Err(StorageError::MissingRequiredTable(KV_TABLE));
        }

        Ok(Self { conn })
    }
}

impl KeyValueStorage for SqliteStorage<'_> {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        ensure_valid_key(key)?;
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1;", [key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        ensure_valid_key(key)?;
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::SqliteStorage;
    use crate::db::migrations::latest_version;
    use crate::db::open_db_in_memory;
    use crate::storage::{KeyValueStorage, StorageError};
    use rusqlite::Connection;

    #[test]
    fn get_set_roundtrip_overwrites() {
        let conn = open_db_in_memory().unwrap();
        let mut storage = SqliteStorage::try_new(&conn).unwrap();

        assert_eq!(storage.get("ma_store_v1").unwrap(), None);
        storage.set("ma_store_v1", "{\"a\":1}").unwrap();
        storage.set("ma_store_v1", "{\"a\":2}").unwrap();
        assert_eq!(
            storage.get("ma_store_v1").unwrap().as_deref(),
            Some("{\"a\":2}")
        );

        let rows: i64 = conn
            .query_row("SELECT COUNT(*) FROM kv;", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[test]
    fn rejects_unmigrated_connection() {
        let conn = Connection::open_in_memory().unwrap();
        match SqliteStorage::try_new(&conn) {
            Err(StorageError::UninitializedSchema {
                expected_version,
                actual_version: 0,
            }) => assert_eq!(expected_version, latest_version()),
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("expected uninitialized schema error"),
        }
    }

    #[test]
    fn rejects_connection_without_kv_table() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
            .unwrap();
        assert!(matches!(
            SqliteStorage::try_new(&conn),
            Err(StorageError::MissingRequiredTable("kv"))
        ));
    }
}
