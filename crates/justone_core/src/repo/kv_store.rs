//! Key-value namespace contract and SQLite implementation.
//!
//! # Responsibility
//! - Map string keys to JSON text blobs with get/set/remove semantics.
//! - Classify failures into read-side and write-side store errors.
//!
//! # Invariants
//! - Every `set_item`/`remove_item` call is all-or-nothing: a failed call
//!   leaves the previously committed value authoritative.
//! - Values are opaque text here; JSON decoding happens in `read_json`.

use crate::db::DbError;
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Error raised by key-value backed stores.
#[derive(Debug)]
pub enum StoreError {
    /// Persisted payload under `key` could not be read or parsed.
    Read { key: String, cause: StoreFailure },
    /// Persisting a new value under `key` failed.
    Write { key: String, cause: StoreFailure },
}

/// Underlying reason for a [`StoreError`].
#[derive(Debug)]
pub enum StoreFailure {
    Db(DbError),
    Json(serde_json::Error),
}

impl StoreError {
    pub fn read(key: &str, cause: impl Into<StoreFailure>) -> Self {
        Self::Read {
            key: key.to_string(),
            cause: cause.into(),
        }
    }

    pub fn write(key: &str, cause: impl Into<StoreFailure>) -> Self {
        Self::Write {
            key: key.to_string(),
            cause: cause.into(),
        }
    }

    /// Key whose read or write failed.
    pub fn key(&self) -> &str {
        match self {
            Self::Read { key, .. } | Self::Write { key, .. } => key,
        }
    }

    /// Stable machine-readable code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Read { .. } => "storage_read_failed",
            Self::Write { .. } => "storage_write_failed",
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { key, cause } => write!(f, "failed to read `{key}`: {cause}"),
            Self::Write { key, cause } => write!(f, "failed to write `{key}`: {cause}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read { cause, .. } | Self::Write { cause, .. } => Some(cause),
        }
    }
}

impl Display for StoreFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Json(err) => write!(f, "invalid JSON payload: {err}"),
        }
    }
}

impl Error for StoreFailure {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Json(err) => Some(err),
        }
    }
}

impl From<DbError> for StoreFailure {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreFailure {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for StoreFailure {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// String-keyed persistent namespace holding JSON text values.
pub trait KeyValueStore {
    /// Returns the raw value for `key`, or `None` when the key is absent.
    fn get_item(&self, key: &str) -> StoreResult<Option<String>>;
    /// Inserts or replaces the value for `key`.
    fn set_item(&self, key: &str, value: &str) -> StoreResult<()>;
    /// Removes `key`. Removing an absent key succeeds.
    fn remove_item(&self, key: &str) -> StoreResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> StoreResult<()> {
        (**self).remove_item(key)
    }
}

/// SQLite-backed key-value namespace over the `kv_items` table.
#[derive(Clone, Copy)]
pub struct SqliteKeyValueStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKeyValueStore<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl KeyValueStore for SqliteKeyValueStore<'_> {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        self.conn
            .query_row(
                "SELECT value FROM kv_items WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()
            .map_err(|err| StoreError::read(key, err))
    }

    fn set_item(&self, key: &str, value: &str) -> StoreResult<()> {
        self.conn
            .execute(
                "INSERT INTO kv_items (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET
                    value = excluded.value,
                    updated_at = (strftime('%s', 'now') * 1000);",
                params![key, value],
            )
            .map_err(|err| StoreError::write(key, err))?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> StoreResult<()> {
        self.conn
            .execute("DELETE FROM kv_items WHERE key = ?1;", [key])
            .map_err(|err| StoreError::write(key, err))?;
        Ok(())
    }
}

/// Reads and decodes the JSON value under `key`.
///
/// Returns `Ok(None)` when the key is absent. A present but undecodable
/// payload is a read error, never silently replaced by a default.
pub fn read_json<T: DeserializeOwned>(
    store: &impl KeyValueStore,
    key: &str,
) -> StoreResult<Option<T>> {
    match store.get_item(key)? {
        Some(raw) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|err| StoreError::read(key, err)),
        None => Ok(None),
    }
}

/// Encodes `value` as JSON and stores it under `key`.
pub fn write_json<T: Serialize + ?Sized>(
    store: &impl KeyValueStore,
    key: &str,
    value: &T,
) -> StoreResult<()> {
    let raw = serde_json::to_string(value).map_err(|err| StoreError::write(key, err))?;
    store.set_item(key, &raw)
}

#[cfg(test)]
mod tests {
    use super::{read_json, write_json, KeyValueStore, SqliteKeyValueStore, StoreError};
    use crate::db::open_db_in_memory;

    #[test]
    fn missing_key_reads_as_none() {
        let conn = open_db_in_memory().unwrap();
        let store = SqliteKeyValueStore::new(&conn);
        assert_eq!(store.get_item("absent").unwrap(), None);
    }

    #[test]
    fn set_replaces_existing_value() {
        let conn = open_db_in_memory().unwrap();
        let store = SqliteKeyValueStore::new(&conn);

        store.set_item("devMode", "false").unwrap();
        store.set_item("devMode", "true").unwrap();

        assert_eq!(store.get_item("devMode").unwrap().as_deref(), Some("true"));
    }

    #[test]
    fn remove_is_idempotent() {
        let conn = open_db_in_memory().unwrap();
        let store = SqliteKeyValueStore::new(&conn);

        store.set_item("entries", "[]").unwrap();
        store.remove_item("entries").unwrap();
        store.remove_item("entries").unwrap();

        assert_eq!(store.get_item("entries").unwrap(), None);
    }

    #[test]
    fn read_json_reports_corrupt_payload_as_read_error() {
        let conn = open_db_in_memory().unwrap();
        let store = SqliteKeyValueStore::new(&conn);
        store.set_item("devMode", "{not json").unwrap();

        let err = read_json::<bool>(&store, "devMode").unwrap_err();
        assert!(matches!(err, StoreError::Read { ref key, .. } if key == "devMode"));
        assert_eq!(err.code(), "storage_read_failed");
    }

    #[test]
    fn write_json_stores_plain_json_text() {
        let conn = open_db_in_memory().unwrap();
        let store = SqliteKeyValueStore::new(&conn);

        write_json(&store, "showDeleteButtons", &false).unwrap();

        assert_eq!(
            store.get_item("showDeleteButtons").unwrap().as_deref(),
            Some("false")
        );
        assert_eq!(read_json::<bool>(&store, "showDeleteButtons").unwrap(), Some(false));
    }
}
