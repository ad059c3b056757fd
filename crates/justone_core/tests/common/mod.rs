use justone_core::{KeyValueStore, SqliteKeyValueStore, StoreError, StoreResult};
use rusqlite::Connection;
use std::cell::Cell;

/// SQLite store whose writes can be switched off.
pub struct FlakyStore<'conn> {
    inner: SqliteKeyValueStore<'conn>,
    pub fail_writes: Cell<bool>,
}

impl<'conn> FlakyStore<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self {
            inner: SqliteKeyValueStore::new(conn),
            fail_writes: Cell::new(false),
        }
    }

    fn refuse(&self, key: &str) -> StoreResult<()> {
        let err = rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_FULL),
            Some("disk full".to_string()),
        );
        Err(StoreError::write(key, err))
    }
}

impl KeyValueStore for FlakyStore<'_> {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        self.inner.get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> StoreResult<()> {
        if self.fail_writes.get() {
            return self.refuse(key);
        }
        self.inner.set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> StoreResult<()> {
        if self.fail_writes.get() {
            return self.refuse(key);
        }
        self.inner.remove_item(key)
    }
}
