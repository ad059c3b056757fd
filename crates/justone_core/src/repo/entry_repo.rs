//! Entry store over the `entries` key.
//!
//! # Responsibility
//! - Load, append, delete and reset the serialized entry collection.
//!
//! # Invariants
//! - Every mutation is one read-modify-write of the `entries` key; there is
//!   no locking, so callers must not run two writers at once.
//! - `load_all` returns newest first; ties keep persisted order.
//! - The store never validates entry content.

use crate::model::entry::Entry;
use crate::repo::kv_store::{read_json, write_json, KeyValueStore, StoreResult};

/// Storage key holding the JSON array of entries.
pub const ENTRIES_KEY: &str = "entries";

/// Persisted journal entries.
pub struct EntryStore<S> {
    kv: S,
}

impl<S: KeyValueStore> EntryStore<S> {
    pub fn new(kv: S) -> Self {
        Self { kv }
    }

    /// Returns all entries sorted by `date` descending.
    ///
    /// # Errors
    /// - `StoreError::Read` when the payload is not a valid entry array.
    pub fn load_all(&self) -> StoreResult<Vec<Entry>> {
        let mut entries = self.load_persisted()?;
        entries.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(entries)
    }

    /// Appends `entry` to the persisted collection.
    pub fn append(&self, entry: Entry) -> StoreResult<()> {
        let mut entries = self.load_persisted()?;
        entries.push(entry);
        write_json(&self.kv, ENTRIES_KEY, &entries)
    }

    /// Removes every entry whose key equals `date` and returns how many were
    /// removed. Nothing is written when no entry matches.
    pub fn delete_by_date(&self, date: &str) -> StoreResult<usize> {
        let mut entries = self.load_persisted()?;
        let before = entries.len();
        entries.retain(|entry| entry.date() != date);
        let removed = before - entries.len();
        if removed > 0 {
            write_json(&self.kv, ENTRIES_KEY, &entries)?;
        }
        Ok(removed)
    }

    /// Drops the whole collection.
    pub fn reset_all(&self) -> StoreResult<()> {
        self.kv.remove_item(ENTRIES_KEY)
    }

    fn load_persisted(&self) -> StoreResult<Vec<Entry>> {
        Ok(read_json::<Vec<Entry>>(&self.kv, ENTRIES_KEY)?.unwrap_or_default())
    }
}
