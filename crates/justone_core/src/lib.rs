//! Core logic for the JustOne daily journal.
//! Owns the entry store, the daily gate and the settings flags.

pub mod db;
pub mod gate;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use gate::{can_add_at, can_add_today};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::entry::{format_display_date, Entry, EntryKind, EntryValidationError};
pub use model::settings::{ImagePickerOptions, SettingFlag, Settings};
pub use repo::entry_repo::{EntryStore, ENTRIES_KEY};
pub use repo::kv_store::{
    KeyValueStore, SqliteKeyValueStore, StoreError, StoreFailure, StoreResult,
};
pub use repo::settings_repo::SettingsStore;
pub use service::journal_service::{
    EntryDraft, EntryListView, JournalService, JournalServiceError, ServiceResult,
    EMPTY_STATE_TAGLINE,
};

/// Minimal health-check API for host integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
