//! FFI use-case API for the mobile screens.
//!
//! # Responsibility
//! - Expose list, composer and settings operations to Dart via FRB.
//! - Turn core errors into user-facing messages.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Every call opens the database fresh; no state is cached between calls
//!   except the resolved database path.

use justone_core::db::open_db;
use justone_core::{
    core_version as core_version_inner, default_log_level as default_log_level_inner,
    init_logging as init_logging_inner, ping as ping_inner,
    Entry, EntryDraft, EntryListView, ImagePickerOptions, JournalService, JournalServiceError,
    SettingFlag, Settings, SqliteKeyValueStore, EMPTY_STATE_TAGLINE,
};
use log::warn;
use std::path::PathBuf;
use std::sync::OnceLock;

const DB_PATH_ENV: &str = "JUSTONE_DB_PATH";
const DB_FILE_NAME: &str = "justone.sqlite3";
static DB_PATH: OnceLock<PathBuf> = OnceLock::new();

const EMPTY_ENTRY_MESSAGE: &str = "Please write something or select an image.";
const ENTRY_EXISTS_MESSAGE: &str =
    "You can only add one entry per day. Disable Developer Mode in settings to add more.";
const SAVE_FAILED_MESSAGE: &str = "Failed to save your entry. Please try again.";
const LOAD_FAILED_MESSAGE: &str = "Failed to load your entries.";
const DELETE_FAILED_MESSAGE: &str = "Failed to delete entry.";
const RESET_DONE_MESSAGE: &str = "All entries have been deleted.";
const RESET_FAILED_MESSAGE: &str = "Failed to delete entries.";
const SETTINGS_FAILED_MESSAGE: &str = "Failed to update settings.";
const SETTINGS_LOAD_FAILED_MESSAGE: &str = "Failed to load settings.";

/// Health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never panics; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Core crate version.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never panics; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes core logging once per process.
///
/// # FFI contract
/// - Sync call; may create the log directory.
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Reconfiguration with a different level or directory returns an error.
/// - Never panics; returns an empty string on success and the error message
///   otherwise.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Level the host should pass to `init_logging` when it has no preference.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never panics; returns `debug` for debug builds and `info` otherwise.
#[flutter_rust_bridge::frb(sync)]
pub fn default_log_level() -> String {
    default_log_level_inner().to_owned()
}

/// One row of the entry list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryItem {
    /// Entry key; pass back to `entry_delete`.
    pub date: String,
    /// Long local date, e.g. `January 1, 2024`.
    pub display_date: String,
    /// `text|image|imageAndText`.
    pub kind: String,
    pub text: String,
    pub image_uri: Option<String>,
}

/// List screen state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryListResponse {
    pub ok: bool,
    pub message: String,
    /// Newest first.
    pub items: Vec<EntryItem>,
    pub can_add_entry: bool,
    pub show_delete_buttons: bool,
    /// Set when there are no entries to show.
    pub empty_state: Option<String>,
}

impl EntryListResponse {
    fn from_view(view: EntryListView) -> Self {
        let empty_state = view.is_empty().then(|| EMPTY_STATE_TAGLINE.to_string());
        Self {
            ok: true,
            message: String::new(),
            items: view.entries.iter().map(to_entry_item).collect(),
            can_add_entry: view.can_add_entry,
            show_delete_buttons: view.show_delete_buttons,
            empty_state,
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
            items: Vec::new(),
            can_add_entry: false,
            show_delete_buttons: false,
            empty_state: None,
        }
    }
}

/// Result of a composer or reset action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryActionResponse {
    pub ok: bool,
    /// Key of the saved entry, when one was created.
    pub entry_date: Option<String>,
    pub message: String,
}

impl EntryActionResponse {
    fn success(message: impl Into<String>, entry_date: Option<String>) -> Self {
        Self {
            ok: true,
            entry_date,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            entry_date: None,
            message: message.into(),
        }
    }
}

/// Settings screen state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsResponse {
    pub ok: bool,
    pub message: String,
    pub dev_mode: bool,
    pub show_delete_buttons: bool,
    pub allow_image_editing: bool,
}

impl SettingsResponse {
    fn from_settings(settings: Settings) -> Self {
        Self {
            ok: true,
            message: String::new(),
            dev_mode: settings.dev_mode,
            show_delete_buttons: settings.show_delete_buttons,
            allow_image_editing: settings.allow_image_editing,
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        let defaults = Settings::default();
        Self {
            ok: false,
            message: message.into(),
            ..Self::from_settings(defaults)
        }
    }
}

/// Options for the external image picker.
#[derive(Debug, Clone, PartialEq)]
pub struct ImagePickerResponse {
    pub allows_editing: bool,
    pub aspect_width: Option<u32>,
    pub aspect_height: Option<u32>,
    pub quality: f32,
}

/// Loads the list screen.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; failures return `ok=false` with a user-facing message.
/// - Read-only apart from first-run database creation.
#[flutter_rust_bridge::frb(sync)]
pub fn entries_list() -> EntryListResponse {
    match with_journal_service(|service| service.entry_list()) {
        Ok(view) => EntryListResponse::from_view(view),
        Err(err) => EntryListResponse::failure(list_failure_message(&err, LOAD_FAILED_MESSAGE)),
    }
}

/// Saves a composer draft.
///
/// Blank text with no image, and a second entry on the same day outside
/// developer mode, are rejected with user-facing messages.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Returns the new entry key on success; nothing is written on rejection.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_save(text: String, image_uri: Option<String>) -> EntryActionResponse {
    let draft = EntryDraft {
        text,
        image_ref: image_uri,
    };
    match with_journal_service(|service| service.compose_entry(&draft)) {
        Ok(entry) => EntryActionResponse::success("Entry saved.", Some(entry.date().to_string())),
        Err(FfiError::Service(JournalServiceError::Validation(_))) => {
            EntryActionResponse::failure(EMPTY_ENTRY_MESSAGE)
        }
        Err(FfiError::Service(JournalServiceError::DailyLimitReached)) => {
            EntryActionResponse::failure(ENTRY_EXISTS_MESSAGE)
        }
        Err(err) => {
            warn!("event=ffi_entry_save module=ffi status=error error={err}");
            EntryActionResponse::failure(SAVE_FAILED_MESSAGE)
        }
    }
}

/// Deletes the entry keyed by `date` and returns the refreshed list.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Deleting an unknown key is a no-op that still returns the list.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_delete(date: String) -> EntryListResponse {
    match with_journal_service(|service| service.delete_entry(date.as_str())) {
        Ok(view) => EntryListResponse::from_view(view),
        Err(err) => EntryListResponse::failure(list_failure_message(&err, DELETE_FAILED_MESSAGE)),
    }
}

/// Deletes every entry. Settings are kept.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Idempotent; resetting an empty journal succeeds.
#[flutter_rust_bridge::frb(sync)]
pub fn entries_reset() -> EntryActionResponse {
    match with_journal_service(|service| service.reset_entries()) {
        Ok(()) => EntryActionResponse::success(RESET_DONE_MESSAGE, None),
        Err(err) => {
            warn!("event=ffi_entries_reset module=ffi status=error error={err}");
            EntryActionResponse::failure(RESET_FAILED_MESSAGE)
        }
    }
}

/// Loads all flags.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; failures return `ok=false`, a user-facing message and
///   default flag values.
#[flutter_rust_bridge::frb(sync)]
pub fn settings_get() -> SettingsResponse {
    settings_load_response(with_journal_service(|service| service.settings()))
}

/// Writes one flag by storage key (`devMode|showDeleteButtons|allowImageEditing`).
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Idempotent; returns the full settings snapshot after the write.
#[flutter_rust_bridge::frb(sync)]
pub fn setting_set(key: String, value: bool) -> SettingsResponse {
    let Some(flag) = SettingFlag::from_key(key.as_str()) else {
        return SettingsResponse::failure(format!("unknown setting `{key}`"));
    };
    match with_journal_service(|service| {
        service.set_setting(flag, value)?;
        service.settings()
    }) {
        Ok(settings) => SettingsResponse::from_settings(settings),
        Err(err) => {
            warn!("event=ffi_setting_set module=ffi status=error error={err}");
            SettingsResponse::failure(SETTINGS_FAILED_MESSAGE)
        }
    }
}

/// Flips one flag by storage key.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Not idempotent; each call flips the stored value once.
#[flutter_rust_bridge::frb(sync)]
pub fn setting_toggle(key: String) -> SettingsResponse {
    let Some(flag) = SettingFlag::from_key(key.as_str()) else {
        return SettingsResponse::failure(format!("unknown setting `{key}`"));
    };
    match with_journal_service(|service| {
        service.toggle_setting(flag)?;
        service.settings()
    }) {
        Ok(settings) => SettingsResponse::from_settings(settings),
        Err(err) => {
            warn!("event=ffi_setting_toggle module=ffi status=error error={err}");
            SettingsResponse::failure(SETTINGS_FAILED_MESSAGE)
        }
    }
}

/// Picker options derived from `allowImageEditing`; falls back to cropping
/// enabled when settings cannot be read.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; always returns usable options.
#[flutter_rust_bridge::frb(sync)]
pub fn image_picker_options() -> ImagePickerResponse {
    let options = with_journal_service(|service| service.image_picker_options())
        .unwrap_or_else(|err| {
            warn!("event=ffi_image_picker_options module=ffi status=error error={err}");
            ImagePickerOptions::from_settings(&Settings::default())
        });
    ImagePickerResponse {
        allows_editing: options.allows_editing,
        aspect_width: options.aspect.map(|(width, _)| width),
        aspect_height: options.aspect.map(|(_, height)| height),
        quality: options.quality,
    }
}

#[derive(Debug)]
enum FfiError {
    Open(String),
    Service(JournalServiceError),
}

impl std::fmt::Display for FfiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open(message) => write!(f, "{message}"),
            Self::Service(err) => write!(f, "{err}"),
        }
    }
}

impl From<JournalServiceError> for FfiError {
    fn from(value: JournalServiceError) -> Self {
        Self::Service(value)
    }
}

fn list_failure_message(err: &FfiError, fallback: &str) -> String {
    warn!("event=ffi_entries module=ffi status=error error={err}");
    fallback.to_string()
}

fn settings_load_response(result: Result<Settings, FfiError>) -> SettingsResponse {
    match result {
        Ok(settings) => SettingsResponse::from_settings(settings),
        Err(err) => {
            warn!("event=ffi_settings_get module=ffi status=error error={err}");
            SettingsResponse::failure(SETTINGS_LOAD_FAILED_MESSAGE)
        }
    }
}

fn resolve_db_path() -> PathBuf {
    DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var(DB_PATH_ENV) {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(DB_FILE_NAME)
        })
        .clone()
}

fn with_journal_service<T>(
    f: impl FnOnce(
        &JournalService<SqliteKeyValueStore<'_>>,
    ) -> Result<T, JournalServiceError>,
) -> Result<T, FfiError> {
    let conn = open_db(resolve_db_path())
        .map_err(|err| FfiError::Open(format!("journal DB open failed: {err}")))?;
    let service = JournalService::new(SqliteKeyValueStore::new(&conn));
    Ok(f(&service)?)
}

fn to_entry_item(entry: &Entry) -> EntryItem {
    EntryItem {
        date: entry.date().to_string(),
        display_date: entry.display_date(),
        kind: entry.kind().as_str().to_string(),
        text: entry.text().to_string(),
        image_uri: entry.image_ref().map(str::to_string),
    }
}
