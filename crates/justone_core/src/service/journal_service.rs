//! Journal use-case service.
//!
//! # Responsibility
//! - Back the entry list, composer and settings screens.
//! - Enforce the empty-entry and one-per-day rules before any write.
//!
//! # Invariants
//! - The settings store is the only source of truth for flags; every call
//!   re-reads them.
//! - The daily gate is evaluated against entries loaded in the same call.
//! - Entry text and image references are never logged.

use crate::gate::can_add_at;
use crate::model::entry::{Entry, EntryValidationError};
use crate::model::settings::{ImagePickerOptions, SettingFlag, Settings};
use crate::repo::entry_repo::EntryStore;
use crate::repo::kv_store::{KeyValueStore, StoreError};
use crate::repo::settings_repo::SettingsStore;
use chrono::{DateTime, Local, TimeZone};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Tagline shown by the list screen when there are no entries.
pub const EMPTY_STATE_TAGLINE: &str = "One thought. One day. One you.";

pub type ServiceResult<T> = Result<T, JournalServiceError>;

/// Service error for journal use cases.
#[derive(Debug)]
pub enum JournalServiceError {
    /// Draft failed validation; nothing was written.
    Validation(EntryValidationError),
    /// An entry already exists today and developer mode is off.
    DailyLimitReached,
    /// Persistence-layer failure.
    Store(StoreError),
}

impl JournalServiceError {
    /// Stable machine-readable code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_failed",
            Self::DailyLimitReached => "daily_limit_reached",
            Self::Store(err) => err.code(),
        }
    }
}

impl Display for JournalServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::DailyLimitReached => write!(f, "an entry already exists for today"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for JournalServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::DailyLimitReached => None,
            Self::Store(err) => Some(err),
        }
    }
}

impl From<EntryValidationError> for JournalServiceError {
    fn from(value: EntryValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for JournalServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Composer input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryDraft {
    pub text: String,
    pub image_ref: Option<String>,
}

impl EntryDraft {
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty() && self.image_ref.as_deref().map_or(true, str::is_empty)
    }
}

/// What the list screen renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryListView {
    /// Newest first.
    pub entries: Vec<Entry>,
    pub can_add_entry: bool,
    pub show_delete_buttons: bool,
}

impl EntryListView {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Use-case service over one key-value namespace.
pub struct JournalService<S> {
    entries: EntryStore<S>,
    settings: SettingsStore<S>,
}

impl<S: KeyValueStore + Clone> JournalService<S> {
    pub fn new(kv: S) -> Self {
        Self {
            entries: EntryStore::new(kv.clone()),
            settings: SettingsStore::new(kv),
        }
    }
}

impl<S: KeyValueStore> JournalService<S> {
    /// Loads the list screen state for the current local day.
    pub fn entry_list(&self) -> ServiceResult<EntryListView> {
        self.entry_list_at(&Local::now())
    }

    /// Loads the list screen state for the day of `now`.
    pub fn entry_list_at<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> ServiceResult<EntryListView> {
        let settings = self.settings.snapshot().inspect_err(|err| {
            log_failure("entry_list", err.code(), err);
        })?;
        let entries = self.entries.load_all().inspect_err(|err| {
            log_failure("entry_list", err.code(), err);
        })?;
        let can_add_entry = can_add_at(&entries, settings.dev_mode, now);

        info!(
            "event=entry_list module=service status=ok count={} can_add_entry={}",
            entries.len(),
            can_add_entry
        );
        Ok(EntryListView {
            entries,
            can_add_entry,
            show_delete_buttons: settings.show_delete_buttons,
        })
    }

    /// Saves a new entry stamped with the current instant.
    pub fn compose_entry(&self, draft: &EntryDraft) -> ServiceResult<Entry> {
        self.compose_entry_at(draft, &Local::now())
    }

    /// Saves a new entry stamped with `now`.
    ///
    /// # Errors
    /// - `Validation(Empty)` when the draft has no text and no image.
    /// - `DailyLimitReached` when today already has an entry and developer
    ///   mode is off.
    /// - `Store` when loading or writing fails; persisted state is unchanged.
    pub fn compose_entry_at<Tz: TimeZone>(
        &self,
        draft: &EntryDraft,
        now: &DateTime<Tz>,
    ) -> ServiceResult<Entry> {
        let result = self.try_compose(draft, now);
        match &result {
            Ok(entry) => info!(
                "event=entry_append module=service status=ok kind={}",
                entry.kind().as_str()
            ),
            Err(err @ JournalServiceError::DailyLimitReached)
            | Err(err @ JournalServiceError::Validation(_)) => warn!(
                "event=entry_append module=service status=rejected error_code={}",
                err.code()
            ),
            Err(err) => log_failure("entry_append", err.code(), err),
        }
        result
    }

    fn try_compose<Tz: TimeZone>(
        &self,
        draft: &EntryDraft,
        now: &DateTime<Tz>,
    ) -> ServiceResult<Entry> {
        if draft.is_empty() {
            return Err(EntryValidationError::Empty.into());
        }

        let dev_mode = self.settings.get(SettingFlag::DevMode)?;
        let existing = self.entries.load_all()?;
        if !can_add_at(&existing, dev_mode, now) {
            return Err(JournalServiceError::DailyLimitReached);
        }

        let entry = Entry::at(now, draft.text.clone(), draft.image_ref.clone());
        self.entries.append(entry.clone())?;
        Ok(entry)
    }

    /// Deletes the entry keyed by `date` and returns the refreshed list state.
    pub fn delete_entry(&self, date: &str) -> ServiceResult<EntryListView> {
        self.delete_entry_at(date, &Local::now())
    }

    pub fn delete_entry_at<Tz: TimeZone>(
        &self,
        date: &str,
        now: &DateTime<Tz>,
    ) -> ServiceResult<EntryListView> {
        let removed = self.entries.delete_by_date(date).inspect_err(|err| {
            log_failure("entry_delete", err.code(), err);
        })?;
        info!("event=entry_delete module=service status=ok removed={removed}");
        self.entry_list_at(now)
    }

    /// Deletes every entry. Settings are left untouched.
    pub fn reset_entries(&self) -> ServiceResult<()> {
        self.entries.reset_all().inspect_err(|err| {
            log_failure("entries_reset", err.code(), err);
        })?;
        info!("event=entries_reset module=service status=ok");
        Ok(())
    }

    /// Reads all flags.
    pub fn settings(&self) -> ServiceResult<Settings> {
        Ok(self.settings.snapshot()?)
    }

    /// Persists one flag.
    pub fn set_setting(&self, flag: SettingFlag, value: bool) -> ServiceResult<()> {
        self.settings.set(flag, value).inspect_err(|err| {
            log_failure("setting_set", err.code(), err);
        })?;
        info!(
            "event=setting_set module=service status=ok key={} value={value}",
            flag.key()
        );
        Ok(())
    }

    /// Flips one flag and returns its new value.
    pub fn toggle_setting(&self, flag: SettingFlag) -> ServiceResult<bool> {
        let value = self.settings.toggle(flag).inspect_err(|err| {
            log_failure("setting_set", err.code(), err);
        })?;
        info!(
            "event=setting_set module=service status=ok key={} value={value}",
            flag.key()
        );
        Ok(value)
    }

    /// Picker configuration for the composer's image button.
    pub fn image_picker_options(&self) -> ServiceResult<ImagePickerOptions> {
        Ok(ImagePickerOptions::from_settings(&self.settings.snapshot()?))
    }
}

fn log_failure(event: &str, code: &str, err: &dyn Display) {
    error!("event={event} module=service status=error error_code={code} error={err}");
}
