//! Settings store: one JSON boolean per flag key.
//!
//! # Invariants
//! - An undecodable flag payload reads as the flag's default so one bad
//!   value never blocks the screens; the next write replaces it.
//! - Backend failures (SQLite) still surface as `StoreError`.

use crate::model::settings::{SettingFlag, Settings};
use crate::repo::kv_store::{
    read_json, write_json, KeyValueStore, StoreError, StoreFailure, StoreResult,
};
use log::warn;

/// Persisted behavior switches.
pub struct SettingsStore<S> {
    kv: S,
}

impl<S: KeyValueStore> SettingsStore<S> {
    pub fn new(kv: S) -> Self {
        Self { kv }
    }

    /// Returns the stored flag value, or its default when never written or
    /// when the stored payload is not a JSON boolean.
    pub fn get(&self, flag: SettingFlag) -> StoreResult<bool> {
        match read_json::<bool>(&self.kv, flag.key()) {
            Ok(value) => Ok(value.unwrap_or(flag.default_value())),
            Err(
                err @ StoreError::Read {
                    cause: StoreFailure::Json(_),
                    ..
                },
            ) => {
                warn!(
                    "event=setting_read module=repo status=error error_code={} key={} fallback={}",
                    err.code(),
                    err.key(),
                    flag.default_value()
                );
                Ok(flag.default_value())
            }
            Err(err) => Err(err),
        }
    }

    /// Persists `value` immediately.
    pub fn set(&self, flag: SettingFlag, value: bool) -> StoreResult<()> {
        write_json(&self.kv, flag.key(), &value)
    }

    /// Flips a flag and returns the new value.
    pub fn toggle(&self, flag: SettingFlag) -> StoreResult<bool> {
        let next = !self.get(flag)?;
        self.set(flag, next)?;
        Ok(next)
    }

    /// Reads all flags.
    pub fn snapshot(&self) -> StoreResult<Settings> {
        let mut settings = Settings::default();
        for flag in SettingFlag::ALL {
            settings.set(flag, self.get(flag)?);
        }
        Ok(settings)
    }
}
