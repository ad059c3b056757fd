//! One-entry-per-day gate.
//!
//! # Invariants
//! - Developer mode always opens the gate.
//! - Days are compared in the caller's calendar (the device's local zone for
//!   `can_add_today`), never in UTC.
//! - Pure: callers must pass a freshly loaded collection.

use crate::model::entry::Entry;
use chrono::{DateTime, Local, TimeZone};

/// Whether a new entry may be added today on this device.
pub fn can_add_today(entries: &[Entry], dev_mode: bool) -> bool {
    can_add_at(entries, dev_mode, &Local::now())
}

/// Whether a new entry may be added on the calendar day of `now`, as seen in
/// `now`'s time zone.
pub fn can_add_at<Tz: TimeZone>(entries: &[Entry], dev_mode: bool, now: &DateTime<Tz>) -> bool {
    if dev_mode {
        return true;
    }

    let tz = now.timezone();
    let today = now.date_naive();
    !entries.iter().any(|entry| entry.day_in(&tz) == today)
}

#[cfg(test)]
mod tests {
    use super::can_add_at;
    use crate::model::entry::Entry;
    use chrono::{FixedOffset, TimeZone};

    #[test]
    fn compares_days_in_callers_zone() {
        // 23:30 UTC on Jan 1 is already Jan 2 at UTC+2.
        let entry = Entry::with_date("2024-01-01T23:30:00Z", "late", None).unwrap();
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();

        let jan_two_local = plus_two.with_ymd_and_hms(2024, 1, 2, 9, 0, 0).unwrap();
        assert!(!can_add_at(&[entry.clone()], false, &jan_two_local));

        let jan_one_local = plus_two.with_ymd_and_hms(2024, 1, 1, 20, 0, 0).unwrap();
        assert!(can_add_at(&[entry], false, &jan_one_local));
    }
}
