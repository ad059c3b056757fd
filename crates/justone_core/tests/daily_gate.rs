use chrono::{Duration, FixedOffset, Local, TimeZone, Utc};
use justone_core::{can_add_at, can_add_today, Entry};

#[test]
fn empty_collection_allows_entry() {
    assert!(can_add_today(&[], false));
}

#[test]
fn todays_entry_closes_gate_unless_dev_mode() {
    let today = [Entry::new("wrote code", None)];

    assert!(!can_add_today(&today, false));
    assert!(can_add_today(&today, true));
}

#[test]
fn older_entries_do_not_close_gate() {
    let last_week = Local::now() - Duration::days(7);
    let entries = [Entry::at(&last_week, "old", None)];

    assert!(can_add_today(&entries, false));
}

#[test]
fn gate_uses_calendar_day_not_24_hours() {
    let entry = Entry::with_date("2024-01-01T23:59:00Z", "late night", None).unwrap();

    let one_minute_later = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
    assert!(can_add_at(&[entry.clone()], false, &one_minute_later));

    let start_of_same_day = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    assert!(!can_add_at(&[entry], false, &start_of_same_day));
}

#[test]
fn gate_follows_callers_time_zone() {
    // 02:00Z on Jan 2 is still Jan 1 in New York (UTC-5).
    let entry = Entry::with_date("2024-01-02T02:00:00Z", "evening", None).unwrap();
    let new_york = FixedOffset::west_opt(5 * 3600).unwrap();

    let jan_first_ny = new_york.with_ymd_and_hms(2024, 1, 1, 22, 0, 0).unwrap();
    assert!(!can_add_at(&[entry.clone()], false, &jan_first_ny));

    let jan_second_ny = new_york.with_ymd_and_hms(2024, 1, 2, 8, 0, 0).unwrap();
    assert!(can_add_at(&[entry], false, &jan_second_ny));
}

#[test]
fn dev_mode_ignores_many_entries_today() {
    let now = Utc.with_ymd_and_hms(2024, 5, 5, 12, 0, 0).unwrap();
    let entries = (0..3)
        .map(|hour| Entry::at(&(now - Duration::hours(hour)), "again", None))
        .collect::<Vec<_>>();

    assert!(!can_add_at(&entries, false, &now));
    assert!(can_add_at(&entries, true, &now));
}
