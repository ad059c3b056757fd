mod common;

use common::FlakyStore;
use justone_core::db::open_db_in_memory;
use justone_core::{
    KeyValueStore, SettingFlag, Settings, SettingsStore, SqliteKeyValueStore, StoreError,
};

#[test]
fn absent_flags_report_defaults() {
    let conn = open_db_in_memory().unwrap();
    let store = SettingsStore::new(SqliteKeyValueStore::new(&conn));

    assert!(!store.get(SettingFlag::DevMode).unwrap());
    assert!(store.get(SettingFlag::ShowDeleteButtons).unwrap());
    assert!(store.get(SettingFlag::AllowImageEditing).unwrap());
    assert_eq!(store.snapshot().unwrap(), Settings::default());
}

#[test]
fn set_writes_json_boolean_under_flag_key() {
    let conn = open_db_in_memory().unwrap();
    let kv = SqliteKeyValueStore::new(&conn);
    let store = SettingsStore::new(kv);

    store.set(SettingFlag::ShowDeleteButtons, false).unwrap();

    assert_eq!(
        kv.get_item("showDeleteButtons").unwrap().as_deref(),
        Some("false")
    );
    assert!(!store.get(SettingFlag::ShowDeleteButtons).unwrap());
}

#[test]
fn flags_are_independent() {
    let conn = open_db_in_memory().unwrap();
    let store = SettingsStore::new(SqliteKeyValueStore::new(&conn));

    store.set(SettingFlag::DevMode, true).unwrap();
    store.set(SettingFlag::AllowImageEditing, false).unwrap();

    assert_eq!(
        store.snapshot().unwrap(),
        Settings {
            dev_mode: true,
            show_delete_buttons: true,
            allow_image_editing: false,
        }
    );
}

#[test]
fn toggle_flips_from_default_and_back() {
    let conn = open_db_in_memory().unwrap();
    let store = SettingsStore::new(SqliteKeyValueStore::new(&conn));

    assert!(store.toggle(SettingFlag::DevMode).unwrap());
    assert!(store.get(SettingFlag::DevMode).unwrap());
    assert!(!store.toggle(SettingFlag::DevMode).unwrap());
    assert!(!store.get(SettingFlag::DevMode).unwrap());
}

#[test]
fn undecodable_flag_reads_as_default() {
    let conn = open_db_in_memory().unwrap();
    let kv = SqliteKeyValueStore::new(&conn);
    kv.set_item("devMode", "\"yes\"").unwrap();
    kv.set_item("showDeleteButtons", "null").unwrap();
    let store = SettingsStore::new(kv);

    assert!(!store.get(SettingFlag::DevMode).unwrap());
    assert!(store.get(SettingFlag::ShowDeleteButtons).unwrap());
    assert_eq!(store.snapshot().unwrap(), Settings::default());
}

#[test]
fn toggle_repairs_undecodable_flag() {
    let conn = open_db_in_memory().unwrap();
    let kv = SqliteKeyValueStore::new(&conn);
    kv.set_item("showDeleteButtons", "null").unwrap();
    let store = SettingsStore::new(kv);

    assert!(!store.toggle(SettingFlag::ShowDeleteButtons).unwrap());
    assert_eq!(
        kv.get_item("showDeleteButtons").unwrap().as_deref(),
        Some("false")
    );
}

#[test]
fn failed_write_reports_key_and_keeps_committed_value() {
    let conn = open_db_in_memory().unwrap();
    let kv = FlakyStore::new(&conn);
    let store = SettingsStore::new(&kv);
    store.set(SettingFlag::DevMode, true).unwrap();

    kv.fail_writes.set(true);
    let err = store.set(SettingFlag::DevMode, false).unwrap_err();
    assert!(matches!(err, StoreError::Write { ref key, .. } if key == "devMode"));
    assert_eq!(err.key(), "devMode");

    let err = store.toggle(SettingFlag::DevMode).unwrap_err();
    assert!(matches!(err, StoreError::Write { ref key, .. } if key == "devMode"));

    kv.fail_writes.set(false);
    assert!(store.get(SettingFlag::DevMode).unwrap());
}
