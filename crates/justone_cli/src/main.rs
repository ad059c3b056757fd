//! Smoke and inspection CLI for `justone_core`.
//!
//! Usage: `justone_cli [DB_PATH]`. Without a path only linkage is checked.
//! With one, the journal at that path is opened and summarized; a missing
//! file is created and migrated first, but no entries or flags are written.

use justone_core::db::open_db;
use justone_core::{JournalService, SqliteKeyValueStore};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("justone_core ping={}", justone_core::ping());
    println!("justone_core version={}", justone_core::core_version());

    let Some(db_path) = std::env::args().nth(1) else {
        return ExitCode::SUCCESS;
    };

    match summarize(&db_path) {
        Ok(lines) => {
            for line in lines {
                println!("{line}");
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("justone_cli: {err}");
            ExitCode::FAILURE
        }
    }
}

fn summarize(db_path: &str) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    let conn = open_db(db_path)?;
    let service = JournalService::new(SqliteKeyValueStore::new(&conn));
    let settings = service.settings()?;
    let view = service.entry_list()?;

    let mut lines = vec![
        format!("entries={}", view.entries.len()),
        format!("can_add_entry={}", view.can_add_entry),
        format!("dev_mode={}", settings.dev_mode),
        format!("show_delete_buttons={}", settings.show_delete_buttons),
        format!("allow_image_editing={}", settings.allow_image_editing),
    ];
    if let Some(latest) = view.entries.first() {
        lines.push(format!(
            "latest={} kind={}",
            latest.display_date(),
            latest.kind().as_str()
        ));
    }
    Ok(lines)
}
