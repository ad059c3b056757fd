//! Domain model for the journal.
//!
//! # Responsibility
//! - Define the entry record and the settings flags shared by all callers.
//!
//! # Invariants
//! - Entries are identified by their creation timestamp (`date`); there is no
//!   separate ID.
//! - Entries are immutable once constructed.

pub mod entry;
pub mod settings;
