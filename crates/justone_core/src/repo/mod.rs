//! Stores built on the local key-value namespace.
//!
//! # Responsibility
//! - Define the key-value contract and its SQLite implementation.
//! - Keep JSON encoding and key naming out of service orchestration.
//!
//! # Invariants
//! - Corrupt payloads surface as `StoreError::Read`; they are never replaced
//!   by defaults.
//! - A failed write leaves the previously committed value in place.

pub mod entry_repo;
pub mod kv_store;
pub mod settings_repo;
