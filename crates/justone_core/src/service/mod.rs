//! Use-case services consumed by the FFI and CLI layers.
//!
//! # Responsibility
//! - Orchestrate store calls into screen-level operations.
//! - Keep UI layers decoupled from storage keys and JSON payloads.

pub mod journal_service;
