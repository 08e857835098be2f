//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the key-value storage contract used for persisted state.
//! - Isolate SQLite details from session orchestration.
//!
//! # Invariants
//! - Read paths report unparseable data as `Snapshot::Corrupt` rather than
//!   failing the caller.

pub mod kv_repo;
pub mod state_repo;
