//! In-memory task store and its change notifications.
//!
//! # Responsibility
//! - Own the ordered task collection (newest first).
//! - Emit one `StoreEvent` per applied mutation.
//!
//! # Invariants
//! - Task ids are unique within the store.
//! - Lookup misses are no-ops and emit no event.

pub mod events;
pub mod task_store;
