//! Domain model for tasks and achievements.
//!
//! # Responsibility
//! - Define the task record owned by the task store.
//! - Define static achievement metadata referenced by unlock sets.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId`.
//! - Deletion is a hard removal from the store; ids are not recycled.

pub mod achievement;
pub mod task;
