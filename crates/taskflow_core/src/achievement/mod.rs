//! Achievement evaluation.
//!
//! # Responsibility
//! - Evaluate unlock predicates over the current task list.
//! - Track the monotonic set of unlocked badges.
//!
//! # Invariants
//! - Unlocking is one-way; nothing removes an id from an `UnlockSet`.
//! - Predicates are pure and re-run in full on every store change.

pub mod rules;
pub mod tracker;
