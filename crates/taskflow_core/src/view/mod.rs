//! Read-only projections of the task list.
//!
//! # Responsibility
//! - Compute daily, calendar and statistics views for presentation.
//!
//! # Invariants
//! - Every function is pure and recomputes from scratch; nothing is cached.
//! - Calendar-day comparisons use local time.

pub mod daily;
pub mod stats;
