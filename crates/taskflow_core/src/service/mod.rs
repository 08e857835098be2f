//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store mutations, persistence and achievement evaluation.
//! - Keep front ends decoupled from storage details.

pub mod defaults;
pub mod session;
