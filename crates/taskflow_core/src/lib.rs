//! Core domain logic for TaskFlow.
//! This crate is the single source of truth for task and achievement state.

pub mod achievement;
pub mod clock;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;
pub mod view;

pub use achievement::tracker::{AchievementTracker, UnlockSet};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{AppConfig, ConfigError};
pub use logging::{
    default_log_level, init_logging, logging_status, LogLevel, LogSettings, LoggingError,
};
pub use model::achievement::{AchievementDefinition, AchievementId, CATALOG};
pub use model::task::{
    Category, IdSource, NewTask, Priority, SequentialIdSource, Task, TaskId, TaskPatch,
    TaskValidationError, UuidIdSource,
};
pub use repo::kv_repo::{
    KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore, StorageError, StorageResult,
};
pub use repo::state_repo::{Snapshot, StateRepository, ACHIEVEMENTS_KEY, TASKS_KEY};
pub use service::defaults::{default_tasks, SessionOptions};
pub use service::session::{AddedTask, ChangeReport, TaskSession};
pub use store::events::{StoreChange, StoreEvent, StoreListener};
pub use store::task_store::TaskStore;
pub use view::daily::{classify, days_with_tasks, tasks_due_on, today_tasks, TaskStatus};
pub use view::stats::{
    category_breakdown, completion_progress, monthly_summary, partition_by_completion,
    time_by_category, weekly_summary, CategoryCount, CategoryTime, CompletionSplit, DaySummary,
    Progress,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
