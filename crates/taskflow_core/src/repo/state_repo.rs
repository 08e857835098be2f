//! Task list and unlock list persistence over a key-value store.
//!
//! # Responsibility
//! - Serialize the full task list and unlock list to JSON blobs.
//! - Turn unreadable blobs into a typed `Snapshot` instead of an error.
//!
//! # Invariants
//! - The two blobs are independent; a corrupt one never affects the other.
//! - Writes overwrite the whole blob.

use crate::model::achievement::AchievementId;
use crate::model::task::Task;
use crate::repo::kv_repo::{KeyValueStore, StorageError, StorageResult};
use log::warn;

pub const TASKS_KEY: &str = "tasks";
pub const ACHIEVEMENTS_KEY: &str = "achievements";

/// Outcome of reading one persisted blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Snapshot<T> {
    Loaded(T),
    /// Key not present.
    Missing,
    /// Blob present but not parseable.
    Corrupt(String),
    /// Storage backend failed to read.
    Unavailable(String),
}

pub struct StateRepository<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> StateRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    #[cfg(test)]
    fn store(&self) -> &S {
        &self.store
    }

    pub fn load_tasks(&self) -> Snapshot<Vec<Task>> {
        match self.read(TASKS_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Task>>(&raw) {
                Ok(tasks) => Snapshot::Loaded(tasks),
                Err(err) => Snapshot::Corrupt(err.to_string()),
            },
            Ok(None) => Snapshot::Missing,
            Err(err) => Snapshot::Unavailable(err.to_string()),
        }
    }

    pub fn save_tasks(&self, tasks: &[Task]) -> StorageResult<()> {
        self.write(TASKS_KEY, tasks)
    }

    /// Loads unlocked ids; unknown identifiers are skipped with a warning.
    pub fn load_unlocked(&self) -> Snapshot<Vec<AchievementId>> {
        let raw = match self.read(ACHIEVEMENTS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Snapshot::Missing,
            Err(err) => return Snapshot::Unavailable(err.to_string()),
        };
        let names = match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(names) => names,
            Err(err) => return Snapshot::Corrupt(err.to_string()),
        };

        let ids = names
            .iter()
            .filter_map(|name| {
                let parsed = AchievementId::parse(name);
                if parsed.is_none() {
                    warn!(
                        "event=state_load module=repo status=skip key={} reason=unknown_achievement id={}",
                        ACHIEVEMENTS_KEY, name
                    );
                }
                parsed
            })
            .collect();
        Snapshot::Loaded(ids)
    }

    pub fn save_unlocked(&self, ids: &[AchievementId]) -> StorageResult<()> {
        self.write(ACHIEVEMENTS_KEY, ids)
    }

    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        self.store.get(key)
    }

    fn write<T: serde::Serialize + ?Sized>(&self, key: &str, value: &T) -> StorageResult<()> {
        let raw = serde_json::to_string(value)
            .map_err(|err| StorageError::Serialize(err.to_string()))?;
        self.store.set(key, &raw)
    }
}
