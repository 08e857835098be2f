//! Task session: the single writer of task and achievement state.
//!
//! # Responsibility
//! - Expose the mutation entry points (add, delete, toggle, track time, edit).
//! - After each applied mutation: persist the task list, notify listeners,
//!   persist newly unlocked achievements.
//!
//! # Invariants
//! - No-op mutations neither persist nor notify.
//! - Persistence failures are logged and never surface to the caller.
//! - Load failures fall back to the default task set.

use crate::achievement::tracker::{AchievementTracker, UnlockSet};
use crate::clock::Clock;
use crate::model::achievement::AchievementId;
use crate::model::task::{IdSource, NewTask, Task, TaskId, TaskPatch, TaskValidationError};
use crate::repo::kv_repo::KeyValueStore;
use crate::repo::state_repo::{Snapshot, StateRepository, ACHIEVEMENTS_KEY, TASKS_KEY};
use crate::service::defaults::{default_tasks, SessionOptions};
use crate::store::events::{StoreChange, StoreEvent, StoreListener};
use crate::store::task_store::TaskStore;
use chrono::{DateTime, Local};
use log::{debug, error, info, warn};

/// Result of a mutation that may be a no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeReport {
    /// `false` when the target id did not exist (or nothing changed).
    pub applied: bool,
    /// Achievements unlocked by this change.
    pub unlocked: Vec<AchievementId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddedTask {
    pub id: TaskId,
    pub unlocked: Vec<AchievementId>,
}

pub struct TaskSession<S: KeyValueStore> {
    store: TaskStore,
    tracker: AchievementTracker,
    repo: StateRepository<S>,
    clock: Box<dyn Clock>,
    ids: Box<dyn IdSource>,
    listeners: Vec<Box<dyn StoreListener>>,
}

impl<S: KeyValueStore> TaskSession<S> {
    /// Restores a session from `storage`.
    ///
    /// Missing or corrupt task data is replaced by the default task set,
    /// which is written back so ids stay stable across restores.
    pub fn restore(
        storage: S,
        options: SessionOptions,
        clock: Box<dyn Clock>,
        mut ids: Box<dyn IdSource>,
    ) -> Self {
        let repo = StateRepository::new(storage);
        let now = clock.now();

        let (tasks, write_back) = match repo.load_tasks() {
            Snapshot::Loaded(tasks) => (tasks, false),
            Snapshot::Missing => {
                info!("event=state_load module=session status=missing key={TASKS_KEY}");
                (default_tasks(options, now, ids.as_mut()), true)
            }
            Snapshot::Corrupt(reason) => {
                warn!(
                    "event=state_load module=session status=fallback key={} reason=corrupt error={}",
                    TASKS_KEY, reason
                );
                (default_tasks(options, now, ids.as_mut()), true)
            }
            Snapshot::Unavailable(reason) => {
                warn!(
                    "event=state_load module=session status=fallback key={} reason=unavailable error={}",
                    TASKS_KEY, reason
                );
                (default_tasks(options, now, ids.as_mut()), false)
            }
        };

        let unlocked = match repo.load_unlocked() {
            Snapshot::Loaded(ids) => UnlockSet::from_ids(ids),
            Snapshot::Missing => UnlockSet::new(),
            other => {
                warn!(
                    "event=state_load module=session status=fallback key={} outcome={:?}",
                    ACHIEVEMENTS_KEY, other
                );
                UnlockSet::new()
            }
        };

        let session = Self {
            store: TaskStore::from_tasks(tasks),
            tracker: AchievementTracker::new(unlocked),
            repo,
            clock,
            ids,
            listeners: Vec::new(),
        };
        if write_back {
            session.persist_tasks();
        }
        info!(
            "event=session_restore module=session status=ok tasks={} unlocked={}",
            session.store.len(),
            session.tracker.unlocked().len()
        );
        session
    }

    pub fn tasks(&self) -> &[Task] {
        self.store.tasks()
    }

    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.store.get(id)
    }

    pub fn unlocked(&self) -> &UnlockSet {
        self.tracker.unlocked()
    }

    pub fn now(&self) -> DateTime<Local> {
        self.clock.now()
    }

    /// Registers an extra listener, notified after the achievement tracker.
    pub fn subscribe(&mut self, listener: Box<dyn StoreListener>) {
        self.listeners.push(listener);
    }

    /// Creates a task with a fresh id at the front of the list.
    ///
    /// # Errors
    /// - `EmptyTitle` when the trimmed title is empty; nothing is stored.
    pub fn add_task(&mut self, request: NewTask) -> Result<AddedTask, TaskValidationError> {
        let task = Task::create(self.ids.next_id(), &request, self.clock.now())?;
        let event = self.store.add(task)?;
        let id = event.task_id().clone();
        let unlocked = self.commit(event);
        Ok(AddedTask { id, unlocked })
    }

    pub fn delete_task(&mut self, id: &TaskId) -> ChangeReport {
        let event = self.store.delete(id);
        self.report(event)
    }

    pub fn toggle_complete(&mut self, id: &TaskId) -> ChangeReport {
        let event = self.store.toggle_complete(id);
        self.report(event)
    }

    pub fn add_time_spent(&mut self, id: &TaskId, minutes: u32) -> ChangeReport {
        let event = self.store.add_time_spent(id, minutes);
        self.report(event)
    }

    /// # Errors
    /// - `EmptyTitle` when the patch carries a blank title; nothing changes.
    pub fn edit_task(
        &mut self,
        id: &TaskId,
        patch: &TaskPatch,
    ) -> Result<ChangeReport, TaskValidationError> {
        let event = self.store.edit(id, patch)?;
        Ok(self.report(event))
    }

    fn report(&mut self, event: Option<StoreEvent>) -> ChangeReport {
        match event {
            Some(event) => ChangeReport {
                applied: true,
                unlocked: self.commit(event),
            },
            None => ChangeReport::default(),
        }
    }

    fn commit(&mut self, event: StoreEvent) -> Vec<AchievementId> {
        debug!(
            "event=store_change module=session status=ok change={} task_id={}",
            event.name(),
            event.task_id()
        );
        self.persist_tasks();

        let change = StoreChange {
            event: &event,
            tasks: self.store.tasks(),
        };
        self.tracker.on_store_changed(&change);
        for listener in &mut self.listeners {
            listener.on_store_changed(&change);
        }

        let unlocked = self.tracker.take_newly_unlocked();
        if !unlocked.is_empty() {
            if let Err(err) = self.repo.save_unlocked(self.tracker.unlocked().ids()) {
                error!(
                    "event=state_save module=session status=error key={} error={}",
                    ACHIEVEMENTS_KEY, err
                );
            }
        }
        unlocked
    }

    fn persist_tasks(&self) {
        if let Err(err) = self.repo.save_tasks(self.store.tasks()) {
            error!(
                "event=state_save module=session status=error key={} error={}",
                TASKS_KEY, err
            );
        }
    }
}
