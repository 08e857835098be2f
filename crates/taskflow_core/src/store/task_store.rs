//! Ordered task collection.
//!
//! The store is a plain value: it performs no I/O and knows nothing about
//! persistence or achievements. Callers react to the returned events.

use crate::model::task::{Task, TaskId, TaskPatch, TaskValidationError};
use crate::store::events::StoreEvent;
use log::warn;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a store from loaded records.
    ///
    /// Records with a blank title and later duplicates of an id are
    /// dropped, so hand-edited blobs still satisfy the task invariants.
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        let mut unique: Vec<Task> = Vec::with_capacity(tasks.len());
        for task in tasks {
            if task.title.trim().is_empty() {
                warn!(
                    "event=store_load module=store status=skip reason=blank_title task_id={}",
                    task.id
                );
                continue;
            }
            if unique.iter().any(|existing| existing.id == task.id) {
                warn!(
                    "event=store_load module=store status=skip reason=duplicate_id task_id={}",
                    task.id
                );
                continue;
            }
            unique.push(task);
        }
        Self { tasks: unique }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| &task.id == id)
    }

    pub fn contains(&self, id: &TaskId) -> bool {
        self.get(id).is_some()
    }

    /// Inserts a new task at the front.
    ///
    /// # Errors
    /// - `DuplicateId` when the id is already present.
    pub fn add(&mut self, task: Task) -> Result<StoreEvent, TaskValidationError> {
        if self.contains(&task.id) {
            return Err(TaskValidationError::DuplicateId(task.id));
        }
        let id = task.id.clone();
        self.tasks.insert(0, task);
        Ok(StoreEvent::TaskAdded(id))
    }

    pub fn delete(&mut self, id: &TaskId) -> Option<StoreEvent> {
        let index = self.position(id)?;
        let removed = self.tasks.remove(index);
        Some(StoreEvent::TaskDeleted(removed.id))
    }

    pub fn toggle_complete(&mut self, id: &TaskId) -> Option<StoreEvent> {
        let task = self.get_mut(id)?;
        task.completed = !task.completed;
        Some(StoreEvent::CompletionToggled {
            id: task.id.clone(),
            completed: task.completed,
        })
    }

    /// Adds tracked minutes. Zero minutes changes nothing and emits nothing.
    pub fn add_time_spent(&mut self, id: &TaskId, minutes: u32) -> Option<StoreEvent> {
        if minutes == 0 {
            return None;
        }
        let task = self.get_mut(id)?;
        task.add_time_spent(minutes);
        Some(StoreEvent::TimeTracked {
            id: task.id.clone(),
            minutes,
            total: task.time_spent_minutes(),
        })
    }

    /// Applies an edit. Returns `Ok(None)` for unknown ids or empty patches.
    pub fn edit(
        &mut self,
        id: &TaskId,
        patch: &TaskPatch,
    ) -> Result<Option<StoreEvent>, TaskValidationError> {
        if patch.is_empty() {
            return Ok(None);
        }
        let Some(task) = self.get_mut(id) else {
            return Ok(None);
        };
        task.apply_patch(patch)?;
        Ok(Some(StoreEvent::TaskEdited(task.id.clone())))
    }

    fn position(&self, id: &TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| &task.id == id)
    }

    fn get_mut(&mut self, id: &TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|task| &task.id == id)
    }
}
