//! Store change events and the listener seam.

use crate::model::task::{Task, TaskId};

/// One applied store mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    TaskAdded(TaskId),
    TaskDeleted(TaskId),
    CompletionToggled { id: TaskId, completed: bool },
    TimeTracked { id: TaskId, minutes: u32, total: u32 },
    TaskEdited(TaskId),
}

impl StoreEvent {
    pub fn task_id(&self) -> &TaskId {
        match self {
            Self::TaskAdded(id)
            | Self::TaskDeleted(id)
            | Self::TaskEdited(id)
            | Self::CompletionToggled { id, .. }
            | Self::TimeTracked { id, .. } => id,
        }
    }

    /// Short name used in log lines.
    pub fn name(&self) -> &'static str {
        match self {
            Self::TaskAdded(_) => "task_added",
            Self::TaskDeleted(_) => "task_deleted",
            Self::CompletionToggled { .. } => "completion_toggled",
            Self::TimeTracked { .. } => "time_tracked",
            Self::TaskEdited(_) => "task_edited",
        }
    }
}

/// Notification payload handed to listeners after a mutation is applied.
#[derive(Debug, Clone, Copy)]
pub struct StoreChange<'a> {
    pub event: &'a StoreEvent,
    /// Full store contents after the mutation.
    pub tasks: &'a [Task],
}

/// Consumer of store change notifications.
pub trait StoreListener {
    fn on_store_changed(&mut self, change: &StoreChange<'_>);
}
