//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record persisted under the `tasks` key.
//! - Validate user input before a task enters the store.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - `created_at` is set once at construction and never rewritten.
//! - `time_spent_minutes` only grows.
//! - `title` is trimmed and never empty.

use chrono::{DateTime, Local};
use serde::{Deserialize, Deserializer, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Opaque task identifier.
///
/// Stored as text so ids written by older front ends (numeric strings)
/// still load.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for TaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Uuid> for TaskId {
    fn from(value: Uuid) -> Self {
        Self(value.to_string())
    }
}

/// Fixed category labels a task can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum Category {
    Work,
    Personal,
    Health,
    Education,
    Home,
    Wellness,
    /// Fallback bucket; unknown persisted labels also land here.
    #[default]
    Other,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Work,
        Category::Personal,
        Category::Health,
        Category::Education,
        Category::Home,
        Category::Wellness,
        Category::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Work => "Work",
            Self::Personal => "Personal",
            Self::Health => "Health",
            Self::Education => "Education",
            Self::Home => "Home",
            Self::Wellness => "Wellness",
            Self::Other => "Other",
        }
    }

    /// Case-insensitive label lookup.
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.label().eq_ignore_ascii_case(normalized))
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.pad(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    pub fn label(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            _ => None,
        }
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.pad(self.label())
    }
}

/// Rejection reasons for task writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Title is empty after trimming.
    EmptyTitle,
    /// Another task in the store already uses this id.
    DuplicateId(TaskId),
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "task title must not be empty"),
            Self::DuplicateId(id) => write!(f, "task id already exists: {id}"),
        }
    }
}

impl Error for TaskValidationError {}

/// Canonical task record.
///
/// Field names are serialized in camelCase to keep the persisted blob
/// shape stable across front ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    created_at: DateTime<Local>,
    #[serde(default)]
    pub due_date: Option<DateTime<Local>>,
    #[serde(default, deserialize_with = "category_or_other")]
    pub category: Category,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default, rename = "timeSpent")]
    time_spent_minutes: u32,
}

impl Task {
    /// Builds a fresh task from a creation request.
    ///
    /// # Errors
    /// - `EmptyTitle` when the trimmed title is empty.
    pub fn create(
        id: TaskId,
        request: &NewTask,
        created_at: DateTime<Local>,
    ) -> Result<Self, TaskValidationError> {
        let title = normalize_title(&request.title)?;
        Ok(Self {
            id,
            title,
            completed: false,
            created_at,
            due_date: request.due_date,
            category: request.category.unwrap_or_default(),
            priority: request.priority.unwrap_or_default(),
            notes: normalize_notes(request.notes.as_deref()),
            time_spent_minutes: 0,
        })
    }

    pub fn created_at(&self) -> DateTime<Local> {
        self.created_at
    }

    pub fn time_spent_minutes(&self) -> u32 {
        self.time_spent_minutes
    }

    /// Adds tracked minutes, saturating at `u32::MAX`.
    pub fn add_time_spent(&mut self, minutes: u32) {
        self.time_spent_minutes = self.time_spent_minutes.saturating_add(minutes);
    }

    /// Applies an edit patch. Immutable fields are never touched.
    ///
    /// Validation happens before any field is written, so a rejected patch
    /// leaves the task unchanged.
    pub fn apply_patch(&mut self, patch: &TaskPatch) -> Result<(), TaskValidationError> {
        let title = match patch.title.as_deref() {
            Some(value) => Some(normalize_title(value)?),
            None => None,
        };

        if let Some(title) = title {
            self.title = title;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(notes) = patch.notes.as_ref() {
            self.notes = normalize_notes(notes.as_deref());
        }
        Ok(())
    }
}

/// Creation request for a task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub due_date: Option<DateTime<Local>>,
    pub category: Option<Category>,
    pub priority: Option<Priority>,
    pub notes: Option<String>,
}

impl NewTask {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn due(mut self, due_date: DateTime<Local>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Partial update for an existing task.
///
/// Outer `None` keeps the current value; for optional fields the inner
/// `None` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub due_date: Option<Option<DateTime<Local>>>,
    pub category: Option<Category>,
    pub priority: Option<Priority>,
    pub notes: Option<Option<String>>,
}

impl TaskPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.due_date.is_none()
            && self.category.is_none()
            && self.priority.is_none()
            && self.notes.is_none()
    }
}

/// Source of fresh task ids.
pub trait IdSource {
    fn next_id(&mut self) -> TaskId;
}

/// Random UUID v4 ids.
#[derive(Debug, Default)]
pub struct UuidIdSource;

impl IdSource for UuidIdSource {
    fn next_id(&mut self) -> TaskId {
        TaskId::from(Uuid::new_v4())
    }
}

/// Deterministic ids (`task-1`, `task-2`, ...) for tests and fixtures.
#[derive(Debug, Default)]
pub struct SequentialIdSource {
    next: u64,
}

impl SequentialIdSource {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdSource for SequentialIdSource {
    fn next_id(&mut self) -> TaskId {
        self.next += 1;
        TaskId::new(format!("task-{}", self.next))
    }
}

fn normalize_title(value: &str) -> Result<String, TaskValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TaskValidationError::EmptyTitle);
    }
    Ok(trimmed.to_string())
}

fn normalize_notes(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|notes| !notes.is_empty())
        .map(str::to_string)
}

fn category_or_other<'de, D>(deserializer: D) -> Result<Category, D::Error>
where
    D: Deserializer<'de>,
{
    let label = Option::<String>::deserialize(deserializer)?;
    Ok(label
        .as_deref()
        .and_then(Category::parse)
        .unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::{Category, NewTask, Priority, Task, TaskId, TaskPatch, TaskValidationError};
    use chrono::{Local, TimeZone};

    fn created() -> chrono::DateTime<Local> {
        Local.with_ymd_and_hms(2026, 3, 10, 9, 0, 0).single().unwrap()
    }

    #[test]
    fn create_applies_defaults_and_trims_title() {
        let task = Task::create(TaskId::new("a"), &NewTask::new("  write report "), created())
            .unwrap();
        assert_eq!(task.title, "write report");
        assert!(!task.completed);
        assert_eq!(task.category, Category::Other);
        assert_eq!(task.priority, Priority::Medium);
        assert_eq!(task.time_spent_minutes(), 0);
        assert_eq!(task.created_at(), created());
    }

    #[test]
    fn create_rejects_blank_title() {
        let err = Task::create(TaskId::new("a"), &NewTask::new("   "), created()).unwrap_err();
        assert_eq!(err, TaskValidationError::EmptyTitle);
    }

    #[test]
    fn rejected_patch_leaves_task_untouched() {
        let mut task = Task::create(TaskId::new("a"), &NewTask::new("draft"), created()).unwrap();
        let patch = TaskPatch {
            title: Some(" ".to_string()),
            category: Some(Category::Work),
            ..TaskPatch::default()
        };
        assert!(task.apply_patch(&patch).is_err());
        assert_eq!(task.title, "draft");
        assert_eq!(task.category, Category::Other);
    }

    #[test]
    fn category_deserializes_null_and_unknown_as_other() {
        let json = format!(
            r#"[{{"id":"1","title":"a","createdAt":"{0}","category":null}},
                {{"id":"2","title":"b","createdAt":"{0}","category":"Gardening"}},
                {{"id":"3","title":"c","createdAt":"{0}"}}]"#,
            created().to_rfc3339()
        );
        let tasks: Vec<Task> = serde_json::from_str(&json).unwrap();
        assert!(tasks.iter().all(|task| task.category == Category::Other));
    }

    #[test]
    fn category_parse_is_case_insensitive() {
        assert_eq!(Category::parse("work"), Some(Category::Work));
        assert_eq!(Category::parse(" WELLNESS "), Some(Category::Wellness));
        assert_eq!(Category::parse("nope"), None);
    }
}
