//! Daily agenda, calendar day lookups and per-task status.

use crate::model::task::Task;
use chrono::{DateTime, Datelike, Duration, Local, NaiveDate};
use serde::Serialize;
use std::collections::BTreeSet;

/// Window in which an open task counts as due soon.
pub const DUE_SOON_WINDOW_MINUTES: i64 = 60;

/// Display status of a single task relative to "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Completed,
    /// Open with no due date.
    Scheduled,
    Overdue,
    /// Due within the next hour.
    DueSoon,
    /// Due later today.
    Today,
    /// Due on a later day.
    Upcoming,
}

impl TaskStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Scheduled => "scheduled",
            Self::Overdue => "overdue",
            Self::DueSoon => "due soon",
            Self::Today => "today",
            Self::Upcoming => "upcoming",
        }
    }

    /// Whether the status should be highlighted as needing attention.
    pub fn is_warning(self) -> bool {
        matches!(self, Self::Overdue | Self::DueSoon)
    }
}

pub fn classify(task: &Task, now: DateTime<Local>) -> TaskStatus {
    if task.completed {
        return TaskStatus::Completed;
    }
    let Some(due_date) = task.due_date else {
        return TaskStatus::Scheduled;
    };
    if now > due_date {
        return TaskStatus::Overdue;
    }
    if due_date < now + Duration::minutes(DUE_SOON_WINDOW_MINUTES) {
        return TaskStatus::DueSoon;
    }
    if due_date.date_naive() == now.date_naive() {
        TaskStatus::Today
    } else {
        TaskStatus::Upcoming
    }
}

/// Tasks due on `date`, earliest first. Ties keep store order.
pub fn tasks_due_on(tasks: &[Task], date: NaiveDate) -> Vec<&Task> {
    let mut due: Vec<&Task> = tasks
        .iter()
        .filter(|task| due_day(task) == Some(date))
        .collect();
    due.sort_by_key(|task| task.due_date);
    due
}

/// Tasks due on the calendar day of `now`.
pub fn today_tasks(tasks: &[Task], now: DateTime<Local>) -> Vec<&Task> {
    tasks_due_on(tasks, now.date_naive())
}

/// Local dates with at least one task due, for calendar highlighting.
///
/// When `month` is given as `(year, month)`, only dates in that month are
/// returned.
pub fn days_with_tasks(tasks: &[Task], month: Option<(i32, u32)>) -> BTreeSet<NaiveDate> {
    tasks
        .iter()
        .filter_map(due_day)
        .filter(|date| match month {
            Some((year, month)) => date.year() == year && date.month() == month,
            None => true,
        })
        .collect()
}

fn due_day(task: &Task) -> Option<NaiveDate> {
    task.due_date.map(|due_date| due_date.date_naive())
}
