//! Aggregate statistics over the task list.
//!
//! Weekly and monthly figures bucket tasks by creation date, not due date.

use crate::model::task::{Category, Task};
use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, Weekday};
use serde::Serialize;

/// Completed/pending split for a bucket of tasks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CompletionSplit {
    pub completed: usize,
    pub pending: usize,
}

impl CompletionSplit {
    pub fn total(&self) -> usize {
        self.completed + self.pending
    }

    fn record(&mut self, task: &Task) {
        if task.completed {
            self.completed += 1;
        } else {
            self.pending += 1;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub weekday: Weekday,
    pub split: CompletionSplit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: Category,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryTime {
    pub category: Category,
    pub minutes: u64,
}

/// Overall completion progress.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
    /// Rounded half up; 0 for an empty list.
    pub percent: u8,
}

/// One entry per day of the Monday-start week containing `now`.
pub fn weekly_summary(tasks: &[Task], now: DateTime<Local>) -> Vec<DaySummary> {
    let today = now.date_naive();
    let monday = today - Duration::days(i64::from(today.weekday().num_days_from_monday()));

    (0..7)
        .map(|offset| {
            let date = monday + Duration::days(offset);
            let mut split = CompletionSplit::default();
            tasks
                .iter()
                .filter(|task| task.created_at().date_naive() == date)
                .for_each(|task| split.record(task));
            DaySummary {
                date,
                weekday: date.weekday(),
                split,
            }
        })
        .collect()
}

/// Tasks created in the calendar month of `now`.
pub fn monthly_summary(tasks: &[Task], now: DateTime<Local>) -> CompletionSplit {
    let mut split = CompletionSplit::default();
    tasks
        .iter()
        .filter(|task| {
            let created = task.created_at();
            created.year() == now.year() && created.month() == now.month()
        })
        .for_each(|task| split.record(task));
    split
}

/// Task count per category, in order of first appearance.
pub fn category_breakdown(tasks: &[Task]) -> Vec<CategoryCount> {
    let mut counts: Vec<CategoryCount> = Vec::new();
    for task in tasks {
        match counts.iter_mut().find(|entry| entry.category == task.category) {
            Some(entry) => entry.count += 1,
            None => counts.push(CategoryCount {
                category: task.category,
                count: 1,
            }),
        }
    }
    counts
}

/// Tracked minutes per category, omitting categories with no time.
pub fn time_by_category(tasks: &[Task]) -> Vec<CategoryTime> {
    let mut totals: Vec<CategoryTime> = Vec::new();
    for task in tasks {
        let minutes = u64::from(task.time_spent_minutes());
        if minutes == 0 {
            continue;
        }
        match totals.iter_mut().find(|entry| entry.category == task.category) {
            Some(entry) => entry.minutes += minutes,
            None => totals.push(CategoryTime {
                category: task.category,
                minutes,
            }),
        }
    }
    totals
}

pub fn completion_progress(tasks: &[Task]) -> Progress {
    let total = tasks.len();
    let completed = tasks.iter().filter(|task| task.completed).count();
    let percent = if total == 0 {
        0
    } else {
        ((completed * 200 + total) / (total * 2)) as u8
    };
    Progress {
        completed,
        total,
        percent,
    }
}

/// Splits into `(pending, completed)`, each keeping store order.
pub fn partition_by_completion(tasks: &[Task]) -> (Vec<&Task>, Vec<&Task>) {
    let (completed, pending): (Vec<&Task>, Vec<&Task>) =
        tasks.iter().partition(|task| task.completed);
    (pending, completed)
}
