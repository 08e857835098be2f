//! Default task set used when no usable persisted list exists.

use crate::model::task::{Category, IdSource, NewTask, Priority, Task};
use chrono::{DateTime, Duration, Local, NaiveTime};

/// Session construction options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionOptions {
    /// Seed a small sample list instead of an empty one.
    pub sample_tasks: bool,
}

/// Builds the fallback task list, newest first.
pub fn default_tasks(
    options: SessionOptions,
    now: DateTime<Local>,
    ids: &mut dyn IdSource,
) -> Vec<Task> {
    if !options.sample_tasks {
        return Vec::new();
    }

    let requests = [
        NewTask::new("Review weekly goals")
            .category(Category::Work)
            .priority(Priority::High)
            .due(later_today(now, 17)),
        NewTask::new("30 minute walk")
            .category(Category::Health)
            .priority(Priority::Medium)
            .due(later_today(now, 19)),
        NewTask::new("Read one chapter")
            .category(Category::Education)
            .priority(Priority::Low)
            .notes("Any book from the reading list"),
        NewTask::new("Water the plants")
            .category(Category::Home)
            .priority(Priority::Low)
            .due(now + Duration::days(1)),
    ];

    let mut tasks: Vec<Task> = requests
        .iter()
        .filter_map(|request| Task::create(ids.next_id(), request, now).ok())
        .collect();
    tasks.reverse();
    tasks
}

/// `hour:00` today, or one hour from now if that time already passed.
fn later_today(now: DateTime<Local>, hour: u32) -> DateTime<Local> {
    NaiveTime::from_hms_opt(hour, 0, 0)
        .and_then(|time| now.date_naive().and_time(time).and_local_timezone(Local).single())
        .filter(|candidate| *candidate > now)
        .unwrap_or_else(|| now + Duration::hours(1))
}

#[cfg(test)]
mod tests {
    use super::{default_tasks, SessionOptions};
    use crate::model::task::SequentialIdSource;
    use chrono::{Local, TimeZone};

    #[test]
    fn sample_tasks_are_opt_in() {
        let now = Local.with_ymd_and_hms(2026, 3, 10, 9, 0, 0).single().unwrap();
        let mut ids = SequentialIdSource::new();

        assert!(default_tasks(SessionOptions::default(), now, &mut ids).is_empty());

        let samples = default_tasks(SessionOptions { sample_tasks: true }, now, &mut ids);
        assert_eq!(samples.len(), 4);
        assert!(samples.iter().all(|task| !task.completed && task.created_at() == now));
        assert!(samples
            .iter()
            .filter_map(|task| task.due_date)
            .all(|due| due > now));
    }
}
