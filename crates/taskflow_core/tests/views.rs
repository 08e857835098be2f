use chrono::{DateTime, Local, NaiveDate, TimeZone, Weekday};
use taskflow_core::{
    category_breakdown, classify, monthly_summary, partition_by_completion, today_tasks,
    weekly_summary, Category, CategoryCount, CompletionSplit, NewTask, Task, TaskId, TaskStatus,
};

fn at(month: u32, day: u32, hour: u32) -> DateTime<Local> {
    Local.with_ymd_and_hms(2026, month, day, hour, 0, 0).single().unwrap()
}

fn created(id: &str, created_at: DateTime<Local>) -> Task {
    Task::create(TaskId::new(id), &NewTask::new(id), created_at).unwrap()
}

fn from_json(json: &str) -> Vec<Task> {
    serde_json::from_str(json).unwrap()
}

#[test]
fn category_breakdown_counts_missing_category_as_other() {
    let created_at = at(3, 10, 9).to_rfc3339();
    let tasks = from_json(&format!(
        r#"[
            {{"id":"A","title":"a","createdAt":"{created_at}","category":"Work"}},
            {{"id":"B","title":"b","createdAt":"{created_at}","category":"Work"}},
            {{"id":"C","title":"c","createdAt":"{created_at}","category":null}}
        ]"#
    ));

    assert_eq!(
        category_breakdown(&tasks),
        vec![
            CategoryCount {
                category: Category::Work,
                count: 2
            },
            CategoryCount {
                category: Category::Other,
                count: 1
            },
        ]
    );
}

#[test]
fn today_view_lists_only_tasks_due_today_in_time_order() {
    let now = at(3, 10, 11);
    let mut late = created("late", at(3, 1, 9));
    late.due_date = Some(at(3, 10, 21));
    let mut early = created("early", at(3, 2, 9));
    early.due_date = Some(at(3, 10, 8));
    let mut tomorrow = created("tomorrow", at(3, 3, 9));
    tomorrow.due_date = Some(at(3, 11, 8));
    let undated = created("undated", at(3, 4, 9));

    let tasks = vec![late, tomorrow, undated, early];
    let today: Vec<(&str, TaskStatus)> = today_tasks(&tasks, now)
        .into_iter()
        .map(|task| (task.title.as_str(), classify(task, now)))
        .collect();

    assert_eq!(
        today,
        vec![("early", TaskStatus::Overdue), ("late", TaskStatus::Today)]
    );
}

#[test]
fn weekly_summary_covers_monday_to_sunday_of_current_week() {
    // 2026-03-11 is a Wednesday.
    let now = at(3, 11, 15);
    let mut monday_done = created("monday-done", at(3, 9, 10));
    monday_done.completed = true;
    let monday_open = created("monday-open", at(3, 9, 16));
    let sunday_open = created("sunday-open", at(3, 15, 20));
    let previous_week = created("previous-sunday", at(3, 8, 20));

    let summary = weekly_summary(&[monday_done, monday_open, sunday_open, previous_week], now);

    assert_eq!(summary.len(), 7);
    assert_eq!(summary[0].weekday, Weekday::Mon);
    assert_eq!(summary[0].date, NaiveDate::from_ymd_opt(2026, 3, 9).unwrap());
    assert_eq!(
        summary[0].split,
        CompletionSplit {
            completed: 1,
            pending: 1
        }
    );
    assert_eq!(summary[6].weekday, Weekday::Sun);
    assert_eq!(summary[6].split.pending, 1);
    let total: usize = summary.iter().map(|day| day.split.total()).sum();
    assert_eq!(total, 3);
}

#[test]
fn monthly_summary_counts_tasks_created_this_month() {
    let now = at(3, 20, 12);
    let mut done = created("done", at(3, 1, 9));
    done.completed = true;
    let open = created("open", at(3, 31, 22));
    let february = created("february", at(2, 28, 9));

    assert_eq!(
        monthly_summary(&[done, open, february], now),
        CompletionSplit {
            completed: 1,
            pending: 1
        }
    );
}

#[test]
fn partition_keeps_store_order_within_groups() {
    let mut first = created("first", at(3, 1, 9));
    first.completed = true;
    let second = created("second", at(3, 2, 9));
    let mut third = created("third", at(3, 3, 9));
    third.completed = true;
    let fourth = created("fourth", at(3, 4, 9));
    let tasks = vec![first, second, third, fourth];

    let (pending, completed) = partition_by_completion(&tasks);
    let titles = |group: &[&Task]| group.iter().map(|task| task.title.clone()).collect::<Vec<_>>();
    assert_eq!(titles(&pending), vec!["second", "fourth"]);
    assert_eq!(titles(&completed), vec!["first", "third"]);
}
