//! Unlock predicates.
//!
//! Each predicate reads the task list plus the unlock-set size captured
//! before the current evaluation pass.

use crate::model::achievement::{AchievementId, EARLY_BIRD_BEFORE_HOUR};
use crate::model::task::Task;
use chrono::Timelike;

/// Returns whether `id`'s predicate holds.
///
/// `unlocked_before` is the unlock-set size at the start of the pass; the
/// badge collector compares against it, so unlocks granted in the same
/// pass only count on the next one.
pub fn is_satisfied(id: AchievementId, tasks: &[Task], unlocked_before: usize) -> bool {
    let threshold = id.definition().threshold;
    match id {
        AchievementId::EarlyBird => count(tasks, is_early_completion) >= threshold as usize,
        AchievementId::DeepFocus => tasks
            .iter()
            .any(|task| task.time_spent_minutes() >= threshold),
        AchievementId::OnTime => count(tasks, is_on_time_completion) >= threshold as usize,
        AchievementId::BadgeCollector => unlocked_before >= threshold as usize,
    }
}

/// Completed and created before the early-bird cutoff hour (local time).
pub fn is_early_completion(task: &Task) -> bool {
    task.completed && task.created_at().hour() < EARLY_BIRD_BEFORE_HOUR
}

/// Completed, has a due date, and was created no later than it.
///
/// Completion time is not recorded, so creation time stands in for it.
pub fn is_on_time_completion(task: &Task) -> bool {
    task.completed
        && task
            .due_date
            .is_some_and(|due_date| task.created_at() <= due_date)
}

fn count(tasks: &[Task], predicate: impl Fn(&Task) -> bool) -> usize {
    tasks.iter().filter(|task| predicate(task)).count()
}
