//! Unlock set and the store listener that grows it.

use crate::achievement::rules::is_satisfied;
use crate::model::achievement::AchievementId;
use crate::model::task::Task;
use crate::store::events::{StoreChange, StoreListener};
use log::info;

/// Ordered, duplicate-free set of unlocked achievements.
///
/// Insertion order is preserved so the persisted list reads in unlock order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnlockSet {
    ids: Vec<AchievementId>,
}

impl UnlockSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_ids(ids: impl IntoIterator<Item = AchievementId>) -> Self {
        let mut set = Self::new();
        for id in ids {
            set.insert(id);
        }
        set
    }

    /// Returns `true` when `id` was not already present.
    pub fn insert(&mut self, id: AchievementId) -> bool {
        if self.contains(id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    pub fn contains(&self, id: AchievementId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> &[AchievementId] {
        &self.ids
    }
}

/// Evaluates every locked achievement once against `tasks`.
///
/// Returns the ids unlocked by this pass, in catalog order.
pub fn evaluate(tasks: &[Task], unlocked: &mut UnlockSet) -> Vec<AchievementId> {
    let unlocked_before = unlocked.len();
    let mut newly_unlocked = Vec::new();
    for id in AchievementId::ALL {
        if unlocked.contains(id) {
            continue;
        }
        if is_satisfied(id, tasks, unlocked_before) && unlocked.insert(id) {
            newly_unlocked.push(id);
        }
    }
    newly_unlocked
}

/// Store listener that re-evaluates achievements on every change.
#[derive(Debug, Default)]
pub struct AchievementTracker {
    unlocked: UnlockSet,
    pending: Vec<AchievementId>,
}

impl AchievementTracker {
    pub fn new(unlocked: UnlockSet) -> Self {
        Self {
            unlocked,
            pending: Vec::new(),
        }
    }

    pub fn unlocked(&self) -> &UnlockSet {
        &self.unlocked
    }

    /// Drains ids unlocked since the last call.
    pub fn take_newly_unlocked(&mut self) -> Vec<AchievementId> {
        std::mem::take(&mut self.pending)
    }
}

impl StoreListener for AchievementTracker {
    fn on_store_changed(&mut self, change: &StoreChange<'_>) {
        let newly_unlocked = evaluate(change.tasks, &mut self.unlocked);
        for id in &newly_unlocked {
            info!(
                "event=achievement_unlocked module=achievement status=ok id={} trigger={}",
                id,
                change.event.name()
            );
        }
        self.pending.extend(newly_unlocked);
    }
}
