//! Achievement identifiers and static badge definitions.
//!
//! # Invariants
//! - Definitions are static; only the set of unlocked ids is mutable state.
//! - Catalog order is the evaluation order.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementId {
    /// Completed tasks created before 10:00.
    EarlyBird,
    /// A single task tracked for two hours or more.
    DeepFocus,
    /// Completed tasks that met their due date.
    OnTime,
    /// Unlocked enough other badges.
    BadgeCollector,
}

impl AchievementId {
    pub const ALL: [AchievementId; 4] = [
        AchievementId::EarlyBird,
        AchievementId::DeepFocus,
        AchievementId::OnTime,
        AchievementId::BadgeCollector,
    ];

    /// Stable identifier used in persisted unlock lists.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::EarlyBird => "early_bird",
            Self::DeepFocus => "deep_focus",
            Self::OnTime => "on_time",
            Self::BadgeCollector => "badge_collector",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.as_str() == value.trim())
    }

    pub fn definition(self) -> &'static AchievementDefinition {
        match self {
            Self::EarlyBird => &CATALOG[0],
            Self::DeepFocus => &CATALOG[1],
            Self::OnTime => &CATALOG[2],
            Self::BadgeCollector => &CATALOG[3],
        }
    }
}

impl Display for AchievementId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static badge metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AchievementDefinition {
    pub id: AchievementId,
    pub name: &'static str,
    pub description: &'static str,
    /// Count (or minutes, for deep focus) the unlock predicate compares against.
    pub threshold: u32,
}

/// Latest hour-of-day (exclusive) counted as an early start.
pub const EARLY_BIRD_BEFORE_HOUR: u32 = 10;

pub const CATALOG: [AchievementDefinition; 4] = [
    AchievementDefinition {
        id: AchievementId::EarlyBird,
        name: "Early Bird",
        description: "Complete 3 tasks that were created before 10 AM",
        threshold: 3,
    },
    AchievementDefinition {
        id: AchievementId::DeepFocus,
        name: "Deep Focus",
        description: "Track at least 2 hours on a single task",
        threshold: 120,
    },
    AchievementDefinition {
        id: AchievementId::OnTime,
        name: "Always On Time",
        description: "Complete 5 tasks by their due date",
        threshold: 5,
    },
    AchievementDefinition {
        id: AchievementId::BadgeCollector,
        name: "Badge Collector",
        description: "Unlock 3 other badges",
        threshold: 3,
    },
];
