//! Heuristic task recommendations.
//!
//! Tasks are bucketed by four fixed rules, each with a weight that orders
//! the output:
//!
//! | kind            | weight | rule                                              |
//! |-----------------|--------|---------------------------------------------------|
//! | `overdue`       | 10     | due before now, not completed; oldest first       |
//! | `high-priority` | 8      | priority named "High", not completed; input order |
//! | `due-soon`      | 7      | due in `(now, now + window]`, not completed       |
//! | `in-progress`   | 5      | status `in_progress`                              |
//!
//! A task may appear in several buckets. Empty buckets are omitted. The
//! engine is total: any input, including an empty one, yields a result.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use smarttask_core::{Task, TaskStatus, Tone};

// ─────────────────────────────────────────────────────────────────────────────
// Kinds
// ─────────────────────────────────────────────────────────────────────────────

/// Recommendation bucket kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecommendationKind {
    /// Past due and not completed.
    Overdue,
    /// High priority and not completed.
    HighPriority,
    /// Due within the configured window.
    DueSoon,
    /// Currently in progress.
    InProgress,
}

/// Error returned when parsing an unknown kind slug.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown recommendation kind: {0}")]
pub struct UnknownKind(pub String);

impl RecommendationKind {
    /// Every kind, highest weight first.
    pub const ALL: [Self; 4] = [
        Self::Overdue,
        Self::HighPriority,
        Self::DueSoon,
        Self::InProgress,
    ];

    /// Ordering weight; higher is shown first.
    pub fn weight(self) -> u8 {
        match self {
            Self::Overdue => 10,
            Self::HighPriority => 8,
            Self::DueSoon => 7,
            Self::InProgress => 5,
        }
    }

    /// URL-safe identifier, as used by `?type=` links.
    pub fn slug(self) -> &'static str {
        match self {
            Self::Overdue => "overdue",
            Self::HighPriority => "high-priority",
            Self::DueSoon => "due-soon",
            Self::InProgress => "in-progress",
        }
    }

    /// Heading shown above the bucket.
    pub fn title(self) -> &'static str {
        match self {
            Self::Overdue => "Overdue Tasks",
            Self::HighPriority => "High Priority Tasks",
            Self::DueSoon => "Tasks Due Soon",
            Self::InProgress => "Tasks In Progress",
        }
    }

    /// Display tone of the bucket.
    pub fn tone(self) -> Tone {
        match self {
            Self::Overdue => Tone::Error,
            Self::HighPriority => Tone::Warning,
            Self::DueSoon => Tone::Info,
            Self::InProgress => Tone::Success,
        }
    }

    /// Summary sentence for `count` matching tasks.
    pub fn describe(self, count: usize, config: &RecommendationConfig) -> String {
        let s = if count == 1 { "" } else { "s" };
        match self {
            Self::Overdue => {
                format!("You have {count} overdue task{s}. Consider addressing these first.")
            }
            Self::HighPriority => format!(
                "You have {count} high priority task{s} that should be addressed soon."
            ),
            Self::DueSoon => format!(
                "You have {count} task{s} due in the next {} hours.",
                config.due_soon_window.num_hours()
            ),
            Self::InProgress => format!(
                "You have {count} task{s} in progress. Consider finishing these to maintain momentum."
            ),
        }
    }

    /// Whether `task` belongs in this bucket at `now`.
    pub fn matches(self, task: &Task, now: DateTime<Utc>, config: &RecommendationConfig) -> bool {
        match self {
            Self::Overdue => task.is_overdue(now),
            Self::HighPriority => !task.is_completed() && task.is_high_priority(),
            Self::DueSoon => {
                !task.is_completed()
                    && task.time_until_due(now).is_some_and(|remaining| {
                        remaining > Duration::zero() && remaining <= config.due_soon_window
                    })
            }
            Self::InProgress => task.status == TaskStatus::InProgress,
        }
    }

    fn sorts_by_due_date(self) -> bool {
        matches!(self, Self::Overdue | Self::DueSoon)
    }
}

impl fmt::Display for RecommendationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for RecommendationKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|kind| kind.slug() == normalized)
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Config / output
// ─────────────────────────────────────────────────────────────────────────────

/// Tunables for the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecommendationConfig {
    /// Upper bound (inclusive) of the due-soon window.
    pub due_soon_window: Duration,
    /// Tasks kept per bucket.
    pub max_tasks: usize,
}

impl RecommendationConfig {
    /// Config with a due-soon window of `hours` and `max_tasks` per bucket.
    pub fn new(hours: u32, max_tasks: usize) -> Self {
        Self {
            due_soon_window: Duration::hours(i64::from(hours)),
            max_tasks,
        }
    }
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self::new(48, 3)
    }
}

/// One non-empty bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    /// Which rule produced it.
    pub kind: RecommendationKind,
    /// Heading.
    pub title: String,
    /// Summary sentence, counting every match.
    pub description: String,
    /// At most `max_tasks` matches, in bucket order.
    pub tasks: Vec<Task>,
    /// Number of matches before truncation.
    pub total: usize,
    /// Ordering weight.
    pub priority: u8,
}

impl Recommendation {
    /// Matches not shown in `tasks`.
    pub fn hidden(&self) -> usize {
        self.total.saturating_sub(self.tasks.len())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Engine
// ─────────────────────────────────────────────────────────────────────────────

/// Every task matching `kind`, untruncated, in bucket order.
pub fn matching_tasks(
    kind: RecommendationKind,
    tasks: &[Task],
    now: DateTime<Utc>,
    config: &RecommendationConfig,
) -> Vec<Task> {
    let mut matched: Vec<Task> = tasks
        .iter()
        .filter(|task| kind.matches(task, now, config))
        .cloned()
        .collect();
    if kind.sorts_by_due_date() {
        // Stable: ties keep input order.
        matched.sort_by_key(|task| task.due_date);
    }
    matched
}

/// Bucket `tasks` with the default config.
pub fn recommend(tasks: &[Task], now: DateTime<Utc>) -> Vec<Recommendation> {
    recommend_with(tasks, now, &RecommendationConfig::default())
}

/// Bucket `tasks` at `now`, highest weight first.
pub fn recommend_with(
    tasks: &[Task],
    now: DateTime<Utc>,
    config: &RecommendationConfig,
) -> Vec<Recommendation> {
    let mut buckets: Vec<Recommendation> = RecommendationKind::ALL
        .into_iter()
        .filter_map(|kind| {
            let mut matched = matching_tasks(kind, tasks, now, config);
            if matched.is_empty() {
                return None;
            }
            let total = matched.len();
            matched.truncate(config.max_tasks);
            Some(Recommendation {
                kind,
                title: kind.title().to_string(),
                description: kind.describe(total, config),
                tasks: matched,
                total,
                priority: kind.weight(),
            })
        })
        .collect();
    buckets.sort_by(|a, b| b.priority.cmp(&a.priority));
    tracing::debug!(
        input = tasks.len(),
        buckets = buckets.len(),
        "computed recommendations"
    );
    buckets
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
