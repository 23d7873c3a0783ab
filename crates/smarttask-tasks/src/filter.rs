//! Client-side filtering of a fetched task list.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use smarttask_core::{PriorityId, Task, TaskStatus};

use crate::recommend::{RecommendationConfig, RecommendationKind, matching_tasks};

/// Which tasks to keep by status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CompletionFilter {
    /// Everything.
    #[default]
    All,
    /// Anything not completed.
    Open,
    /// Completed only.
    Completed,
    /// Exactly this status.
    Status(TaskStatus),
}

/// Error returned when parsing an unknown completion filter.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown status filter: {0}")]
pub struct UnknownCompletion(pub String);

impl CompletionFilter {
    /// Whether `status` passes.
    pub fn accepts(self, status: TaskStatus) -> bool {
        match self {
            Self::All => true,
            Self::Open => status != TaskStatus::Completed,
            Self::Completed => status == TaskStatus::Completed,
            Self::Status(wanted) => status == wanted,
        }
    }

    /// The single status the server can filter on, if this filter maps to one.
    pub fn exact_status(self) -> Option<TaskStatus> {
        match self {
            Self::Completed => Some(TaskStatus::Completed),
            Self::Status(status) => Some(status),
            Self::All | Self::Open => None,
        }
    }
}

impl fmt::Display for CompletionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Open => f.write_str("open"),
            Self::Completed => f.write_str("completed"),
            Self::Status(status) => f.write_str(status.as_str()),
        }
    }
}

impl FromStr for CompletionFilter {
    type Err = UnknownCompletion;

    /// `all`, `open` (= not completed), `completed`, or any exact status.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Ok(Self::All),
            "open" | "pending" => Ok(Self::Open),
            "completed" | "done" => Ok(Self::Completed),
            other => other
                .parse::<TaskStatus>()
                .map(Self::Status)
                .map_err(|_| UnknownCompletion(s.to_string())),
        }
    }
}

/// Conjunction of optional criteria. The default keeps everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    /// Keep only this priority.
    pub priority_id: Option<PriorityId>,
    /// Keep by status.
    pub completion: CompletionFilter,
    /// Case-insensitive title substring.
    pub text: Option<String>,
    /// Keep only the tasks a recommendation bucket would hold, untruncated.
    pub kind: Option<RecommendationKind>,
}

impl TaskFilter {
    /// Filter that keeps everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to one priority.
    #[must_use]
    pub fn priority(mut self, id: PriorityId) -> Self {
        self.priority_id = Some(id);
        self
    }

    /// Restrict by status.
    #[must_use]
    pub fn completion(mut self, completion: CompletionFilter) -> Self {
        self.completion = completion;
        self
    }

    /// Restrict to titles containing `text`. Blank text is ignored.
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.text = (!text.trim().is_empty()).then_some(text);
        self
    }

    /// Restrict to a recommendation bucket.
    #[must_use]
    pub fn kind(mut self, kind: RecommendationKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Whether no criterion is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Whether `task` passes every criterion except `kind`.
    pub fn matches(&self, task: &Task) -> bool {
        if self.priority_id.is_some_and(|id| task.priority_id != id) {
            return false;
        }
        if !self.completion.accepts(task.status) {
            return false;
        }
        if let Some(ref needle) = self.text {
            let needle = needle.trim().to_lowercase();
            if !task.title.to_lowercase().contains(&needle) {
                return false;
            }
        }
        true
    }

    /// Apply every criterion. Input order is kept unless `kind` is set, in
    /// which case the bucket's own ordering applies.
    pub fn apply(
        &self,
        tasks: &[Task],
        now: DateTime<Utc>,
        config: &RecommendationConfig,
    ) -> Vec<Task> {
        let kept: Vec<Task> = tasks.iter().filter(|t| self.matches(t)).cloned().collect();
        match self.kind {
            Some(kind) => matching_tasks(kind, &kept, now, config),
            None => kept,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
