//! Domain records exchanged with the task backend.
//!
//! Field names are `snake_case` on the wire, matching the REST contract.
//! Every record here is owned by the backend; the client only ever holds an
//! ephemeral copy.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{DependencyId, PriorityId, TaskId, UserId};
use crate::validation::{self, ValidationError};

// ─────────────────────────────────────────────────────────────────────────────
// Enums
// ─────────────────────────────────────────────────────────────────────────────

/// Task workflow status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Not started.
    #[default]
    Open,
    /// Currently being worked on.
    InProgress,
    /// Done.
    Completed,
    /// Waiting on something else.
    Blocked,
}

impl TaskStatus {
    /// Every status, in workflow order.
    pub const ALL: [Self; 4] = [Self::Open, Self::InProgress, Self::Completed, Self::Blocked];

    /// Wire representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Blocked => "blocked",
        }
    }

    /// Human-readable label (`in_progress` → `in progress`).
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in progress",
            Self::Completed => "completed",
            Self::Blocked => "blocked",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known [`TaskStatus`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown task status '{0}' (expected open, in_progress, completed or blocked)")]
pub struct UnknownStatus(pub String);

impl FromStr for TaskStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Records
// ─────────────────────────────────────────────────────────────────────────────

/// A priority level (static reference data).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Priority {
    /// Backend key.
    pub id: PriorityId,
    /// Display name, e.g. `High`.
    pub name: String,
    /// Sort weight among priorities; higher is more important.
    pub weight: i32,
}

impl Priority {
    /// Whether this is the "High" priority (case-insensitive).
    #[must_use]
    pub fn is_high(&self) -> bool {
        self.name.trim().eq_ignore_ascii_case("high")
    }
}

/// A task as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Backend key.
    pub id: TaskId,
    /// Short title.
    pub title: String,
    /// Optional free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// Workflow status.
    #[serde(default)]
    pub status: TaskStatus,
    /// Foreign key of the assigned priority.
    pub priority_id: PriorityId,
    /// Optional deadline.
    #[serde(default, with = "crate::time::option")]
    pub due_date: Option<DateTime<Utc>>,
    /// Owning user, when the backend includes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<UserId>,
    /// Creation time, when the backend includes it.
    #[serde(
        default,
        with = "crate::time::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update time.
    #[serde(
        default,
        with = "crate::time::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,
    /// Embedded priority record. Not checked against `priority_id`.
    #[serde(default)]
    pub priority: Option<Priority>,
}

impl Task {
    /// Whether the task is completed.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }

    /// Embedded priority name, if any.
    #[must_use]
    pub fn priority_name(&self) -> Option<&str> {
        self.priority.as_ref().map(|p| p.name.as_str())
    }

    /// Whether the embedded priority is "High".
    #[must_use]
    pub fn is_high_priority(&self) -> bool {
        self.priority.as_ref().is_some_and(Priority::is_high)
    }

    /// Due date strictly before `now` and not completed.
    #[must_use]
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        !self.is_completed() && self.due_date.is_some_and(|due| due < now)
    }

    /// Time remaining until the due date (negative once past), if any.
    #[must_use]
    pub fn time_until_due(&self, now: DateTime<Utc>) -> Option<Duration> {
        self.due_date.map(|due| due - now)
    }
}

/// A user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Backend key.
    pub id: UserId,
    /// Login name.
    pub username: String,
    /// Contact address.
    #[serde(default)]
    pub email: Option<String>,
    /// Account creation time.
    #[serde(
        default,
        with = "crate::time::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    /// Last profile update.
    #[serde(
        default,
        with = "crate::time::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A "depends-on" edge between two tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    /// Backend key of the edge.
    pub id: DependencyId,
    /// Task that owns the dependency list.
    pub task_id: TaskId,
    /// Task it depends on.
    pub dependent_task_id: TaskId,
}

/// Response of `POST /token`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Bearer token for subsequent calls.
    pub access_token: String,
    /// Token scheme, normally `bearer`.
    #[serde(default)]
    pub token_type: Option<String>,
    /// Logged-in user, when the backend includes it.
    #[serde(default)]
    pub user: Option<User>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Request payloads
// ─────────────────────────────────────────────────────────────────────────────

/// Payload for `POST /tasks`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskCreateParams {
    /// Required, non-blank, at most 100 characters.
    pub title: String,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Initial status; the backend defaults to `open`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    /// Assigned priority.
    pub priority_id: PriorityId,
    /// Optional deadline.
    #[serde(
        default,
        with = "crate::time::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub due_date: Option<DateTime<Utc>>,
}

impl TaskCreateParams {
    /// Minimal payload with a title and priority.
    pub fn new(title: impl Into<String>, priority_id: PriorityId) -> Self {
        Self {
            title: title.into(),
            description: None,
            status: None,
            priority_id,
            due_date: None,
        }
    }

    /// Run client-side validation.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::validate_task_create(self)
    }
}

/// Payload for `PUT /tasks/{id}`. Unset fields are left unchanged.
///
/// `description` and `due_date` are patches: `None` leaves the field alone,
/// `Some(None)` sends `null` and clears it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskUpdateParams {
    /// New title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New description, or `Some(None)` to clear it.
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<Option<String>>,
    /// New status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    /// New priority.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority_id: Option<PriorityId>,
    /// New deadline, or `Some(None)` to clear it.
    #[serde(
        default,
        with = "crate::time::patch",
        skip_serializing_if = "Option::is_none"
    )]
    pub due_date: Option<Option<DateTime<Utc>>>,
}

/// A field that is present in the payload, even as `null`.
fn present<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl TaskUpdateParams {
    /// Whether no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Run client-side validation.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::validate_task_update(self)
    }
}

/// Payload for `POST /users`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCreateParams {
    /// ASCII alphanumeric login name.
    pub username: String,
    /// At least 8 characters.
    pub password: String,
    /// Optional contact address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl UserCreateParams {
    /// Run client-side validation.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::validate_registration(self)
    }
}

/// Payload for `PUT /users/me`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserUpdateParams {
    /// New contact address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Payload for `POST /priorities`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityCreateParams {
    /// Display name; unique on the backend.
    pub name: String,
    /// Sort weight.
    pub weight: i32,
}

/// First day of a calendar week.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    /// Sunday-first weeks.
    #[default]
    Sunday,
    /// Monday-first (ISO) weeks.
    Monday,
}

impl WeekStart {
    /// The corresponding chrono weekday.
    pub fn weekday(self) -> chrono::Weekday {
        match self {
            Self::Sunday => chrono::Weekday::Sun,
            Self::Monday => chrono::Weekday::Mon,
        }
    }
}

impl FromStr for WeekStart {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sunday" | "sun" => Ok(Self::Sunday),
            "monday" | "mon" => Ok(Self::Monday),
            other => Err(format!("unknown week start: {other}")),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
