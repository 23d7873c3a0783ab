//! The single error type views surface.

use smarttask_client::ClientError;

/// User-facing messages.
pub mod messages {
    /// List view fetch failed.
    pub const LOAD_TASKS: &str = "Failed to load tasks. Please try again later.";
    /// Calendar view fetch failed.
    pub const LOAD_CALENDAR: &str = "Failed to load calendar data. Please try again later.";
    /// Detail view fetch failed.
    pub const LOAD_DETAIL: &str = "Failed to load task details. Please try again later.";
    /// Recommendations fetch failed.
    pub const LOAD_RECOMMENDATIONS: &str =
        "Failed to generate recommendations. Please try again later.";
    /// Dashboard fetch failed.
    pub const LOAD_DASHBOARD: &str = "Failed to load dashboard data. Please try again later.";
    /// Task creation failed.
    pub const CREATE_TASK: &str = "Failed to create task. Please try again.";
    /// Task update failed.
    pub const UPDATE_TASK: &str = "Failed to update task. Please try again.";
    /// Task deletion failed.
    pub const DELETE_TASK: &str = "Failed to delete task. Please try again.";
    /// Adding a dependency failed.
    pub const ADD_DEPENDENCY: &str = "Failed to add dependency. Please try again.";
    /// Removing a dependency failed.
    pub const REMOVE_DEPENDENCY: &str = "Failed to remove dependency. Please try again.";
    /// Login failed without a server explanation.
    pub const LOGIN: &str = "Failed to login. Please check your credentials.";
    /// Registration failed without a server explanation.
    pub const REGISTER: &str = "Failed to register. Please try again.";
    /// Profile update failed without a server explanation.
    pub const UPDATE_PROFILE: &str = "Failed to update profile. Please try again.";
    /// The stored token was rejected.
    pub const SESSION_EXPIRED: &str = "Session expired. Please login again.";
}

/// A failed view operation: one message for the user, the cause for logs.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct ViewError {
    /// What to show.
    pub message: String,
    /// What actually went wrong.
    #[source]
    pub source: Option<ClientError>,
}

impl ViewError {
    /// Error with no underlying cause.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Map a client failure to `fallback`, or to the session-expired message
    /// when the token was rejected. Transport and validation failures look
    /// the same to the user.
    pub fn from_client(fallback: &str, err: ClientError) -> Self {
        let message = if err.is_unauthorized() {
            messages::SESSION_EXPIRED
        } else {
            fallback
        };
        tracing::warn!(error = %err, shown = message, "view operation failed");
        Self {
            message: message.to_string(),
            source: Some(err),
        }
    }

    /// Like [`from_client`](Self::from_client) but prefers the server's
    /// `detail` (or the validation summary) when there is one. Used by the
    /// account forms.
    pub fn with_detail(fallback: &str, err: ClientError) -> Self {
        let message = match &err {
            ClientError::Validation(v) => v.to_string(),
            other => other.detail().unwrap_or(fallback).to_string(),
        };
        tracing::warn!(error = %err, shown = %message, "account operation failed");
        Self {
            message,
            source: Some(err),
        }
    }

    /// Whether the user has to log in again.
    pub fn is_session_expired(&self) -> bool {
        self.source.as_ref().is_some_and(ClientError::is_unauthorized)
    }
}

/// Shorthand for view results.
pub type Result<T> = std::result::Result<T, ViewError>;

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use smarttask_core::{PriorityId, TaskCreateParams};

    #[test]
    fn status_errors_use_fallback() {
        let err = ViewError::from_client(
            messages::LOAD_TASKS,
            ClientError::Status {
                status: 500,
                detail: "boom".to_string(),
            },
        );
        assert_eq!(err.to_string(), messages::LOAD_TASKS);
        assert!(err.source.is_some());
        assert!(!err.is_session_expired());
    }

    #[test]
    fn validation_errors_look_like_any_other_failure() {
        let validation = TaskCreateParams::new("", PriorityId::new(1))
            .validate()
            .unwrap_err();
        let err = ViewError::from_client(messages::CREATE_TASK, validation.into());
        assert_eq!(err.message, messages::CREATE_TASK);
    }

    #[test]
    fn unauthorized_means_session_expired() {
        let err = ViewError::from_client(
            messages::LOAD_DETAIL,
            ClientError::Unauthorized {
                detail: "Could not validate credentials".to_string(),
            },
        );
        assert_eq!(err.message, messages::SESSION_EXPIRED);
        assert!(err.is_session_expired());
    }

    #[test]
    fn account_forms_prefer_server_detail() {
        let err = ViewError::with_detail(
            messages::LOGIN,
            ClientError::InvalidCredentials {
                detail: "Incorrect username or password".to_string(),
            },
        );
        assert_eq!(err.message, "Incorrect username or password");

        let err = ViewError::with_detail(
            messages::LOGIN,
            ClientError::Json(serde_json::from_str::<u8>("x").unwrap_err()),
        );
        assert_eq!(err.message, messages::LOGIN);
    }
}
