//! Client-side validation, run before any request leaves the process.
//!
//! Rules match the backend schema so obviously bad input never costs a
//! round-trip: task titles are required and capped at 100 characters,
//! usernames are ASCII alphanumeric, passwords have at least 8 characters.

use crate::types::{TaskCreateParams, TaskUpdateParams, UserCreateParams};

/// Maximum task title length, in characters.
pub const MAX_TITLE_LEN: usize = 100;

/// Minimum password length, in characters.
pub const MIN_PASSWORD_LEN: usize = 8;

/// A single rejected field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Payload field name.
    pub field: &'static str,
    /// What is wrong with it.
    pub message: String,
}

/// One or more rejected fields. Displays as the messages joined by `"; "`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", join_messages(.issues))]
pub struct ValidationError {
    /// Rejected fields, in payload order.
    pub issues: Vec<ValidationIssue>,
}

impl ValidationError {
    /// Message for a specific field, if it was rejected.
    pub fn for_field(&self, field: &str) -> Option<&str> {
        self.issues
            .iter()
            .find(|issue| issue.field == field)
            .map(|issue| issue.message.as_str())
    }
}

fn join_messages(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(|i| i.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Collects issues and converts to a `Result` at the end.
#[derive(Default)]
struct Issues(Vec<ValidationIssue>);

impl Issues {
    fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(ValidationIssue {
            field,
            message: message.into(),
        });
    }

    fn finish(self) -> Result<(), ValidationError> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { issues: self.0 })
        }
    }
}

fn check_title(issues: &mut Issues, title: &str) {
    if title.trim().is_empty() {
        issues.push("title", "Title is required");
    } else if title.chars().count() > MAX_TITLE_LEN {
        issues.push(
            "title",
            format!("Title must be at most {MAX_TITLE_LEN} characters"),
        );
    }
}

/// Validate a task creation payload.
pub fn validate_task_create(params: &TaskCreateParams) -> Result<(), ValidationError> {
    let mut issues = Issues::default();
    check_title(&mut issues, &params.title);
    issues.finish()
}

/// Validate a task update payload. Only fields being changed are checked.
pub fn validate_task_update(params: &TaskUpdateParams) -> Result<(), ValidationError> {
    let mut issues = Issues::default();
    if let Some(ref title) = params.title {
        check_title(&mut issues, title);
    }
    issues.finish()
}

/// Validate a registration payload.
pub fn validate_registration(params: &UserCreateParams) -> Result<(), ValidationError> {
    let mut issues = Issues::default();
    if params.username.is_empty() {
        issues.push("username", "Username is required");
    } else if !params.username.chars().all(|c| c.is_ascii_alphanumeric()) {
        issues.push("username", "Username must be alphanumeric");
    }
    if params.password.chars().count() < MIN_PASSWORD_LEN {
        issues.push(
            "password",
            format!("Password must be at least {MIN_PASSWORD_LEN} characters"),
        );
    }
    issues.finish()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::PriorityId;

    #[test]
    fn blank_title_rejected() {
        let params = TaskCreateParams::new("   ", PriorityId::new(1));
        let err = params.validate().unwrap_err();
        assert_eq!(err.for_field("title"), Some("Title is required"));
    }

    #[test]
    fn long_title_rejected() {
        let params = TaskCreateParams::new("x".repeat(101), PriorityId::new(1));
        let err = params.validate().unwrap_err();
        assert!(err.to_string().contains("at most 100"));
    }

    #[test]
    fn title_at_limit_accepted() {
        let params = TaskCreateParams::new("x".repeat(100), PriorityId::new(1));
        assert!(params.validate().is_ok());
    }

    #[test]
    fn update_without_title_is_valid() {
        assert!(TaskUpdateParams::default().validate().is_ok());
        let update = TaskUpdateParams {
            title: Some(String::new()),
            ..Default::default()
        };
        assert!(update.validate().is_err());
    }

    #[test]
    fn registration_collects_all_issues() {
        let params = UserCreateParams {
            username: "bad name!".to_string(),
            password: "short".to_string(),
            email: None,
        };
        let err = params.validate().unwrap_err();
        assert_eq!(err.issues.len(), 2);
        assert_eq!(err.for_field("username"), Some("Username must be alphanumeric"));
        assert!(err.for_field("password").is_some());
        assert!(err.to_string().contains("; "));
    }

    #[test]
    fn display_joins_in_payload_order() {
        let err = ValidationError {
            issues: vec![
                ValidationIssue {
                    field: "username",
                    message: "Username is required".to_string(),
                },
                ValidationIssue {
                    field: "password",
                    message: "Password must be at least 8 characters".to_string(),
                },
            ],
        };
        assert_eq!(
            err.to_string(),
            "Username is required; Password must be at least 8 characters"
        );
        let boxed: Box<dyn std::error::Error> = Box::new(err);
        assert!(boxed.source().is_none());
    }

    #[test]
    fn registration_accepts_valid_input() {
        let params = UserCreateParams {
            username: "alice42".to_string(),
            password: "correcthorse".to_string(),
            email: Some("alice@example.com".to_string()),
        };
        assert!(params.validate().is_ok());
    }
}
