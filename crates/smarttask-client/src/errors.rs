//! Client error types.

use smarttask_auth::AuthError;
use smarttask_core::ValidationError;

/// Errors returned by [`ApiClient`](crate::ApiClient) calls.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Transport failure: connection refused, timeout, TLS.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body did not match the expected shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The server rejected the bearer token. The stored token has been
    /// cleared.
    #[error("unauthorized: {detail}")]
    Unauthorized {
        /// Server-provided detail.
        detail: String,
    },

    /// `POST /token` rejected the username/password pair.
    #[error("invalid credentials: {detail}")]
    InvalidCredentials {
        /// Server-provided detail.
        detail: String,
    },

    /// Any other non-success status.
    #[error("server returned {status}: {detail}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Server-provided detail, or the raw body.
        detail: String,
    },

    /// Payload failed client-side validation; nothing was sent.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Reading or writing the token store failed.
    #[error("auth storage error: {0}")]
    Auth(#[from] AuthError),

    /// An operation that needs a token was called while logged out.
    #[error("not logged in")]
    NotLoggedIn,
}

impl ClientError {
    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { .. } | Self::InvalidCredentials { .. } => Some(401),
            Self::Status { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Server-provided detail message, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Unauthorized { detail }
            | Self::InvalidCredentials { detail }
            | Self::Status { detail, .. } => Some(detail),
            _ => None,
        }
    }

    /// Whether the caller must log in again.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. } | Self::NotLoggedIn)
    }

    /// Whether the server answered 404.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Pull a human-readable message out of an error body.
///
/// The backend answers `{"detail": "..."}` for most errors and
/// `{"detail": [{"msg": "...", ...}, ...]}` for request validation errors.
/// Anything else is returned verbatim (or the status reason if empty).
pub(crate) fn extract_detail(body: &str, fallback: &str) -> String {
    let detail = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("detail").cloned());
    match detail {
        Some(serde_json::Value::String(s)) => s,
        Some(serde_json::Value::Array(items)) => {
            let msgs: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(serde_json::Value::as_str))
                .collect();
            if msgs.is_empty() {
                fallback.to_string()
            } else {
                msgs.join("; ")
            }
        }
        _ if body.trim().is_empty() => fallback.to_string(),
        _ => body.trim().to_string(),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
