//! Stored credential shapes.

use serde::{Deserialize, Serialize};

/// Current on-disk format version.
pub const AUTH_STORAGE_VERSION: u32 = 1;

/// A bearer token plus who it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    /// Opaque access token issued by `POST /token`.
    pub access_token: String,
    /// Token scheme reported by the server.
    #[serde(default = "default_token_type")]
    pub token_type: String,
    /// Username the token was issued for, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

impl Credentials {
    /// Bearer credentials for a raw token.
    pub fn bearer(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            token_type: default_token_type(),
            username: None,
        }
    }

    /// Attach the owning username.
    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Value for the `Authorization` header. The scheme is always sent as
    /// `Bearer` regardless of the case the server used.
    pub fn authorization_header(&self) -> String {
        format!("Bearer {}", self.access_token)
    }
}

/// Contents of `auth.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthStorage {
    /// Format version; only [`AUTH_STORAGE_VERSION`] is accepted on load.
    pub version: u32,
    /// The stored token.
    #[serde(flatten)]
    pub credentials: Credentials,
    /// RFC 3339 time of the last write.
    #[serde(default)]
    pub last_updated: String,
}

impl AuthStorage {
    /// Wrap credentials at the current format version.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            version: AUTH_STORAGE_VERSION,
            credentials,
            last_updated: String::new(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
