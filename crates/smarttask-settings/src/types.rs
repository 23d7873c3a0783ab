//! Settings sections.
//!
//! Every struct uses `#[serde(rename_all = "camelCase", default)]` so a user
//! file only needs the keys it overrides.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use smarttask_core::WeekStart;

use crate::errors::{Result, SettingsError};

/// Root settings object.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SmartTaskSettings {
    /// Settings schema version.
    pub version: String,
    /// REST backend connection.
    pub api: ApiSettings,
    /// Token storage.
    pub auth: AuthSettings,
    /// Log output.
    pub logging: LoggingSettings,
    /// Calendar view.
    pub calendar: CalendarSettings,
    /// Recommendation engine tuning.
    pub recommendations: RecommendationSettings,
}

impl Default for SmartTaskSettings {
    fn default() -> Self {
        Self {
            version: "0.1.0".to_string(),
            api: ApiSettings::default(),
            auth: AuthSettings::default(),
            logging: LoggingSettings::default(),
            calendar: CalendarSettings::default(),
            recommendations: RecommendationSettings::default(),
        }
    }
}

impl SmartTaskSettings {
    /// Reject values that would make the client unusable.
    pub fn validate(&self) -> Result<()> {
        let base = self.api.base_url.trim();
        if base.is_empty() {
            return Err(SettingsError::InvalidValue("api.baseUrl is empty".into()));
        }
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(SettingsError::InvalidValue(format!(
                "api.baseUrl must be an http(s) URL, got {base}"
            )));
        }
        if self.api.timeout_ms == 0 {
            return Err(SettingsError::InvalidValue("api.timeoutMs must be positive".into()));
        }
        if self.calendar.preview_limit == 0 {
            return Err(SettingsError::InvalidValue(
                "calendar.previewLimit must be at least 1".into(),
            ));
        }
        if self.recommendations.due_soon_hours == 0 {
            return Err(SettingsError::InvalidValue(
                "recommendations.dueSoonHours must be at least 1".into(),
            ));
        }
        if self.recommendations.max_tasks_per_bucket == 0 {
            return Err(SettingsError::InvalidValue(
                "recommendations.maxTasksPerBucket must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// API
// ─────────────────────────────────────────────────────────────────────────────

/// REST backend connection settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiSettings {
    /// Server origin, without the `/api/{version}` suffix.
    pub base_url: String,
    /// API version segment.
    pub version: String,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
    /// `User-Agent` header value.
    pub user_agent: String,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            version: "v1".to_string(),
            timeout_ms: 30_000,
            user_agent: format!("smarttask/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ApiSettings {
    /// Versioned API root, e.g. `http://localhost:8000/api/v1`.
    pub fn api_root(&self) -> String {
        format!(
            "{}/api/{}",
            self.base_url.trim_end_matches('/'),
            self.version.trim_matches('/')
        )
    }

    /// Request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Auth / logging
// ─────────────────────────────────────────────────────────────────────────────

/// Token storage settings.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuthSettings {
    /// Override for the token file; defaults to `~/.smarttask/auth.json`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_path: Option<String>,
}

impl AuthSettings {
    /// Resolved token file location.
    pub fn token_path(&self) -> PathBuf {
        self.token_path
            .as_ref()
            .map_or_else(|| crate::loader::smarttask_home().join("auth.json"), PathBuf::from)
    }
}

/// Log output settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggingSettings {
    /// Default filter directive when `RUST_LOG` is unset.
    pub level: String,
    /// Emit JSON lines instead of the compact format.
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            json: false,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Views
// ─────────────────────────────────────────────────────────────────────────────

/// Calendar view settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CalendarSettings {
    /// First day of the displayed week.
    pub week_start: WeekStart,
    /// Task titles shown per day cell.
    pub preview_limit: usize,
}

impl Default for CalendarSettings {
    fn default() -> Self {
        Self {
            week_start: WeekStart::Sunday,
            preview_limit: 3,
        }
    }
}

/// Recommendation engine tuning.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecommendationSettings {
    /// Width of the "due soon" window, in hours.
    pub due_soon_hours: u32,
    /// Tasks shown per bucket.
    pub max_tasks_per_bucket: usize,
}

impl Default for RecommendationSettings {
    fn default() -> Self {
        Self {
            due_soon_hours: 48,
            max_tasks_per_bucket: 3,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_root_joins_segments() {
        let api = ApiSettings {
            base_url: "https://tasks.example.com/".to_string(),
            version: "/v2/".to_string(),
            ..ApiSettings::default()
        };
        assert_eq!(api.api_root(), "https://tasks.example.com/api/v2");
        assert_eq!(ApiSettings::default().api_root(), "http://localhost:8000/api/v1");
    }

    #[test]
    fn token_path_override() {
        let auth = AuthSettings {
            token_path: Some("/tmp/tok.json".to_string()),
        };
        assert_eq!(auth.token_path(), PathBuf::from("/tmp/tok.json"));
        assert!(AuthSettings::default().token_path().ends_with(".smarttask/auth.json"));
    }

    #[test]
    fn camel_case_keys() {
        let value = serde_json::to_value(SmartTaskSettings::default()).unwrap();
        assert!(value["api"]["baseUrl"].is_string());
        assert_eq!(value["calendar"]["weekStart"], "sunday");
        assert_eq!(value["recommendations"]["maxTasksPerBucket"], 3);
        assert!(value["auth"].get("tokenPath").is_none());
    }

    #[test]
    fn validate_rejects_bad_values() {
        let mut settings = SmartTaskSettings::default();
        settings.api.base_url = "localhost:8000".to_string();
        assert!(settings.validate().is_err());

        let mut settings = SmartTaskSettings::default();
        settings.recommendations.max_tasks_per_bucket = 0;
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("maxTasksPerBucket"));

        let mut settings = SmartTaskSettings::default();
        settings.api.timeout_ms = 0;
        assert!(settings.validate().is_err());
    }
}
