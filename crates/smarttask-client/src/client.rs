//! The HTTP client and its request plumbing.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use smarttask_auth::TokenStore;
use smarttask_settings::ApiSettings;

use crate::errors::{ClientError, Result, extract_detail};

/// Connection parameters for [`ApiClient`].
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Server origin, e.g. `http://localhost:8000`.
    pub base_url: String,
    /// API version segment, e.g. `v1`.
    pub version: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// `User-Agent` header value.
    pub user_agent: String,
}

impl ClientConfig {
    /// Build from the `api` settings section.
    pub fn from_settings(api: &ApiSettings) -> Self {
        Self {
            base_url: api.base_url.clone(),
            version: api.version.clone(),
            timeout: api.timeout(),
            user_agent: api.user_agent.clone(),
        }
    }

    /// Defaults pointed at a different origin.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_settings(&ApiSettings::default())
    }
}

/// `GET /health` response.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    /// `"ok"` when the backend is up.
    pub status: String,
}

/// REST client for the SmartTask backend.
///
/// Cheap to clone; clones share the connection pool and token store.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    api_root: String,
    tokens: Arc<dyn TokenStore>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("api_root", &self.api_root)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a client. Fails only if the TLS backend cannot initialize.
    pub fn new(config: ClientConfig, tokens: Arc<dyn TokenStore>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()?;
        let base_url = config.base_url.trim_end_matches('/').to_string();
        let api_root = format!("{base_url}/api/{}", config.version.trim_matches('/'));
        Ok(Self {
            http,
            base_url,
            api_root,
            tokens,
        })
    }

    /// Server origin.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Versioned API root.
    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    /// The token store requests read from.
    pub fn tokens(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    /// Whether a token is currently stored. Says nothing about its validity.
    pub fn is_authenticated(&self) -> bool {
        self.tokens.load().is_some()
    }

    /// Check that the backend is reachable.
    #[tracing::instrument(skip_all)]
    pub async fn health(&self) -> Result<HealthStatus> {
        let req = self.http.get(format!("{}/health", self.base_url));
        self.send_json(req).await
    }

    // ── Request plumbing ────────────────────────────────────────────

    /// Builder for a versioned route, with the bearer token attached.
    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let req = self
            .http
            .request(method, format!("{}{path}", self.api_root))
            .header(ACCEPT, "application/json");
        match self.tokens.load() {
            Some(creds) => req.header(AUTHORIZATION, creds.authorization_header()),
            None => req,
        }
    }

    /// Builder for an unversioned route at the server origin, without a token.
    pub(crate) fn root_request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}{path}", self.base_url))
            .header(ACCEPT, "application/json")
    }

    pub(crate) async fn send_json<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T> {
        let resp = self.execute(req).await?;
        let bytes = resp.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    pub(crate) async fn send_empty(&self, req: RequestBuilder) -> Result<()> {
        let _ = self.execute(req).await?;
        Ok(())
    }

    async fn execute(&self, req: RequestBuilder) -> Result<Response> {
        let resp = req.send().await?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let reason = status.canonical_reason().unwrap_or("request failed");
        let body = resp.text().await.unwrap_or_default();
        let detail = extract_detail(&body, reason);

        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!(%detail, "token rejected, clearing stored credentials");
            if let Err(err) = self.tokens.clear() {
                tracing::warn!(error = %err, "failed to clear stored credentials");
            }
            return Err(ClientError::Unauthorized { detail });
        }

        tracing::debug!(status = status.as_u16(), %detail, "request failed");
        Err(ClientError::Status {
            status: status.as_u16(),
            detail,
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
