//! Authentication endpoints.

use reqwest::{Method, StatusCode};
use smarttask_auth::Credentials;
use smarttask_core::{LoginResponse, User, UserCreateParams, UserUpdateParams};

use crate::client::ApiClient;
use crate::errors::{ClientError, Result, extract_detail};

impl ApiClient {
    /// Exchange a username/password pair for a bearer token and store it.
    ///
    /// `POST /token` is form-encoded and lives at the server origin.
    #[tracing::instrument(skip_all, fields(username = %username))]
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse> {
        let resp = self
            .root_request(Method::POST, "/token")
            .form(&[("username", username), ("password", password)])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let reason = status.canonical_reason().unwrap_or("login failed");
            let detail = extract_detail(&resp.text().await.unwrap_or_default(), reason);
            return Err(if status == StatusCode::UNAUTHORIZED {
                ClientError::InvalidCredentials { detail }
            } else {
                ClientError::Status {
                    status: status.as_u16(),
                    detail,
                }
            });
        }

        let login: LoginResponse = serde_json::from_slice(&resp.bytes().await?)?;
        let mut creds = Credentials::bearer(login.access_token.clone()).with_username(username);
        if let Some(ref token_type) = login.token_type {
            creds.token_type.clone_from(token_type);
        }
        self.tokens().save(&creds)?;
        tracing::info!("logged in");
        Ok(login)
    }

    /// Create an account. Does not log in.
    #[tracing::instrument(skip_all, fields(username = %params.username))]
    pub async fn register(&self, params: &UserCreateParams) -> Result<User> {
        params.validate()?;
        let req = self.root_request(Method::POST, "/users").json(params);
        self.send_json(req).await
    }

    /// Forget the stored token. Purely local; the backend keeps no sessions.
    pub fn logout(&self) -> Result<()> {
        self.tokens().clear()?;
        tracing::info!("logged out");
        Ok(())
    }

    /// The account the stored token belongs to.
    #[tracing::instrument(skip_all)]
    pub async fn current_user(&self) -> Result<User> {
        self.require_token()?;
        self.send_json(self.request(Method::GET, "/users/me")).await
    }

    /// Update the current account.
    #[tracing::instrument(skip_all)]
    pub async fn update_current_user(&self, params: &UserUpdateParams) -> Result<User> {
        self.require_token()?;
        let req = self.request(Method::PUT, "/users/me").json(params);
        self.send_json(req).await
    }

    pub(crate) fn require_token(&self) -> Result<()> {
        if self.is_authenticated() {
            Ok(())
        } else {
            Err(ClientError::NotLoggedIn)
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use assert_matches::assert_matches;
    use smarttask_auth::{MemoryTokenStore, TokenStore};
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::client::ClientConfig;

    fn client_with(server: &MockServer, store: Arc<MemoryTokenStore>) -> ApiClient {
        ApiClient::new(ClientConfig::with_base_url(server.uri()), store).unwrap()
    }

    #[tokio::test]
    async fn login_posts_form_and_stores_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .and(header("content-type", "application/x-www-form-urlencoded"))
            .and(body_string_contains("username=alice"))
            .and(body_string_contains("password=secret123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "tok-abc",
                "token_type": "bearer"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let store = Arc::new(MemoryTokenStore::new());
        let client = client_with(&server, store.clone());
        let login = client.login("alice", "secret123").await.unwrap();
        assert_eq!(login.access_token, "tok-abc");

        let creds = store.load().unwrap();
        assert_eq!(creds.access_token, "tok-abc");
        assert_eq!(creds.username.as_deref(), Some("alice"));
    }

    #[tokio::test]
    async fn login_rejected_is_invalid_credentials() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(401).set_body_json(
                serde_json::json!({"detail": "Incorrect username or password"}),
            ))
            .mount(&server)
            .await;

        let store = Arc::new(MemoryTokenStore::new());
        let client = client_with(&server, store.clone());
        let err = client.login("alice", "wrongpass").await.unwrap_err();
        assert_matches!(err, ClientError::InvalidCredentials { ref detail } if detail == "Incorrect username or password");
        assert!(store.load().is_none());
    }

    #[tokio::test]
    async fn register_validates_before_sending() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/users"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let client = client_with(&server, Arc::new(MemoryTokenStore::new()));
        let params = UserCreateParams {
            username: "bob".to_string(),
            password: "short".to_string(),
            email: None,
        };
        assert_matches!(client.register(&params).await, Err(ClientError::Validation(_)));
    }

    #[tokio::test]
    async fn register_posts_json_to_root() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/users"))
            .and(body_string_contains("\"username\":\"bob\""))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "id": 7,
                "username": "bob",
                "email": "bob@example.com",
                "created_at": "2025-03-01T10:00:00"
            })))
            .mount(&server)
            .await;

        let client = client_with(&server, Arc::new(MemoryTokenStore::new()));
        let params = UserCreateParams {
            username: "bob".to_string(),
            password: "longenough".to_string(),
            email: Some("bob@example.com".to_string()),
        };
        let user = client.register(&params).await.unwrap();
        assert_eq!(user.username, "bob");
        assert_eq!(user.id.get(), 7);
    }

    #[tokio::test]
    async fn register_conflict_surfaces_detail() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/users"))
            .respond_with(ResponseTemplate::new(400).set_body_json(
                serde_json::json!({"detail": "Username already registered"}),
            ))
            .mount(&server)
            .await;

        let client = client_with(&server, Arc::new(MemoryTokenStore::new()));
        let params = UserCreateParams {
            username: "bob".to_string(),
            password: "longenough".to_string(),
            email: None,
        };
        let err = client.register(&params).await.unwrap_err();
        assert_eq!(err.status(), Some(400));
        assert_eq!(err.detail(), Some("Username already registered"));
    }

    #[tokio::test]
    async fn current_user_requires_token() {
        let server = MockServer::start().await;
        let client = client_with(&server, Arc::new(MemoryTokenStore::new()));
        assert_matches!(client.current_user().await, Err(ClientError::NotLoggedIn));
    }

    #[tokio::test]
    async fn current_user_and_update() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/users/me"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": 1, "username": "alice", "email": null
            })))
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/api/v1/users/me"))
            .and(body_string_contains("new@example.com"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": 1, "username": "alice", "email": "new@example.com"
            })))
            .mount(&server)
            .await;

        let store = Arc::new(MemoryTokenStore::with_credentials(Credentials::bearer("t")));
        let client = client_with(&server, store);
        let me = client.current_user().await.unwrap();
        assert_eq!(me.username, "alice");
        assert!(me.email.is_none());

        let updated = client
            .update_current_user(&UserUpdateParams {
                email: Some("new@example.com".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(updated.email.as_deref(), Some("new@example.com"));
    }

    #[test]
    fn logout_clears_store() {
        let store = Arc::new(MemoryTokenStore::with_credentials(Credentials::bearer("t")));
        let client = ApiClient::new(ClientConfig::default(), store.clone()).unwrap();
        assert!(client.is_authenticated());
        client.logout().unwrap();
        assert!(!client.is_authenticated());
    }
}
