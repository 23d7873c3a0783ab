//! Login state for the account screens.

use smarttask_client::{ApiClient, ClientError};
use smarttask_core::{User, UserCreateParams, UserUpdateParams};

use crate::error::{Result, ViewError, messages};

/// The signed-in user, if any, plus the client that holds the token.
pub struct Session {
    client: ApiClient,
    user: Option<User>,
}

impl Session {
    /// Session with no known user; call [`restore`](Self::restore) to pick up
    /// a stored token.
    pub fn new(client: ApiClient) -> Self {
        Self { client, user: None }
    }

    /// The underlying client.
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// The signed-in user, once known.
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Resolve a stored token to its user. With no token this is `Ok(None)`.
    /// A token the server rejects is cleared.
    pub async fn restore(&mut self) -> Result<Option<&User>> {
        if !self.client.is_authenticated() {
            self.user = None;
            return Ok(None);
        }
        match self.client.current_user().await {
            Ok(user) => {
                self.user = Some(user);
                Ok(self.user.as_ref())
            }
            Err(err) => {
                self.user = None;
                if let Err(clear) = self.client.logout() {
                    tracing::warn!(error = %clear, "failed to clear stored token");
                }
                Err(ViewError {
                    message: messages::SESSION_EXPIRED.to_string(),
                    source: Some(err),
                })
            }
        }
    }

    /// Log in and fetch the user record.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<&User> {
        let fail = |e: ClientError| ViewError::with_detail(messages::LOGIN, e);
        let _ = self.client.login(username, password).await.map_err(fail)?;
        let user = self.client.current_user().await.map_err(fail)?;
        tracing::info!(user_id = %user.id, "session started");
        Ok(&*self.user.insert(user))
    }

    /// Create an account, then log in with the same credentials.
    pub async fn register(&mut self, params: &UserCreateParams) -> Result<&User> {
        let created = self
            .client
            .register(params)
            .await
            .map_err(|e| ViewError::with_detail(messages::REGISTER, e))?;
        tracing::info!(user_id = %created.id, "account created");
        self.login(&params.username, &params.password).await
    }

    /// Update the signed-in user's profile.
    pub async fn update_profile(&mut self, params: &UserUpdateParams) -> Result<&User> {
        let user = self
            .client
            .update_current_user(params)
            .await
            .map_err(|e| ViewError::with_detail(messages::UPDATE_PROFILE, e))?;
        Ok(&*self.user.insert(user))
    }

    /// Forget the token and the user.
    pub fn logout(&mut self) -> Result<()> {
        self.user = None;
        self.client
            .logout()
            .map_err(|e| ViewError::from_client(messages::SESSION_EXPIRED, e))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
