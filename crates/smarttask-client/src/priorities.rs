//! Priority endpoints.

use reqwest::Method;
use smarttask_core::{Priority, PriorityCreateParams, PriorityId};

use crate::client::ApiClient;
use crate::errors::Result;

impl ApiClient {
    /// `GET /priorities`.
    #[tracing::instrument(skip_all)]
    pub async fn list_priorities(&self) -> Result<Vec<Priority>> {
        self.send_json(self.request(Method::GET, "/priorities")).await
    }

    /// `GET /priorities/{id}`.
    #[tracing::instrument(skip(self))]
    pub async fn get_priority(&self, id: PriorityId) -> Result<Priority> {
        self.send_json(self.request(Method::GET, &format!("/priorities/{id}")))
            .await
    }

    /// `POST /priorities`.
    #[tracing::instrument(skip_all, fields(name = %params.name))]
    pub async fn create_priority(&self, params: &PriorityCreateParams) -> Result<Priority> {
        self.send_json(self.request(Method::POST, "/priorities").json(params))
            .await
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
