//! Task and dependency endpoints.

use reqwest::Method;
use smarttask_core::{Dependency, Task, TaskCreateParams, TaskId, TaskUpdateParams};

use crate::backend::TaskQuery;
use crate::client::ApiClient;
use crate::errors::Result;

impl ApiClient {
    /// `GET /tasks`, with `status` / `priority_id` forwarded as query params.
    #[tracing::instrument(skip_all, fields(status = ?query.status, priority_id = ?query.priority_id))]
    pub async fn list_tasks(&self, query: &TaskQuery) -> Result<Vec<Task>> {
        let tasks: Vec<Task> = self
            .send_json(self.request(Method::GET, "/tasks").query(query))
            .await?;
        tracing::debug!(count = tasks.len(), "fetched tasks");
        Ok(tasks)
    }

    /// `GET /tasks/{id}`.
    #[tracing::instrument(skip(self))]
    pub async fn get_task(&self, id: TaskId) -> Result<Task> {
        self.send_json(self.request(Method::GET, &format!("/tasks/{id}")))
            .await
    }

    /// `POST /tasks`, after client-side validation.
    #[tracing::instrument(skip_all)]
    pub async fn create_task(&self, params: &TaskCreateParams) -> Result<Task> {
        params.validate()?;
        let task: Task = self
            .send_json(self.request(Method::POST, "/tasks").json(params))
            .await?;
        tracing::info!(task_id = %task.id, "created task");
        Ok(task)
    }

    /// `PUT /tasks/{id}` with only the changed fields.
    #[tracing::instrument(skip(self, params))]
    pub async fn update_task(&self, id: TaskId, params: &TaskUpdateParams) -> Result<Task> {
        params.validate()?;
        self.send_json(self.request(Method::PUT, &format!("/tasks/{id}")).json(params))
            .await
    }

    /// `DELETE /tasks/{id}`.
    #[tracing::instrument(skip(self))]
    pub async fn delete_task(&self, id: TaskId) -> Result<()> {
        self.send_empty(self.request(Method::DELETE, &format!("/tasks/{id}")))
            .await?;
        tracing::info!(task_id = %id, "deleted task");
        Ok(())
    }

    /// `GET /tasks/{id}/dependencies`: the tasks `id` depends on.
    #[tracing::instrument(skip(self))]
    pub async fn list_dependencies(&self, id: TaskId) -> Result<Vec<Task>> {
        self.send_json(self.request(Method::GET, &format!("/tasks/{id}/dependencies")))
            .await
    }

    /// `POST /tasks/{id}/dependencies`: make `id` depend on `depends_on`.
    #[tracing::instrument(skip(self))]
    pub async fn add_dependency(&self, id: TaskId, depends_on: TaskId) -> Result<Dependency> {
        let body = serde_json::json!({ "dependent_task_id": depends_on });
        self.send_json(
            self.request(Method::POST, &format!("/tasks/{id}/dependencies"))
                .json(&body),
        )
        .await
    }

    /// `DELETE /tasks/{id}/dependencies/{depends_on}`.
    #[tracing::instrument(skip(self))]
    pub async fn remove_dependency(&self, id: TaskId, depends_on: TaskId) -> Result<()> {
        self.send_empty(self.request(
            Method::DELETE,
            &format!("/tasks/{id}/dependencies/{depends_on}"),
        ))
        .await
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use assert_matches::assert_matches;
    use smarttask_auth::{Credentials, MemoryTokenStore};
    use smarttask_core::{PriorityId, TaskStatus};
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::client::ClientConfig;
    use crate::errors::ClientError;

    fn authed_client(server: &MockServer) -> ApiClient {
        let store = Arc::new(MemoryTokenStore::with_credentials(Credentials::bearer("t")));
        ApiClient::new(ClientConfig::with_base_url(server.uri()), store).unwrap()
    }

    fn task_json(id: i64, title: &str) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "title": title,
            "description": null,
            "status": "open",
            "priority_id": 1,
            "due_date": "2025-03-05T09:00:00",
            "owner_id": 1,
            "created_at": "2025-03-01T10:00:00",
            "priority": {"id": 1, "name": "High", "weight": 3}
        })
    }

    #[tokio::test]
    async fn list_forwards_filters() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/tasks"))
            .and(query_param("status", "in_progress"))
            .and(query_param("priority_id", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                task_json(1, "a")
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let client = authed_client(&server);
        let query = TaskQuery {
            status: Some(TaskStatus::InProgress),
            priority_id: Some(PriorityId::new(2)),
        };
        let tasks = client.list_tasks(&query).await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].priority_name(), Some("High"));
    }

    #[tokio::test]
    async fn create_sends_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/tasks"))
            .and(body_json(serde_json::json!({"title": "Write report", "priority_id": 1})))
            .respond_with(ResponseTemplate::new(201).set_body_json(task_json(5, "Write report")))
            .expect(1)
            .mount(&server)
            .await;

        let client = authed_client(&server);
        let task = client
            .create_task(&TaskCreateParams::new("Write report", PriorityId::new(1)))
            .await
            .unwrap();
        assert_eq!(task.id, TaskId::new(5));
    }

    #[tokio::test]
    async fn create_rejects_blank_title_locally() {
        let server = MockServer::start().await;
        let client = authed_client(&server);
        let err = client
            .create_task(&TaskCreateParams::new("", PriorityId::new(1)))
            .await
            .unwrap_err();
        assert_matches!(err, ClientError::Validation(ref v) if v.for_field("title") == Some("Title is required"));
    }

    #[tokio::test]
    async fn update_sends_only_changed_fields() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/v1/tasks/5"))
            .and(body_json(serde_json::json!({"status": "completed"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(task_json(5, "done")))
            .expect(1)
            .mount(&server)
            .await;

        let client = authed_client(&server);
        let update = TaskUpdateParams {
            status: Some(TaskStatus::Completed),
            ..Default::default()
        };
        let _ = client.update_task(TaskId::new(5), &update).await.unwrap();
    }

    #[tokio::test]
    async fn update_clears_with_null() {
        let server = MockServer::start().await;
        let mut undated = task_json(5, "undated");
        undated["due_date"] = serde_json::Value::Null;
        Mock::given(method("PUT"))
            .and(path("/api/v1/tasks/5"))
            .and(body_json(serde_json::json!({"due_date": null})))
            .respond_with(ResponseTemplate::new(200).set_body_json(undated))
            .expect(1)
            .mount(&server)
            .await;

        let client = authed_client(&server);
        let update = TaskUpdateParams {
            due_date: Some(None),
            ..Default::default()
        };
        let task = client.update_task(TaskId::new(5), &update).await.unwrap();
        assert!(task.due_date.is_none());
    }

    #[tokio::test]
    async fn delete_accepts_no_content() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/v1/tasks/5"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        authed_client(&server).delete_task(TaskId::new(5)).await.unwrap();
    }

    #[tokio::test]
    async fn dependency_endpoints() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/tasks/1/dependencies"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                task_json(2, "prereq")
            ])))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/v1/tasks/1/dependencies"))
            .and(body_json(serde_json::json!({"dependent_task_id": 3})))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "id": 10, "task_id": 1, "dependent_task_id": 3
            })))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/api/v1/tasks/1/dependencies/2"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = authed_client(&server);
        let deps = client.list_dependencies(TaskId::new(1)).await.unwrap();
        assert_eq!(deps[0].id, TaskId::new(2));

        let dep = client
            .add_dependency(TaskId::new(1), TaskId::new(3))
            .await
            .unwrap();
        assert_eq!(dep.dependent_task_id, TaskId::new(3));

        client
            .remove_dependency(TaskId::new(1), TaskId::new(2))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn self_dependency_rejected_by_server() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/tasks/1/dependencies"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "detail": "Cannot create circular dependency with the same task"
            })))
            .mount(&server)
            .await;

        let err = authed_client(&server)
            .add_dependency(TaskId::new(1), TaskId::new(1))
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(400));
    }
}
