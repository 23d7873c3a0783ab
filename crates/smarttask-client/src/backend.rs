//! The data-access seam views are written against.

use async_trait::async_trait;
use serde::Serialize;
use smarttask_core::{
    Dependency, Priority, PriorityId, Task, TaskCreateParams, TaskId, TaskStatus,
    TaskUpdateParams,
};

use crate::client::ApiClient;
use crate::errors::Result;

/// Server-side filters for `GET /tasks`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TaskQuery {
    /// Exact status match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    /// Exact priority match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority_id: Option<PriorityId>,
}

/// Everything the views fetch or mutate.
///
/// [`ApiClient`] is the production implementation; tests substitute
/// in-memory fakes.
#[async_trait]
pub trait TaskBackend: Send + Sync {
    /// All tasks visible to the current user, filtered server-side.
    async fn list_tasks(&self, query: &TaskQuery) -> Result<Vec<Task>>;

    /// One task.
    async fn get_task(&self, id: TaskId) -> Result<Task>;

    /// Create a task.
    async fn create_task(&self, params: &TaskCreateParams) -> Result<Task>;

    /// Partially update a task.
    async fn update_task(&self, id: TaskId, params: &TaskUpdateParams) -> Result<Task>;

    /// Delete a task.
    async fn delete_task(&self, id: TaskId) -> Result<()>;

    /// Tasks that `id` depends on.
    async fn list_dependencies(&self, id: TaskId) -> Result<Vec<Task>>;

    /// Make `id` depend on `depends_on`.
    async fn add_dependency(&self, id: TaskId, depends_on: TaskId) -> Result<Dependency>;

    /// Drop the edge from `id` to `depends_on`.
    async fn remove_dependency(&self, id: TaskId, depends_on: TaskId) -> Result<()>;

    /// Priority reference data.
    async fn list_priorities(&self) -> Result<Vec<Priority>>;
}

#[async_trait]
impl TaskBackend for ApiClient {
    async fn list_tasks(&self, query: &TaskQuery) -> Result<Vec<Task>> {
        ApiClient::list_tasks(self, query).await
    }

    async fn get_task(&self, id: TaskId) -> Result<Task> {
        ApiClient::get_task(self, id).await
    }

    async fn create_task(&self, params: &TaskCreateParams) -> Result<Task> {
        ApiClient::create_task(self, params).await
    }

    async fn update_task(&self, id: TaskId, params: &TaskUpdateParams) -> Result<Task> {
        ApiClient::update_task(self, id, params).await
    }

    async fn delete_task(&self, id: TaskId) -> Result<()> {
        ApiClient::delete_task(self, id).await
    }

    async fn list_dependencies(&self, id: TaskId) -> Result<Vec<Task>> {
        ApiClient::list_dependencies(self, id).await
    }

    async fn add_dependency(&self, id: TaskId, depends_on: TaskId) -> Result<Dependency> {
        ApiClient::add_dependency(self, id, depends_on).await
    }

    async fn remove_dependency(&self, id: TaskId, depends_on: TaskId) -> Result<()> {
        ApiClient::remove_dependency(self, id, depends_on).await
    }

    async fn list_priorities(&self) -> Result<Vec<Priority>> {
        ApiClient::list_priorities(self).await
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_serializes_to_nothing() {
        let value = serde_json::to_value(TaskQuery::default()).unwrap();
        assert_eq!(value, serde_json::json!({}));
    }

    #[test]
    fn query_uses_wire_names() {
        let query = TaskQuery {
            status: Some(TaskStatus::Blocked),
            priority_id: Some(PriorityId::new(3)),
        };
        let value = serde_json::to_value(query).unwrap();
        assert_eq!(value, serde_json::json!({"status": "blocked", "priority_id": 3}));
    }

    #[test]
    fn api_client_is_a_backend() {
        fn assert_backend<T: TaskBackend>() {}
        assert_backend::<ApiClient>();
    }
}
