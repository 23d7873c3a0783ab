//! The task list screen.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use smarttask_client::{TaskBackend, TaskQuery};
use smarttask_core::{Priority, Task, TaskCreateParams, TaskId};
use smarttask_tasks::{RecommendationConfig, TaskFilter};

use crate::error::{Result, ViewError, messages};

/// Fetched tasks plus the filter applied to them.
///
/// Status and priority criteria are forwarded to the server on
/// [`load`](Self::load); every criterion is applied again locally by
/// [`visible`](Self::visible), so local edits stay consistent.
pub struct ListView {
    backend: Arc<dyn TaskBackend>,
    config: RecommendationConfig,
    filter: TaskFilter,
    tasks: Vec<Task>,
    priorities: Vec<Priority>,
}

impl ListView {
    /// Empty view; call [`load`](Self::load) to fetch.
    pub fn new(backend: Arc<dyn TaskBackend>, config: RecommendationConfig) -> Self {
        Self {
            backend,
            config,
            filter: TaskFilter::default(),
            tasks: Vec::new(),
            priorities: Vec::new(),
        }
    }

    /// Current filter.
    pub fn filter(&self) -> &TaskFilter {
        &self.filter
    }

    /// Replace the filter. Call [`load`](Self::load) afterwards if the
    /// server-side criteria changed.
    pub fn set_filter(&mut self, filter: TaskFilter) {
        self.filter = filter;
    }

    /// The server query derived from the filter.
    pub fn query(&self) -> TaskQuery {
        TaskQuery {
            status: self.filter.completion.exact_status(),
            priority_id: self.filter.priority_id,
        }
    }

    /// Fetch tasks and priorities. On failure the previous copy is kept.
    pub async fn load(&mut self) -> Result<()> {
        let query = self.query();
        let tasks = self
            .backend
            .list_tasks(&query)
            .await
            .map_err(|e| ViewError::from_client(messages::LOAD_TASKS, e))?;
        let priorities = self
            .backend
            .list_priorities()
            .await
            .map_err(|e| ViewError::from_client(messages::LOAD_TASKS, e))?;
        self.tasks = tasks;
        self.priorities = priorities;
        Ok(())
    }

    /// Everything fetched, unfiltered.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Priority reference data.
    pub fn priorities(&self) -> &[Priority] {
        &self.priorities
    }

    /// Tasks passing the filter at `now`.
    pub fn visible(&self, now: DateTime<Utc>) -> Vec<Task> {
        self.filter.apply(&self.tasks, now, &self.config)
    }

    /// Create a task and append it to the local copy.
    pub async fn create(&mut self, params: &TaskCreateParams) -> Result<Task> {
        let task = self
            .backend
            .create_task(params)
            .await
            .map_err(|e| ViewError::from_client(messages::CREATE_TASK, e))?;
        self.tasks.push(task.clone());
        Ok(task)
    }

    /// Delete a task and drop it from the local copy.
    pub async fn delete(&mut self, id: TaskId) -> Result<()> {
        self.backend
            .delete_task(id)
            .await
            .map_err(|e| ViewError::from_client(messages::DELETE_TASK, e))?;
        self.tasks.retain(|t| t.id != id);
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
