//! The task detail screen: one task, its dependencies, and edits.

use std::sync::Arc;

use smarttask_client::{TaskBackend, TaskQuery};
use smarttask_core::{Priority, Task, TaskId, TaskUpdateParams};
use smarttask_tasks::DependencyPicker;

use crate::error::{Result, ViewError, messages};

/// A loaded task with its dependency picker.
pub struct DetailView {
    backend: Arc<dyn TaskBackend>,
    task: Task,
    picker: DependencyPicker,
    priorities: Vec<Priority>,
}

impl DetailView {
    /// Fetch the task, its dependencies, priorities, and every task as
    /// dependency candidates.
    pub async fn load(backend: Arc<dyn TaskBackend>, id: TaskId) -> Result<Self> {
        let fail = |e| ViewError::from_client(messages::LOAD_DETAIL, e);
        let task = backend.get_task(id).await.map_err(fail)?;
        let dependencies = backend.list_dependencies(id).await.map_err(fail)?;
        let priorities = backend.list_priorities().await.map_err(fail)?;
        let all = backend
            .list_tasks(&TaskQuery::default())
            .await
            .map_err(fail)?;
        Ok(Self {
            picker: DependencyPicker::new(id, &all, dependencies),
            backend,
            task,
            priorities,
        })
    }

    /// The task.
    pub fn task(&self) -> &Task {
        &self.task
    }

    /// Tasks this one depends on.
    pub fn dependencies(&self) -> &[Task] {
        self.picker.dependencies()
    }

    /// Tasks that may still be added as dependencies.
    pub fn candidates(&self) -> &[Task] {
        self.picker.candidates()
    }

    /// Priority reference data.
    pub fn priorities(&self) -> &[Priority] {
        &self.priorities
    }

    /// Send a partial update and hold the returned record.
    pub async fn update(&mut self, params: &TaskUpdateParams) -> Result<&Task> {
        let updated = self
            .backend
            .update_task(self.task.id, params)
            .await
            .map_err(|e| ViewError::from_client(messages::UPDATE_TASK, e))?;
        self.task = updated;
        Ok(&self.task)
    }

    /// Depend on `depends_on`, then refetch the dependency list.
    pub async fn add_dependency(&mut self, depends_on: TaskId) -> Result<()> {
        let fail = |e| ViewError::from_client(messages::ADD_DEPENDENCY, e);
        let _ = self
            .backend
            .add_dependency(self.task.id, depends_on)
            .await
            .map_err(fail)?;
        let dependencies = self
            .backend
            .list_dependencies(self.task.id)
            .await
            .map_err(fail)?;
        self.picker.replace_dependencies(dependencies);
        Ok(())
    }

    /// Drop the dependency on `depends_on`. The removed task becomes a
    /// candidate again and is returned.
    pub async fn remove_dependency(&mut self, depends_on: TaskId) -> Result<Option<Task>> {
        self.backend
            .remove_dependency(self.task.id, depends_on)
            .await
            .map_err(|e| ViewError::from_client(messages::REMOVE_DEPENDENCY, e))?;
        Ok(self.picker.mark_removed(depends_on))
    }

    /// Delete the task.
    pub async fn delete(self) -> Result<()> {
        self.backend
            .delete_task(self.task.id)
            .await
            .map_err(|e| ViewError::from_client(messages::DELETE_TASK, e))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
