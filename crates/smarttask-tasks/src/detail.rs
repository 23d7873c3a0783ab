//! Bookkeeping for the dependency picker on a task's detail page.
//!
//! A task may depend on any other task it does not already depend on. The
//! picker keeps two disjoint lists, current dependencies and candidates,
//! and moves records between them as edges are added and removed.

use smarttask_core::{Task, TaskId};

/// Dependencies of one task and the tasks it could still depend on.
#[derive(Debug, Clone, PartialEq)]
pub struct DependencyPicker {
    task_id: TaskId,
    dependencies: Vec<Task>,
    candidates: Vec<Task>,
}

impl DependencyPicker {
    /// Candidates are `all_tasks` minus the task itself minus `dependencies`.
    pub fn new(task_id: TaskId, all_tasks: &[Task], dependencies: Vec<Task>) -> Self {
        let candidates = all_tasks
            .iter()
            .filter(|t| t.id != task_id && !dependencies.iter().any(|d| d.id == t.id))
            .cloned()
            .collect();
        Self {
            task_id,
            dependencies,
            candidates,
        }
    }

    /// The task whose dependencies these are.
    pub fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Tasks currently depended on.
    pub fn dependencies(&self) -> &[Task] {
        &self.dependencies
    }

    /// Tasks that may be added as dependencies.
    pub fn candidates(&self) -> &[Task] {
        &self.candidates
    }

    /// Whether `id` may be added.
    pub fn is_candidate(&self, id: TaskId) -> bool {
        self.candidates.iter().any(|t| t.id == id)
    }

    /// Whether `id` is already depended on.
    pub fn depends_on(&self, id: TaskId) -> bool {
        self.dependencies.iter().any(|t| t.id == id)
    }

    /// Install a refetched dependency list after an add. Anything now
    /// depended on leaves the candidates.
    pub fn replace_dependencies(&mut self, dependencies: Vec<Task>) {
        self.candidates
            .retain(|c| !dependencies.iter().any(|d| d.id == c.id));
        self.dependencies = dependencies;
    }

    /// Record that the edge to `id` was removed. The removed task record is
    /// returned to the candidates and also handed back to the caller.
    pub fn mark_removed(&mut self, id: TaskId) -> Option<Task> {
        let index = self.dependencies.iter().position(|t| t.id == id)?;
        let removed = self.dependencies.remove(index);
        if !self.is_candidate(id) {
            self.candidates.push(removed.clone());
        }
        Some(removed)
    }

    /// Drop `id` from the candidates, e.g. after it was deleted.
    pub fn forget(&mut self, id: TaskId) {
        self.candidates.retain(|t| t.id != id);
        self.dependencies.retain(|t| t.id != id);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
