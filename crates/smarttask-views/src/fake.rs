//! In-memory [`TaskBackend`] for view tests.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;
use smarttask_client::{ClientError, Result, TaskBackend, TaskQuery};
use smarttask_core::{
    Dependency, DependencyId, Priority, PriorityId, Task, TaskCreateParams, TaskId,
    TaskStatus, TaskUpdateParams,
};

#[derive(Default)]
struct State {
    tasks: Vec<Task>,
    priorities: Vec<Priority>,
    edges: HashMap<TaskId, Vec<TaskId>>,
    queries: Vec<TaskQuery>,
    failure: Option<u16>,
    next_id: i64,
}

/// Behaves like the backend for one user. `fail_with` makes every call
/// answer with that status until cleared.
#[derive(Default)]
pub(crate) struct FakeBackend {
    state: Mutex<State>,
}

pub(crate) fn priorities() -> Vec<Priority> {
    [(1, "High", 3), (2, "Medium", 2), (3, "Low", 1)]
        .into_iter()
        .map(|(id, name, weight)| Priority {
            id: PriorityId::new(id),
            name: name.to_string(),
            weight,
        })
        .collect()
}

pub(crate) fn task(id: i64, title: &str) -> Task {
    Task {
        id: TaskId::new(id),
        title: title.to_string(),
        description: None,
        status: TaskStatus::Open,
        priority_id: PriorityId::new(2),
        due_date: None,
        owner_id: None,
        created_at: None,
        updated_at: None,
        priority: priorities().into_iter().nth(1),
    }
}

impl FakeBackend {
    pub(crate) fn with_tasks(tasks: Vec<Task>) -> Self {
        let next_id = tasks.iter().map(|t| t.id.get()).max().unwrap_or(0) + 1;
        Self {
            state: Mutex::new(State {
                tasks,
                priorities: priorities(),
                next_id,
                ..State::default()
            }),
        }
    }

    pub(crate) fn fail_with(&self, status: Option<u16>) {
        self.state.lock().failure = status;
    }

    pub(crate) fn link(&self, id: TaskId, depends_on: TaskId) {
        self.state.lock().edges.entry(id).or_default().push(depends_on);
    }

    pub(crate) fn queries(&self) -> Vec<TaskQuery> {
        self.state.lock().queries.clone()
    }

    pub(crate) fn tasks(&self) -> Vec<Task> {
        self.state.lock().tasks.clone()
    }

    fn check(state: &State) -> Result<()> {
        match state.failure {
            None => Ok(()),
            Some(401) => Err(ClientError::Unauthorized {
                detail: "Could not validate credentials".to_string(),
            }),
            Some(status) => Err(ClientError::Status {
                status,
                detail: "fake failure".to_string(),
            }),
        }
    }

    fn not_found() -> ClientError {
        ClientError::Status {
            status: 404,
            detail: "Task not found".to_string(),
        }
    }
}

#[async_trait]
impl TaskBackend for FakeBackend {
    async fn list_tasks(&self, query: &TaskQuery) -> Result<Vec<Task>> {
        let mut state = self.state.lock();
        state.queries.push(*query);
        Self::check(&state)?;
        Ok(state
            .tasks
            .iter()
            .filter(|t| query.status.is_none_or(|s| t.status == s))
            .filter(|t| query.priority_id.is_none_or(|p| t.priority_id == p))
            .cloned()
            .collect())
    }

    async fn get_task(&self, id: TaskId) -> Result<Task> {
        let state = self.state.lock();
        Self::check(&state)?;
        state
            .tasks
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(Self::not_found)
    }

    async fn create_task(&self, params: &TaskCreateParams) -> Result<Task> {
        params.validate()?;
        let mut state = self.state.lock();
        Self::check(&state)?;
        let id = TaskId::new(state.next_id);
        state.next_id += 1;
        let priority = state
            .priorities
            .iter()
            .find(|p| p.id == params.priority_id)
            .cloned();
        let task = Task {
            id,
            title: params.title.clone(),
            description: params.description.clone(),
            status: params.status.unwrap_or_default(),
            priority_id: params.priority_id,
            due_date: params.due_date,
            owner_id: None,
            created_at: None,
            updated_at: None,
            priority,
        };
        state.tasks.push(task.clone());
        Ok(task)
    }

    async fn update_task(&self, id: TaskId, params: &TaskUpdateParams) -> Result<Task> {
        params.validate()?;
        let mut state = self.state.lock();
        Self::check(&state)?;
        let task = state
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(Self::not_found)?;
        if let Some(ref title) = params.title {
            task.title.clone_from(title);
        }
        if let Some(ref description) = params.description {
            task.description.clone_from(description);
        }
        if let Some(status) = params.status {
            task.status = status;
        }
        if let Some(priority_id) = params.priority_id {
            task.priority_id = priority_id;
        }
        if let Some(due_date) = params.due_date {
            task.due_date = due_date;
        }
        Ok(task.clone())
    }

    async fn delete_task(&self, id: TaskId) -> Result<()> {
        let mut state = self.state.lock();
        Self::check(&state)?;
        let before = state.tasks.len();
        state.tasks.retain(|t| t.id != id);
        if state.tasks.len() == before {
            return Err(Self::not_found());
        }
        Ok(())
    }

    async fn list_dependencies(&self, id: TaskId) -> Result<Vec<Task>> {
        let state = self.state.lock();
        Self::check(&state)?;
        let edges = state.edges.get(&id).cloned().unwrap_or_default();
        Ok(state
            .tasks
            .iter()
            .filter(|t| edges.contains(&t.id))
            .cloned()
            .collect())
    }

    async fn add_dependency(&self, id: TaskId, depends_on: TaskId) -> Result<Dependency> {
        let mut state = self.state.lock();
        Self::check(&state)?;
        if id == depends_on {
            return Err(ClientError::Status {
                status: 400,
                detail: "Cannot create circular dependency with the same task".to_string(),
            });
        }
        let edges = state.edges.entry(id).or_default();
        if edges.contains(&depends_on) {
            return Err(ClientError::Status {
                status: 400,
                detail: "Dependency already exists".to_string(),
            });
        }
        edges.push(depends_on);
        let count = i64::try_from(edges.len()).unwrap_or(0);
        Ok(Dependency {
            id: DependencyId::new(count),
            task_id: id,
            dependent_task_id: depends_on,
        })
    }

    async fn remove_dependency(&self, id: TaskId, depends_on: TaskId) -> Result<()> {
        let mut state = self.state.lock();
        Self::check(&state)?;
        let edges = state.edges.entry(id).or_default();
        let before = edges.len();
        edges.retain(|d| *d != depends_on);
        if edges.len() == before {
            return Err(ClientError::Status {
                status: 404,
                detail: "Dependency not found".to_string(),
            });
        }
        Ok(())
    }

    async fn list_priorities(&self) -> Result<Vec<Priority>> {
        let state = self.state.lock();
        Self::check(&state)?;
        Ok(state.priorities.clone())
    }
}
