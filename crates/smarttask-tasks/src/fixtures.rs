//! Task builders shared by unit tests.

use chrono::{DateTime, Duration, TimeZone, Utc};
use smarttask_core::{Priority, PriorityId, Task, TaskId, TaskStatus};

pub(crate) fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap()
}

pub(crate) fn priority(id: i64, name: &str) -> Priority {
    Priority {
        id: PriorityId::new(id),
        name: name.to_string(),
        weight: 0,
    }
}

pub(crate) fn task(id: i64) -> Task {
    Task {
        id: TaskId::new(id),
        title: format!("task {id}"),
        description: None,
        status: TaskStatus::Open,
        priority_id: PriorityId::new(2),
        due_date: None,
        owner_id: None,
        created_at: None,
        updated_at: None,
        priority: Some(priority(2, "Medium")),
    }
}

pub(crate) fn due_in(id: i64, offset: Duration) -> Task {
    Task {
        due_date: Some(now() + offset),
        ..task(id)
    }
}

pub(crate) fn with_status(mut task: Task, status: TaskStatus) -> Task {
    task.status = status;
    task
}

pub(crate) fn high(mut task: Task) -> Task {
    task.priority_id = PriorityId::new(1);
    task.priority = Some(priority(1, "High"));
    task
}
