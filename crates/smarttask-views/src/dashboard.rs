//! The dashboard summary.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use smarttask_client::{TaskBackend, TaskQuery};
use smarttask_tasks::DashboardStats;

use crate::error::{Result, ViewError, messages};

/// Counters over a fresh fetch.
pub struct DashboardView {
    backend: Arc<dyn TaskBackend>,
}

impl DashboardView {
    /// Dashboard over `backend`.
    pub fn new(backend: Arc<dyn TaskBackend>) -> Self {
        Self { backend }
    }

    /// Fetch every task and summarize it at `now`, counting "due today" in `tz`.
    pub async fn load<Tz: TimeZone>(&self, now: DateTime<Utc>, tz: &Tz) -> Result<DashboardStats> {
        let tasks = self
            .backend
            .list_tasks(&TaskQuery::default())
            .await
            .map_err(|e| ViewError::from_client(messages::LOAD_DASHBOARD, e))?;
        Ok(DashboardStats::compute(&tasks, now, tz))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::{FakeBackend, task};
    use chrono::FixedOffset;
    use smarttask_core::TaskStatus;

    #[tokio::test]
    async fn summarizes_fetched_tasks() {
        let mut done = task(1, "done");
        done.status = TaskStatus::Completed;
        let backend = Arc::new(FakeBackend::with_tasks(vec![done, task(2, "todo")]));
        let stats = DashboardView::new(backend).load(Utc::now(), &Utc).await.unwrap();
        assert_eq!(stats.total, 2);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.completion_rate, 50);
    }

    #[tokio::test]
    async fn due_today_uses_given_zone() {
        let now = Utc.with_ymd_and_hms(2025, 3, 10, 20, 0, 0).unwrap();
        let mut evening = task(1, "evening");
        evening.due_date = Some(Utc.with_ymd_and_hms(2025, 3, 10, 23, 0, 0).unwrap());
        let backend = Arc::new(FakeBackend::with_tasks(vec![evening]));
        let view = DashboardView::new(backend);

        assert_eq!(view.load(now, &Utc).await.unwrap().due_today, 1);
        // At UTC+3 "now" is 23:00 March 10 and the due time is 02:00 March 11.
        let east = FixedOffset::east_opt(3 * 3600).unwrap();
        assert_eq!(view.load(now, &east).await.unwrap().due_today, 0);
    }

    #[tokio::test]
    async fn failure_message() {
        let backend = Arc::new(FakeBackend::with_tasks(vec![]));
        backend.fail_with(Some(502));
        let err = DashboardView::new(backend).load(Utc::now(), &Utc).await.unwrap_err();
        assert_eq!(err.message, messages::LOAD_DASHBOARD);
    }
}
