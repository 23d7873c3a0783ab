//! The recommendations panel.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use smarttask_client::{TaskBackend, TaskQuery};
use smarttask_tasks::{
    Recommendation, RecommendationConfig, RecommendationKind, TaskFilter, recommend_with,
};

use crate::error::{Result, ViewError, messages};

/// Buckets recomputed from a fresh fetch on every load.
pub struct RecommendationsView {
    backend: Arc<dyn TaskBackend>,
    config: RecommendationConfig,
    buckets: Vec<Recommendation>,
}

impl RecommendationsView {
    /// Empty panel.
    pub fn new(backend: Arc<dyn TaskBackend>, config: RecommendationConfig) -> Self {
        Self {
            backend,
            config,
            buckets: Vec::new(),
        }
    }

    /// Fetch every task and bucket it at `now`. An empty task list yields no
    /// buckets.
    pub async fn load(&mut self, now: DateTime<Utc>) -> Result<&[Recommendation]> {
        let tasks = self
            .backend
            .list_tasks(&TaskQuery::default())
            .await
            .map_err(|e| ViewError::from_client(messages::LOAD_RECOMMENDATIONS, e))?;
        self.buckets = recommend_with(&tasks, now, &self.config);
        Ok(&self.buckets)
    }

    /// Last computed buckets.
    pub fn buckets(&self) -> &[Recommendation] {
        &self.buckets
    }

    /// The list filter behind a bucket's "View All" link.
    pub fn view_all(kind: RecommendationKind) -> TaskFilter {
        TaskFilter::new().kind(kind)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::{FakeBackend, task};
    use chrono::{Duration, TimeZone};
    use smarttask_core::TaskStatus;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn empty_backend_yields_no_buckets() {
        let backend = Arc::new(FakeBackend::with_tasks(vec![]));
        let mut view = RecommendationsView::new(backend, RecommendationConfig::default());
        assert!(view.load(now()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn buckets_from_fetched_tasks() {
        let mut late = task(1, "late");
        late.due_date = Some(now() - Duration::hours(3));
        let mut going = task(2, "going");
        going.status = TaskStatus::InProgress;
        let backend = Arc::new(FakeBackend::with_tasks(vec![late, going, task(3, "idle")]));

        let mut view = RecommendationsView::new(backend, RecommendationConfig::default());
        let buckets = view.load(now()).await.unwrap();
        let kinds: Vec<_> = buckets.iter().map(|b| b.kind).collect();
        assert_eq!(
            kinds,
            vec![RecommendationKind::Overdue, RecommendationKind::InProgress]
        );
        assert_eq!(view.buckets().len(), 2);
    }

    #[tokio::test]
    async fn failure_message() {
        let backend = Arc::new(FakeBackend::with_tasks(vec![]));
        backend.fail_with(Some(500));
        let mut view = RecommendationsView::new(backend, RecommendationConfig::default());
        let err = view.load(now()).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to generate recommendations. Please try again later."
        );
    }

    #[test]
    fn view_all_targets_bucket() {
        let filter = RecommendationsView::view_all(RecommendationKind::DueSoon);
        assert_eq!(filter.kind, Some(RecommendationKind::DueSoon));
    }
}
