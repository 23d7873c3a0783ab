//! Dashboard counters.

use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;
use smarttask_core::Task;

/// How many recent tasks the dashboard lists.
pub const RECENT_TASK_LIMIT: usize = 5;

/// Summary numbers for a task list at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    /// All tasks.
    pub total: usize,
    /// Completed tasks.
    pub completed: usize,
    /// Not completed.
    pub pending: usize,
    /// Past due and not completed.
    pub overdue: usize,
    /// Not completed and due on the viewer's current calendar day.
    pub due_today: usize,
    /// `completed / total` as a rounded percentage; 0 when empty.
    pub completion_rate: u8,
    /// Most recently created tasks, newest first.
    pub recent: Vec<Task>,
}

impl DashboardStats {
    /// Compute the counters for `tasks` at `now`, with "today" taken in `tz`.
    pub fn compute<Tz: TimeZone>(tasks: &[Task], now: DateTime<Utc>, tz: &Tz) -> Self {
        let total = tasks.len();
        let completed = tasks.iter().filter(|t| t.is_completed()).count();
        let overdue = tasks.iter().filter(|t| t.is_overdue(now)).count();
        let today = now.with_timezone(tz).date_naive();
        let due_today = tasks
            .iter()
            .filter(|t| !t.is_completed())
            .filter_map(|t| t.due_date)
            .filter(|due| due.with_timezone(tz).date_naive() == today)
            .count();

        let completion_rate = if total == 0 {
            0
        } else {
            // Rounds half up; result is within 0..=100.
            u8::try_from((completed * 100 + total / 2) / total).unwrap_or(100)
        };

        let mut recent: Vec<Task> = tasks.to_vec();
        // Stable: undated tasks sort last, ties keep input order.
        recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        recent.truncate(RECENT_TASK_LIMIT);

        Self {
            total,
            completed,
            pending: total - completed,
            overdue,
            due_today,
            completion_rate,
            recent,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{due_in, now, task, with_status};
    use chrono::{Duration, FixedOffset};
    use smarttask_core::TaskStatus;

    #[test]
    fn empty_list() {
        let stats = DashboardStats::compute(&[], now(), &Utc);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.completion_rate, 0);
        assert!(stats.recent.is_empty());
    }

    #[test]
    fn counts_and_rate() {
        let tasks = vec![
            with_status(task(1), TaskStatus::Completed),
            with_status(due_in(2, Duration::hours(-1)), TaskStatus::Completed),
            due_in(3, Duration::hours(-1)),
        ];
        let stats = DashboardStats::compute(&tasks, now(), &Utc);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.completed, 2);
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.overdue, 1);
        assert_eq!(stats.completion_rate, 67);
    }

    #[test]
    fn due_today_counts_open_tasks_on_the_local_day() {
        // now() is 12:00 UTC on March 10.
        let tasks = vec![
            due_in(1, Duration::hours(-3)),
            due_in(2, Duration::hours(11)),
            with_status(due_in(3, Duration::hours(2)), TaskStatus::Completed),
            due_in(4, Duration::hours(13)),
            task(5),
        ];
        let stats = DashboardStats::compute(&tasks, now(), &Utc);
        assert_eq!(stats.due_today, 2);
        assert_eq!(stats.overdue, 1);
    }

    #[test]
    fn due_today_follows_the_viewer_time_zone() {
        // 23:30 UTC on March 10 is already March 11 at UTC+2.
        let late = due_in(1, Duration::minutes(11 * 60 + 30));
        assert_eq!(DashboardStats::compute(&[late.clone()], now(), &Utc).due_today, 1);
        let east = FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(DashboardStats::compute(&[late], now(), &east).due_today, 0);

        // At UTC-12 it is March 10 00:00, and 23:00 UTC is 11:00 the same day.
        let west = FixedOffset::west_opt(12 * 3600).unwrap();
        let evening = due_in(2, Duration::hours(11));
        assert_eq!(DashboardStats::compute(&[evening], now(), &west).due_today, 1);
    }

    #[test]
    fn recent_is_newest_five() {
        let tasks: Vec<Task> = (1..=7)
            .map(|i| {
                let mut t = task(i);
                t.created_at = Some(now() - Duration::days(i));
                t
            })
            .collect();
        let stats = DashboardStats::compute(&tasks, now(), &Utc);
        let ids: Vec<i64> = stats.recent.iter().map(|t| t.id.get()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn undated_tasks_sort_last() {
        let mut dated = task(2);
        dated.created_at = Some(now());
        let stats = DashboardStats::compute(&[task(1), dated], now(), &Utc);
        assert_eq!(stats.recent[0].id.get(), 2);
    }
}
