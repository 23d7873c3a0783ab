//! Week navigation and per-day grouping.
//!
//! Days are calendar dates in the viewer's time zone: two tasks share a day
//! cell when their due instants fall on the same local date, not when they
//! are within 24 hours of each other.

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate, TimeZone};
use smarttask_core::{Task, WeekStart};

/// Shift `date` by `days`, saturating at the representable range.
fn shift(date: NaiveDate, days: i64) -> NaiveDate {
    date.checked_add_signed(Duration::days(days)).unwrap_or(date)
}

/// First day of the week containing `date`.
pub fn start_of_week(date: NaiveDate, week_start: WeekStart) -> NaiveDate {
    let today = date.weekday().num_days_from_sunday();
    let first = week_start.weekday().num_days_from_sunday();
    let offset = (7 + today - first) % 7;
    shift(date, -i64::from(offset))
}

/// Seven consecutive dates beginning at `start`.
pub fn week_days(start: NaiveDate) -> [NaiveDate; 7] {
    let mut days = [start; 7];
    for (offset, day) in (0i64..).zip(days.iter_mut()) {
        *day = shift(start, offset);
    }
    days
}

/// Tasks with a due date keyed by local due date, each day sorted by due
/// instant. Tasks without a due date are dropped.
pub fn group_by_day<Tz: TimeZone>(tasks: &[Task], tz: &Tz) -> BTreeMap<NaiveDate, Vec<Task>> {
    let mut days: BTreeMap<NaiveDate, Vec<Task>> = BTreeMap::new();
    for task in tasks {
        if let Some(due) = task.due_date {
            let local = due.with_timezone(tz).date_naive();
            days.entry(local).or_default().push(task.clone());
        }
    }
    for bucket in days.values_mut() {
        bucket.sort_by_key(|t| t.due_date);
    }
    days
}

/// One day of a week grid.
#[derive(Debug, Clone, PartialEq)]
pub struct DayCell {
    /// Local date.
    pub date: NaiveDate,
    /// Every task due that day, earliest first.
    pub tasks: Vec<Task>,
}

impl DayCell {
    /// The first `limit` tasks, for a compact cell.
    pub fn previews(&self, limit: usize) -> &[Task] {
        &self.tasks[..self.tasks.len().min(limit)]
    }

    /// How many tasks `previews(limit)` leaves out.
    pub fn overflow(&self, limit: usize) -> usize {
        self.tasks.len().saturating_sub(limit)
    }
}

/// A displayed week.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarWeek {
    start: NaiveDate,
    week_start: WeekStart,
}

impl CalendarWeek {
    /// The week containing `date`.
    pub fn containing(date: NaiveDate, week_start: WeekStart) -> Self {
        Self {
            start: start_of_week(date, week_start),
            week_start,
        }
    }

    /// First day.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day (inclusive).
    pub fn end(&self) -> NaiveDate {
        shift(self.start, 6)
    }

    /// The configured first weekday.
    pub fn week_start(&self) -> WeekStart {
        self.week_start
    }

    /// The seven dates of the week.
    pub fn days(&self) -> [NaiveDate; 7] {
        week_days(self.start)
    }

    /// Whether `date` falls in this week.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end()
    }

    /// The week `weeks` away; negative goes back. Stays put if the target
    /// is out of the representable date range.
    #[must_use]
    pub fn offset(&self, weeks: i32) -> Self {
        Self {
            start: shift(self.start, i64::from(weeks) * 7),
            ..*self
        }
    }

    /// The following week.
    #[must_use]
    pub fn next(&self) -> Self {
        self.offset(1)
    }

    /// The preceding week.
    #[must_use]
    pub fn previous(&self) -> Self {
        self.offset(-1)
    }

    /// Header text, e.g. `Mar 9 - Mar 15, 2025`.
    pub fn label(&self) -> String {
        format!(
            "{} - {}",
            self.start.format("%b %-d"),
            self.end().format("%b %-d, %Y")
        )
    }

    /// Seven cells holding the tasks due on each day.
    pub fn cells<Tz: TimeZone>(&self, tasks: &[Task], tz: &Tz) -> Vec<DayCell> {
        let mut grouped = group_by_day(tasks, tz);
        self.days()
            .into_iter()
            .map(|date| DayCell {
                date,
                tasks: grouped.remove(&date).unwrap_or_default(),
            })
            .collect()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
