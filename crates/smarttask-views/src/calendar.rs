//! The week calendar screen.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use smarttask_client::{TaskBackend, TaskQuery};
use smarttask_core::{Priority, Task, TaskCreateParams, WeekStart};
use smarttask_tasks::{CalendarWeek, DayCell, group_by_day};

use crate::error::{Result, ViewError, messages};

/// Tasks with a due date, laid out one week at a time.
pub struct CalendarView {
    backend: Arc<dyn TaskBackend>,
    week: CalendarWeek,
    selected: NaiveDate,
    preview_limit: usize,
    tasks: Vec<Task>,
    priorities: Vec<Priority>,
}

impl CalendarView {
    /// View on the week containing `today`, with `today` selected.
    pub fn new(
        backend: Arc<dyn TaskBackend>,
        today: NaiveDate,
        week_start: WeekStart,
        preview_limit: usize,
    ) -> Self {
        Self {
            backend,
            week: CalendarWeek::containing(today, week_start),
            selected: today,
            preview_limit,
            tasks: Vec::new(),
            priorities: Vec::new(),
        }
    }

    /// Fetch every task, keeping only those with a due date, and priorities.
    pub async fn load(&mut self) -> Result<()> {
        let tasks = self
            .backend
            .list_tasks(&TaskQuery::default())
            .await
            .map_err(|e| ViewError::from_client(messages::LOAD_CALENDAR, e))?;
        let priorities = self
            .backend
            .list_priorities()
            .await
            .map_err(|e| ViewError::from_client(messages::LOAD_CALENDAR, e))?;
        self.tasks = tasks.into_iter().filter(|t| t.due_date.is_some()).collect();
        self.priorities = priorities;
        Ok(())
    }

    /// Displayed week.
    pub fn week(&self) -> CalendarWeek {
        self.week
    }

    /// Show the following week.
    pub fn next_week(&mut self) {
        self.week = self.week.next();
    }

    /// Show the preceding week.
    pub fn previous_week(&mut self) {
        self.week = self.week.previous();
    }

    /// Jump `weeks` weeks and select the first day of the new week.
    pub fn shift_weeks(&mut self, weeks: i32) {
        if weeks == 0 {
            return;
        }
        self.week = self.week.offset(weeks);
        self.selected = self.week.start();
    }

    /// Select a day. The displayed week is left alone.
    pub fn select(&mut self, date: NaiveDate) {
        self.selected = date;
    }

    /// Selected day.
    pub fn selected(&self) -> NaiveDate {
        self.selected
    }

    /// Task titles shown per cell.
    pub fn preview_limit(&self) -> usize {
        self.preview_limit
    }

    /// Fetched tasks, all with a due date.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Priority reference data.
    pub fn priorities(&self) -> &[Priority] {
        &self.priorities
    }

    /// The seven cells of the displayed week in `tz`.
    pub fn cells<Tz: TimeZone>(&self, tz: &Tz) -> Vec<DayCell> {
        self.week.cells(&self.tasks, tz)
    }

    /// Every task due on the selected day in `tz`.
    pub fn selected_tasks<Tz: TimeZone>(&self, tz: &Tz) -> Vec<Task> {
        group_by_day(&self.tasks, tz)
            .remove(&self.selected)
            .unwrap_or_default()
    }

    /// Create a task. Without an explicit due date it is due at the start of
    /// the selected day in `tz`.
    pub async fn create<Tz: TimeZone>(
        &mut self,
        mut params: TaskCreateParams,
        tz: &Tz,
    ) -> Result<Task> {
        if params.due_date.is_none() {
            params.due_date = Some(start_of_day(self.selected, tz));
        }
        let task = self
            .backend
            .create_task(&params)
            .await
            .map_err(|e| ViewError::from_client(messages::CREATE_TASK, e))?;
        if task.due_date.is_some() {
            self.tasks.push(task.clone());
        }
        Ok(task)
    }
}

/// Local midnight of `date`, falling back to UTC midnight when it does not
/// exist in `tz`.
fn start_of_day<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> DateTime<Utc> {
    let midnight = date.and_time(NaiveTime::MIN);
    tz.from_local_datetime(&midnight)
        .earliest()
        .map_or_else(|| midnight.and_utc(), |dt| dt.with_timezone(&Utc))
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
