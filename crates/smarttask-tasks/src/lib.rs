//! # smarttask-tasks
//!
//! Pure functions over fetched task lists. Nothing here performs I/O; every
//! function that depends on the clock takes `now` explicitly.
//!
//! - [`recommend`]: bucket tasks into Overdue / High priority / Due soon /
//!   In progress recommendations
//! - [`filter`]: client-side list filtering
//! - [`calendar`]: week navigation and per-day grouping in a viewer time zone
//! - [`detail`]: dependency picker bookkeeping
//! - [`stats`]: dashboard counters

#![deny(unsafe_code)]

pub mod calendar;
pub mod detail;
pub mod filter;
pub mod recommend;
pub mod stats;

#[cfg(test)]
pub(crate) mod fixtures;

pub use calendar::{CalendarWeek, DayCell, group_by_day, start_of_week, week_days};
pub use detail::DependencyPicker;
pub use filter::{CompletionFilter, TaskFilter, UnknownCompletion};
pub use recommend::{
    Recommendation, RecommendationConfig, RecommendationKind, UnknownKind, matching_tasks,
    recommend, recommend_with,
};
pub use stats::{DashboardStats, RECENT_TASK_LIMIT};
