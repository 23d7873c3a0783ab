//! # smarttask-views
//!
//! State holders for each screen of the client. Every view fetches its own
//! copy of the data through a [`TaskBackend`](smarttask_client::TaskBackend),
//! filters it locally, and reduces any failure to one user-facing
//! [`ViewError`] message. Views share nothing but the token store behind
//! the backend.

#![deny(unsafe_code)]

pub mod calendar;
pub mod dashboard;
pub mod detail;
pub mod error;
pub mod list;
pub mod recommendations;
pub mod session;

#[cfg(test)]
pub(crate) mod fake;

pub use calendar::CalendarView;
pub use dashboard::DashboardView;
pub use detail::DetailView;
pub use error::{ViewError, messages};
pub use list::ListView;
pub use recommendations::RecommendationsView;
pub use session::Session;
