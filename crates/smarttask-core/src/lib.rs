//! # smarttask-core
//!
//! Foundation types shared by every SmartTask crate:
//!
//! - **Typed IDs**: `TaskId`, `PriorityId`, `UserId`, `DependencyId` as
//!   newtypes over the backend's integer keys
//! - **Domain records**: [`Task`], [`Priority`], [`User`], [`Dependency`]
//!   and their create/update payloads
//! - **Wire time**: lenient timestamp parsing for backend datetimes
//! - **Validation**: client-side checks applied before any request is sent
//! - **Display tones**: the status/priority → color mapping used by views
//! - **Logging**: `tracing` subscriber initialization

#![deny(unsafe_code)]

pub mod display;
pub mod ids;
pub mod logging;
pub mod time;
pub mod types;
pub mod validation;

pub use display::{Tone, priority_tone, status_tone};
pub use logging::{LogFormat, init_subscriber};
pub use ids::{DependencyId, PriorityId, TaskId, UserId};
pub use types::{
    Dependency, LoginResponse, Priority, PriorityCreateParams, Task, TaskCreateParams, TaskStatus,
    TaskUpdateParams, UnknownStatus, User, UserCreateParams, UserUpdateParams, WeekStart,
};
pub use validation::{ValidationError, ValidationIssue};
