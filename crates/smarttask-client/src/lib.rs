//! # smarttask-client
//!
//! Typed access to the SmartTask REST backend.
//!
//! - [`ApiClient`]: one `reqwest` client plus the token store it reads the
//!   bearer token from on every request
//! - [`TaskBackend`]: the async trait views consume, implemented by
//!   [`ApiClient`] and by test fakes
//!
//! No caching, retries or pagination: every call is a fresh request.

#![deny(unsafe_code)]

mod auth;
mod priorities;
mod tasks;

pub mod backend;
pub mod client;
pub mod errors;

pub use backend::{TaskBackend, TaskQuery};
pub use client::{ApiClient, ClientConfig, HealthStatus};
pub use errors::{ClientError, Result};
