//! # smarttask-auth
//!
//! Persistence of the single bearer token the client holds.
//!
//! - [`storage`]: `~/.smarttask/auth.json` read/write with 0o600 permissions
//! - [`store`]: the [`TokenStore`] seam the API client reads the token
//!   through on every request, with file-backed and in-memory implementations

#![deny(unsafe_code)]

pub mod errors;
pub mod storage;
pub mod store;
pub mod types;

pub use errors::AuthError;
pub use storage::{auth_file_path, clear_auth_storage, load_auth_storage, save_auth_storage};
pub use store::{FileTokenStore, MemoryTokenStore, TokenStore};
pub use types::{AUTH_STORAGE_VERSION, AuthStorage, Credentials};
