//! # smarttask-settings
//!
//! Layered configuration for the SmartTask client.
//!
//! Settings are loaded from three layers (in priority order):
//! 1. **Compiled defaults**: [`SmartTaskSettings::default()`]
//! 2. **User file**: `~/.smarttask/settings.json` (deep-merged over defaults)
//! 3. **Environment variables**: `SMARTTASK_*` overrides (highest priority)
//!
//! # Usage
//!
//! ```no_run
//! use smarttask_settings::load_settings;
//!
//! let settings = load_settings()?;
//! println!("API: {}", settings.api.api_root());
//! # Ok::<(), smarttask_settings::SettingsError>(())
//! ```

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{deep_merge, load_settings, load_settings_from_path, settings_path};
pub use types::*;

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
