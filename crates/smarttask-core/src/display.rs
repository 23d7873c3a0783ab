//! Display tones derived from task status and priority name.
//!
//! Views never pick colors themselves; they ask for a [`Tone`] and map it to
//! whatever their surface supports.

use crate::types::TaskStatus;

/// Semantic color class for a label or badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tone {
    /// Needs attention now.
    Error,
    /// Needs attention soon.
    Warning,
    /// Fine / done.
    Success,
    /// Informational.
    Info,
    /// No particular emphasis.
    Default,
}

/// Tone for a priority name (case-insensitive). Unknown or missing names
/// get [`Tone::Default`].
pub fn priority_tone(name: Option<&str>) -> Tone {
    match name.map(|n| n.trim().to_ascii_lowercase()).as_deref() {
        Some("high") => Tone::Error,
        Some("medium") => Tone::Warning,
        Some("low") => Tone::Success,
        _ => Tone::Default,
    }
}

/// Tone for a task status.
pub fn status_tone(status: TaskStatus) -> Tone {
    match status {
        TaskStatus::Completed => Tone::Success,
        TaskStatus::InProgress => Tone::Info,
        TaskStatus::Blocked => Tone::Error,
        TaskStatus::Open => Tone::Default,
    }
}
