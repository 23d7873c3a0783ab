//! Parsing of user-typed values that clap cannot handle on its own.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use smarttask_core::time::parse_timestamp;

/// Local wall-clock layouts, tried after a bare date.
const LOCAL_FORMATS: &[&str] = &["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"];

/// Parse a due date typed on the command line.
///
/// A bare date (`2025-03-14`) means local midnight, a date with a time is
/// local wall-clock time, anything with an offset (`...Z`, `+02:00`) is taken
/// as written.
pub fn parse_due<Tz: TimeZone>(raw: &str, tz: &Tz) -> Result<DateTime<Utc>, String> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return local(date.and_time(NaiveTime::MIN), tz)
            .ok_or_else(|| format!("{raw} does not exist in the local time zone"));
    }
    if let Some(naive) = LOCAL_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
    {
        return local(naive, tz)
            .ok_or_else(|| format!("{raw} does not exist in the local time zone"));
    }
    if raw.ends_with('Z') || raw.contains('+') || raw.rfind('-').is_some_and(|i| i > 10) {
        if let Some(dt) = parse_timestamp(raw) {
            return Ok(dt);
        }
    }
    Err(format!(
        "invalid due date '{raw}' (expected YYYY-MM-DD, YYYY-MM-DD HH:MM or RFC 3339)"
    ))
}

fn local<Tz: TimeZone>(naive: NaiveDateTime, tz: &Tz) -> Option<DateTime<Utc>> {
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
