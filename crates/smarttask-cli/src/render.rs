//! Plain-text rendering of view state.
//!
//! Every function returns a `String` so output can be tested without a
//! terminal. Color is applied through [`Palette`], which maps a [`Tone`] to
//! an ANSI code only when stdout is a terminal.

use std::fmt::{Display, Write as _};
use std::io::IsTerminal;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use smarttask_core::{Priority, Task, Tone, User, priority_tone, status_tone};
use smarttask_tasks::{CalendarWeek, DashboardStats, DayCell, Recommendation};

/// Tone → ANSI color mapping, or nothing at all.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    /// Colors on when stdout is a terminal and `NO_COLOR` is unset.
    pub fn detect() -> Self {
        let enabled = std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none();
        Self { enabled }
    }

    /// Never colors.
    pub fn plain() -> Self {
        Self { enabled: false }
    }

    /// Wrap `text` in the color for `tone`.
    pub fn paint(self, tone: Tone, text: &str) -> String {
        let code = match tone {
            Tone::Error => "31",
            Tone::Warning => "33",
            Tone::Success => "32",
            Tone::Info => "36",
            Tone::Default => return text.to_string(),
        };
        if self.enabled {
            format!("\x1b[{code}m{text}\x1b[0m")
        } else {
            text.to_string()
        }
    }
}

fn local_time<Tz: TimeZone>(at: DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: Display,
{
    at.with_timezone(tz).format("%Y-%m-%d %H:%M").to_string()
}

fn priority_label<'a>(task: &'a Task, priorities: &'a [Priority]) -> Option<&'a str> {
    task.priority_name().or_else(|| {
        priorities
            .iter()
            .find(|p| p.id == task.priority_id)
            .map(|p| p.name.as_str())
    })
}

/// One line per task: id, status, title, priority and due date.
pub fn task_line<Tz: TimeZone>(
    task: &Task,
    priorities: &[Priority],
    now: DateTime<Utc>,
    tz: &Tz,
    palette: Palette,
) -> String
where
    Tz::Offset: Display,
{
    let mut line = format!(
        "#{:<4} {:<12} {}",
        task.id,
        palette.paint(status_tone(task.status), task.status.label()),
        task.title
    );
    if let Some(name) = priority_label(task, priorities) {
        let _ = write!(line, "  [{}]", palette.paint(priority_tone(Some(name)), name));
    }
    if let Some(due) = task.due_date {
        let when = local_time(due, tz);
        if task.is_overdue(now) {
            let _ = write!(line, "  {}", palette.paint(Tone::Error, &format!("overdue {when}")));
        } else {
            let _ = write!(line, "  due {when}");
        }
    }
    line
}

/// A list of tasks, or a placeholder when empty.
pub fn task_list<Tz: TimeZone>(
    tasks: &[Task],
    priorities: &[Priority],
    now: DateTime<Utc>,
    tz: &Tz,
    palette: Palette,
) -> String
where
    Tz::Offset: Display,
{
    if tasks.is_empty() {
        return "No tasks found.".to_string();
    }
    tasks
        .iter()
        .map(|t| task_line(t, priorities, now, tz, palette))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Full task record plus its dependencies.
pub fn task_detail<Tz: TimeZone>(
    task: &Task,
    dependencies: &[Task],
    priorities: &[Priority],
    now: DateTime<Utc>,
    tz: &Tz,
    palette: Palette,
) -> String
where
    Tz::Offset: Display,
{
    let mut out = task_line(task, priorities, now, tz, palette);
    if let Some(ref description) = task.description {
        if !description.trim().is_empty() {
            let _ = write!(out, "\n\n{}", description.trim());
        }
    }
    if let Some(created) = task.created_at {
        let _ = write!(out, "\n\ncreated {}", local_time(created, tz));
        if let Some(updated) = task.updated_at {
            let _ = write!(out, ", updated {}", local_time(updated, tz));
        }
    }
    out.push_str("\n\nDepends on:");
    if dependencies.is_empty() {
        out.push_str(" nothing");
    }
    for dep in dependencies {
        let _ = write!(out, "\n  {}", task_line(dep, priorities, now, tz, palette));
    }
    out
}

/// Recommendation buckets, highest weight first.
pub fn recommendations<Tz: TimeZone>(
    buckets: &[Recommendation],
    now: DateTime<Utc>,
    tz: &Tz,
    palette: Palette,
) -> String
where
    Tz::Offset: Display,
{
    if buckets.is_empty() {
        return "Nothing needs attention right now.".to_string();
    }
    let mut sections = Vec::with_capacity(buckets.len());
    for bucket in buckets {
        let mut section = format!(
            "{}\n{}",
            palette.paint(bucket.kind.tone(), &bucket.title),
            bucket.description
        );
        for task in &bucket.tasks {
            let _ = write!(section, "\n  {}", task_line(task, &[], now, tz, palette));
        }
        if bucket.hidden() > 0 {
            let _ = write!(
                section,
                "\n  ...and {} more (smarttask tasks list --kind {})",
                bucket.hidden(),
                bucket.kind.slug()
            );
        }
        sections.push(section);
    }
    sections.join("\n\n")
}

/// The week grid followed by the selected day's tasks.
#[allow(clippy::too_many_arguments)]
pub fn calendar<Tz: TimeZone>(
    week: CalendarWeek,
    cells: &[DayCell],
    selected: NaiveDate,
    selected_tasks: &[Task],
    preview_limit: usize,
    now: DateTime<Utc>,
    tz: &Tz,
    palette: Palette,
) -> String
where
    Tz::Offset: Display,
{
    let mut out = week.label();
    for cell in cells {
        let marker = if cell.date == selected { '>' } else { ' ' };
        let _ = write!(out, "\n{marker} {}", cell.date.format("%a %d"));
        for task in cell.previews(preview_limit) {
            let tone = priority_tone(task.priority_name());
            let _ = write!(out, "\n      {}", palette.paint(tone, &task.title));
        }
        if cell.overflow(preview_limit) > 0 {
            let _ = write!(out, "\n      +{} more", cell.overflow(preview_limit));
        }
    }
    let _ = write!(out, "\n\n{}:", selected.format("%A, %B %-d"));
    if selected_tasks.is_empty() {
        out.push_str(" no tasks due");
    }
    for task in selected_tasks {
        let _ = write!(out, "\n  {}", task_line(task, &[], now, tz, palette));
    }
    out
}

/// Dashboard counters and recent tasks.
pub fn stats<Tz: TimeZone>(
    stats: &DashboardStats,
    now: DateTime<Utc>,
    tz: &Tz,
    palette: Palette,
) -> String
where
    Tz::Offset: Display,
{
    let mut out = format!(
        "Total: {}  Completed: {}  Pending: {}  Overdue: {}  Due today: {}\nCompletion: {}%",
        stats.total,
        palette.paint(Tone::Success, &stats.completed.to_string()),
        stats.pending,
        palette.paint(
            if stats.overdue > 0 { Tone::Error } else { Tone::Default },
            &stats.overdue.to_string()
        ),
        palette.paint(
            if stats.due_today > 0 { Tone::Warning } else { Tone::Default },
            &stats.due_today.to_string()
        ),
        stats.completion_rate
    );
    if !stats.recent.is_empty() {
        out.push_str("\n\nRecent:");
        for task in &stats.recent {
            let _ = write!(out, "\n  {}", task_line(task, &[], now, tz, palette));
        }
    }
    out
}

/// A priority row.
pub fn priority_line(priority: &Priority, palette: Palette) -> String {
    format!(
        "#{:<4} {} (weight {})",
        priority.id,
        palette.paint(priority_tone(Some(&priority.name)), &priority.name),
        priority.weight
    )
}

/// Account summary.
pub fn user(user: &User) -> String {
    match user.email {
        Some(ref email) => format!("{} <{email}> (#{})", user.username, user.id),
        None => format!("{} (#{})", user.username, user.id),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
