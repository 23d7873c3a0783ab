//! # smarttask
//!
//! Command-line client for the SmartTask backend. Wires settings, logging,
//! token storage and the HTTP client together, then drives the views.

#![deny(unsafe_code)]

mod input;
mod render;

use std::io::Write as _;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use chrono::{Local, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use smarttask_auth::{FileTokenStore, TokenStore};
use smarttask_client::{ApiClient, ClientConfig, TaskBackend};
use smarttask_core::{
    LogFormat, PriorityCreateParams, PriorityId, TaskCreateParams, TaskId, TaskStatus,
    TaskUpdateParams, UserCreateParams, UserUpdateParams, WeekStart, init_subscriber,
};
use smarttask_settings::{
    SmartTaskSettings, load_settings, load_settings_from_path, settings_path,
};
use smarttask_tasks::{CompletionFilter, RecommendationConfig, RecommendationKind, TaskFilter};
use smarttask_views::{
    CalendarView, DashboardView, DetailView, ListView, RecommendationsView, Session,
};

use crate::render::Palette;

/// SmartTask command-line client.
#[derive(Parser, Debug)]
#[command(name = "smarttask", about = "SmartTask command-line client", version)]
struct Cli {
    /// Settings file (defaults to ~/.smarttask/settings.json).
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    /// Backend base URL (overrides settings).
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Log filter, e.g. `debug` or `smarttask_client=trace`.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in and store the access token.
    Login {
        /// Account name.
        #[arg(long, short)]
        username: String,
        /// Password; prompted for when omitted.
        #[arg(long, short)]
        password: Option<String>,
    },
    /// Create an account and log in.
    Register {
        /// Account name (letters and digits).
        #[arg(long, short)]
        username: String,
        /// Password, at least 8 characters; prompted for when omitted.
        #[arg(long, short)]
        password: Option<String>,
        /// Contact address.
        #[arg(long)]
        email: Option<String>,
    },
    /// Forget the stored token.
    Logout,
    /// Show the logged-in account.
    Whoami,
    /// Update the logged-in account.
    Profile {
        /// New contact address.
        #[arg(long)]
        email: String,
    },
    /// Check that the backend is reachable.
    Health,
    /// List and edit tasks.
    #[command(subcommand)]
    Tasks(TaskCommand),
    /// Inspect and edit task dependencies.
    #[command(subcommand)]
    Deps(DepCommand),
    /// Inspect and add priorities.
    #[command(subcommand)]
    Priorities(PriorityCommand),
    /// Show a week of due dates.
    Calendar {
        /// Day to select (defaults to today).
        #[arg(long)]
        date: Option<NaiveDate>,
        /// First day of the week: sunday or monday (overrides settings).
        #[arg(long)]
        week_start: Option<WeekStart>,
        /// Weeks to move forward (negative moves back).
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        offset: i32,
    },
    /// Show what needs attention.
    Recommend,
    /// Show dashboard counters.
    Stats,
}

#[derive(Subcommand, Debug)]
enum TaskCommand {
    /// List tasks.
    List {
        /// all, open, completed, in_progress or blocked.
        #[arg(long)]
        status: Option<CompletionFilter>,
        /// Priority id.
        #[arg(long)]
        priority: Option<PriorityId>,
        /// Title substring.
        #[arg(long)]
        search: Option<String>,
        /// overdue, high-priority, due-soon or in-progress.
        #[arg(long)]
        kind: Option<RecommendationKind>,
    },
    /// Show one task and its dependencies.
    Show {
        /// Task id.
        id: TaskId,
    },
    /// Create a task.
    Create {
        /// Title, at most 100 characters.
        title: String,
        /// Priority id.
        #[arg(long)]
        priority: PriorityId,
        /// Longer description.
        #[arg(long)]
        description: Option<String>,
        /// Due date: YYYY-MM-DD, YYYY-MM-DD HH:MM (local) or RFC 3339.
        #[arg(long)]
        due: Option<String>,
        /// Initial status.
        #[arg(long)]
        status: Option<TaskStatus>,
    },
    /// Change fields of a task.
    Update {
        /// Task id.
        id: TaskId,
        /// New title.
        #[arg(long)]
        title: Option<String>,
        /// New description.
        #[arg(long, conflicts_with = "clear_description")]
        description: Option<String>,
        /// Remove the description.
        #[arg(long)]
        clear_description: bool,
        /// New status.
        #[arg(long)]
        status: Option<TaskStatus>,
        /// New priority id.
        #[arg(long)]
        priority: Option<PriorityId>,
        /// New due date.
        #[arg(long, conflicts_with = "clear_due")]
        due: Option<String>,
        /// Remove the due date.
        #[arg(long)]
        clear_due: bool,
    },
    /// Delete a task.
    Delete {
        /// Task id.
        id: TaskId,
    },
}

#[derive(Subcommand, Debug)]
enum DepCommand {
    /// Tasks a task depends on.
    List {
        /// Task id.
        id: TaskId,
    },
    /// Make `id` depend on `depends_on`.
    Add {
        /// Task id.
        id: TaskId,
        /// Task it should depend on.
        depends_on: TaskId,
    },
    /// Drop the dependency of `id` on `depends_on`.
    Remove {
        /// Task id.
        id: TaskId,
        /// Task it depends on.
        depends_on: TaskId,
    },
}

#[derive(Subcommand, Debug)]
enum PriorityCommand {
    /// List priorities.
    List,
    /// Show one priority.
    Show {
        /// Priority id.
        id: PriorityId,
    },
    /// Create a priority.
    Create {
        /// Display name.
        name: String,
        /// Sort weight.
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        weight: i32,
    },
}

/// Settings from `--settings` (or the default path) with flag overrides.
fn resolve_settings(cli: &Cli) -> Result<SmartTaskSettings> {
    let mut settings = match cli.settings {
        Some(ref path) => load_settings_from_path(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => load_settings().with_context(|| {
            format!("Failed to load settings from {}", settings_path().display())
        })?,
    };
    if let Some(ref url) = cli.base_url {
        settings.api.base_url.clone_from(url);
    }
    if let Some(ref level) = cli.log_level {
        settings.logging.level.clone_from(level);
    }
    settings.validate().context("Invalid settings")?;
    Ok(settings)
}

/// An update field: `Some(None)` when `clear` is set.
fn patch<T>(value: Option<T>, clear: bool) -> Option<Option<T>> {
    if clear { Some(None) } else { value.map(Some) }
}

/// Read a line from stdin after printing `label` to stderr.
fn prompt(label: &str) -> Result<String> {
    eprint!("{label}");
    std::io::stderr().flush()?;
    let mut line = String::new();
    let _ = std::io::stdin()
        .read_line(&mut line)
        .context("Failed to read from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Everything a command needs.
struct App {
    settings: SmartTaskSettings,
    client: ApiClient,
    palette: Palette,
}

impl App {
    fn new(settings: SmartTaskSettings, palette: Palette) -> Result<Self> {
        let tokens: Arc<dyn TokenStore> = Arc::new(FileTokenStore::new(settings.auth.token_path()));
        let client = ApiClient::new(ClientConfig::from_settings(&settings.api), tokens)
            .context("Failed to build HTTP client")?;
        Ok(Self {
            settings,
            client,
            palette,
        })
    }

    fn backend(&self) -> Arc<dyn TaskBackend> {
        Arc::new(self.client.clone())
    }

    fn recommendation_config(&self) -> RecommendationConfig {
        RecommendationConfig::new(
            self.settings.recommendations.due_soon_hours,
            self.settings.recommendations.max_tasks_per_bucket,
        )
    }

    #[tracing::instrument(skip_all)]
    async fn run(&self, command: Command) -> Result<String> {
        match command {
            Command::Login { username, password } => {
                let password = match password {
                    Some(p) => p,
                    None => prompt("Password: ")?,
                };
                let mut session = Session::new(self.client.clone());
                let user = session.login(&username, &password).await?;
                Ok(format!("Logged in as {}", render::user(user)))
            }
            Command::Register {
                username,
                password,
                email,
            } => {
                let password = match password {
                    Some(p) => p,
                    None => prompt("Password: ")?,
                };
                let mut session = Session::new(self.client.clone());
                let user = session
                    .register(&UserCreateParams {
                        username,
                        password,
                        email,
                    })
                    .await?;
                Ok(format!("Registered and logged in as {}", render::user(user)))
            }
            Command::Logout => {
                Session::new(self.client.clone()).logout()?;
                Ok("Logged out.".to_string())
            }
            Command::Whoami => {
                let mut session = Session::new(self.client.clone());
                match session.restore().await? {
                    Some(user) => Ok(render::user(user)),
                    None => bail!("Not logged in. Run `smarttask login` first."),
                }
            }
            Command::Profile { email } => {
                let mut session = Session::new(self.client.clone());
                let user = session
                    .update_profile(&UserUpdateParams { email: Some(email) })
                    .await?;
                Ok(format!("Updated {}", render::user(user)))
            }
            Command::Health => {
                let health = self
                    .client
                    .health()
                    .await
                    .with_context(|| format!("{} is unreachable", self.client.base_url()))?;
                Ok(format!("{}: {}", self.client.base_url(), health.status))
            }
            Command::Tasks(cmd) => self.run_tasks(cmd).await,
            Command::Deps(cmd) => self.run_deps(cmd).await,
            Command::Priorities(cmd) => self.run_priorities(cmd).await,
            Command::Calendar {
                date,
                week_start,
                offset,
            } => self.run_calendar(date, week_start, offset).await,
            Command::Recommend => {
                let now = Utc::now();
                let mut view = RecommendationsView::new(self.backend(), self.recommendation_config());
                let buckets = view.load(now).await?;
                Ok(render::recommendations(buckets, now, &Local, self.palette))
            }
            Command::Stats => {
                let now = Utc::now();
                let stats = DashboardView::new(self.backend()).load(now, &Local).await?;
                Ok(render::stats(&stats, now, &Local, self.palette))
            }
        }
    }

    async fn run_tasks(&self, cmd: TaskCommand) -> Result<String> {
        let now = Utc::now();
        match cmd {
            TaskCommand::List {
                status,
                priority,
                search,
                kind,
            } => {
                let mut filter = TaskFilter::new();
                if let Some(status) = status {
                    filter = filter.completion(status);
                }
                if let Some(priority) = priority {
                    filter = filter.priority(priority);
                }
                if let Some(search) = search {
                    filter = filter.text(search);
                }
                if let Some(kind) = kind {
                    filter = filter.kind(kind);
                }
                let mut view = ListView::new(self.backend(), self.recommendation_config());
                view.set_filter(filter);
                view.load().await?;
                Ok(render::task_list(
                    &view.visible(now),
                    view.priorities(),
                    now,
                    &Local,
                    self.palette,
                ))
            }
            TaskCommand::Show { id } => {
                let view = DetailView::load(self.backend(), id).await?;
                Ok(render::task_detail(
                    view.task(),
                    view.dependencies(),
                    view.priorities(),
                    now,
                    &Local,
                    self.palette,
                ))
            }
            TaskCommand::Create {
                title,
                priority,
                description,
                due,
                status,
            } => {
                let due_date = due
                    .map(|raw| input::parse_due(&raw, &Local))
                    .transpose()
                    .map_err(anyhow::Error::msg)?;
                let params = TaskCreateParams {
                    description,
                    status,
                    due_date,
                    ..TaskCreateParams::new(title, priority)
                };
                let mut view = ListView::new(self.backend(), self.recommendation_config());
                let task = view.create(&params).await?;
                Ok(format!(
                    "Created {}",
                    render::task_line(&task, &[], now, &Local, self.palette)
                ))
            }
            TaskCommand::Update {
                id,
                title,
                description,
                clear_description,
                status,
                priority,
                due,
                clear_due,
            } => {
                let due_date = due
                    .map(|raw| input::parse_due(&raw, &Local))
                    .transpose()
                    .map_err(anyhow::Error::msg)?;
                let params = TaskUpdateParams {
                    title,
                    description: patch(description, clear_description),
                    status,
                    priority_id: priority,
                    due_date: patch(due_date, clear_due),
                };
                if params.is_empty() {
                    bail!(
                        "Nothing to update. Pass at least one of --title, --description, \
                         --clear-description, --status, --priority, --due, --clear-due."
                    );
                }
                let mut view = DetailView::load(self.backend(), id).await?;
                let task = view.update(&params).await?;
                Ok(format!(
                    "Updated {}",
                    render::task_line(task, &[], now, &Local, self.palette)
                ))
            }
            TaskCommand::Delete { id } => {
                let mut view = ListView::new(self.backend(), self.recommendation_config());
                view.delete(id).await?;
                Ok(format!("Deleted task #{id}."))
            }
        }
    }

    async fn run_deps(&self, cmd: DepCommand) -> Result<String> {
        let now = Utc::now();
        match cmd {
            DepCommand::List { id } => {
                let view = DetailView::load(self.backend(), id).await?;
                Ok(render::task_list(
                    view.dependencies(),
                    view.priorities(),
                    now,
                    &Local,
                    self.palette,
                ))
            }
            DepCommand::Add { id, depends_on } => {
                let mut view = DetailView::load(self.backend(), id).await?;
                view.add_dependency(depends_on).await?;
                Ok(format!(
                    "Task #{id} now depends on:\n{}",
                    render::task_list(
                        view.dependencies(),
                        view.priorities(),
                        now,
                        &Local,
                        self.palette
                    )
                ))
            }
            DepCommand::Remove { id, depends_on } => {
                let mut view = DetailView::load(self.backend(), id).await?;
                match view.remove_dependency(depends_on).await? {
                    Some(task) => Ok(format!(
                        "Task #{id} no longer depends on #{} {}.",
                        task.id, task.title
                    )),
                    None => Ok(format!("Task #{id} no longer depends on #{depends_on}.")),
                }
            }
        }
    }

    async fn run_priorities(&self, cmd: PriorityCommand) -> Result<String> {
        match cmd {
            PriorityCommand::List => {
                let priorities = self
                    .client
                    .list_priorities()
                    .await
                    .context("Failed to load priorities")?;
                Ok(priorities
                    .iter()
                    .map(|p| render::priority_line(p, self.palette))
                    .collect::<Vec<_>>()
                    .join("\n"))
            }
            PriorityCommand::Show { id } => {
                let priority = self
                    .client
                    .get_priority(id)
                    .await
                    .with_context(|| format!("Failed to load priority #{id}"))?;
                Ok(render::priority_line(&priority, self.palette))
            }
            PriorityCommand::Create { name, weight } => {
                let priority = self
                    .client
                    .create_priority(&PriorityCreateParams { name, weight })
                    .await
                    .context("Failed to create priority")?;
                Ok(format!(
                    "Created {}",
                    render::priority_line(&priority, self.palette)
                ))
            }
        }
    }

    async fn run_calendar(
        &self,
        date: Option<NaiveDate>,
        week_start: Option<WeekStart>,
        offset: i32,
    ) -> Result<String> {
        let now = Utc::now();
        let today = date.unwrap_or_else(|| now.with_timezone(&Local).date_naive());
        let week_start = week_start.unwrap_or(self.settings.calendar.week_start);
        let mut view = CalendarView::new(
            self.backend(),
            today,
            week_start,
            self.settings.calendar.preview_limit,
        );
        view.shift_weeks(offset);
        view.load().await?;
        Ok(render::calendar(
            view.week(),
            &view.cells(&Local),
            view.selected(),
            &view.selected_tasks(&Local),
            view.preview_limit(),
            now,
            &Local,
            self.palette,
        ))
    }
}

async fn run(cli: Cli) -> Result<String> {
    let settings = resolve_settings(&cli)?;
    let format = if settings.logging.json {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };
    init_subscriber(&settings.logging.level, format);

    let app = App::new(settings, Palette::detect())?;
    app.run(cli.command).await
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::debug!(error = ?err, "command failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
