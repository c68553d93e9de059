// Framework bootstrap for the planner CLI.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use uuid::Uuid;

use crate::domain::failure::ClientError;
use crate::domain::import::ImportFile;
use crate::domain::ports::{Clock, Navigator, ToastSurface, Translator};
use crate::domain::task::{TaskFilter, TaskStatus};
use crate::domain::toast::{ToastPayload, ToastVariant};
use crate::frameworks::config::{ClientConfig, ConfigError};
use crate::interface_adapters::clock::SystemClock;
use crate::interface_adapters::i18n::{CatalogError, MessageCatalog};
use crate::interface_adapters::jwt;
use crate::interface_adapters::state::{AppParts, AppState};
use crate::interface_adapters::storage::FileKeyValueStore;

#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    // Already reported through the error handler.
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error("failed to read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Debug, Parser)]
#[command(name = "planner", version, about = "Time tracking and task planning client")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Exchange a Google id token for a planner session.
    Login { google_token: String },
    /// Show the signed-in user.
    Me,
    /// Show how long the stored access token stays valid.
    Session,
    Logout,
    /// List activities, optionally for one day.
    Activities {
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    Timer {
        #[command(subcommand)]
        action: TimerCommand,
    },
    Insights {
        #[command(subcommand)]
        period: InsightsCommand,
    },
    Tasks {
        #[arg(long)]
        list: Option<Uuid>,
        #[arg(long, value_enum)]
        status: Option<StatusArg>,
    },
    /// Upload an Excel workbook to import groups, categories and activities.
    Import { file: PathBuf },
}

#[derive(Debug, Subcommand)]
pub enum TimerCommand {
    Start { category_id: Uuid },
    Stop,
    /// Stop with an explicit end time (HH:mm).
    StopAt { end_time: String },
    Active,
}

#[derive(Debug, Subcommand)]
pub enum InsightsCommand {
    Daily {
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    Weekly {
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StatusArg {
    Todo,
    InProgress,
    Done,
}

impl From<StatusArg> for TaskStatus {
    fn from(value: StatusArg) -> Self {
        match value {
            StatusArg::Todo => TaskStatus::Todo,
            StatusArg::InProgress => TaskStatus::InProgress,
            StatusArg::Done => TaskStatus::Done,
        }
    }
}

// Toasts become log lines; ids only need to be unique per process.
#[derive(Default)]
pub struct TracingToastSurface {
    next_id: AtomicU64,
}

impl ToastSurface for TracingToastSurface {
    fn add_toast(&self, payload: ToastPayload) -> String {
        let id = format!("toast-{}", self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
        let title = payload.title.unwrap_or_default();
        let description = payload.description.unwrap_or_default();
        match payload.variant.unwrap_or_default() {
            ToastVariant::Error => tracing::error!(%title, "{description}"),
            ToastVariant::Warning => tracing::warn!(%title, "{description}"),
            ToastVariant::Success | ToastVariant::Default => {
                tracing::info!(%title, "{description}")
            }
        }
        id
    }

    fn remove_toast(&self, _id: &str) {}
}

pub struct TracingNavigator;

impl Navigator for TracingNavigator {
    fn navigate_to_login(&self) {
        tracing::warn!("session ended, sign in again with `planner login <google-token>`");
    }
}

pub fn init_runtime() {
    let _ = dotenvy::dotenv();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

fn load_catalog(config: &ClientConfig) -> Result<MessageCatalog, CatalogError> {
    let english = MessageCatalog::english();
    match &config.messages_path {
        Some(path) => Ok(english.merged(MessageCatalog::from_file(path)?)),
        None => Ok(english),
    }
}

pub async fn build_state(config: &ClientConfig) -> Result<AppState, RuntimeError> {
    let translator: Arc<dyn Translator> = Arc::new(load_catalog(config)?);
    let state = AppState::build(AppParts {
        http: config.http_settings(),
        storage: Arc::new(FileKeyValueStore::new(config.state_path.clone())),
        surface: Arc::new(TracingToastSurface::default()),
        navigator: Arc::new(TracingNavigator),
        translator,
        logger: config.logger_config(),
    })
    .await?;
    Ok(state)
}

pub async fn run(cli: Cli) -> Result<(), RuntimeError> {
    let config = ClientConfig::from_env()?;
    tracing::debug!(base_url = %config.api_base_url, state = %config.state_path.display(), "config loaded");
    let state = build_state(&config).await?;

    if !matches!(cli.command, Command::Login { .. } | Command::Session) {
        // One-shot commands check the token up front instead of keeping the scheduler alive.
        state.scheduler.refresh_if_due().await;
    }

    match cli.command {
        Command::Login { google_token } => {
            let response = state.auth.login_with_google(&google_token).await?;
            println!("Signed in as {} <{}>", response.user.name, response.user.email);
        }
        Command::Me => match state.auth.fetch_current_user().await? {
            Some(user) => println!("{} <{}> ({})", user.name, user.email, user.id),
            None => println!("Not signed in"),
        },
        Command::Session => print_session(&state),
        Command::Logout => {
            state.auth.logout().await;
            println!("Signed out");
        }
        Command::Activities { date } => {
            let activities = match date {
                Some(date) => state.activities.fetch_by_date(date).await?,
                None => state.activities.fetch_activities().await?,
            };
            for activity in activities {
                println!(
                    "{} {}-{} {}{}",
                    activity.date,
                    activity.start_time,
                    activity.end_time.as_deref().unwrap_or("..."),
                    activity.category_id,
                    activity
                        .notes
                        .map(|notes| format!("  {notes}"))
                        .unwrap_or_default()
                );
            }
        }
        Command::Timer { action } => run_timer(&state, action).await?,
        Command::Insights { period } => match period {
            InsightsCommand::Daily { date } => {
                let insight = state.insights.fetch_daily(date).await?;
                println!(
                    "{}: {:.0} min ({:+.0} vs {})",
                    insight.date,
                    insight.total_minutes,
                    insight.total_minutes_delta,
                    insight.previous_date
                );
            }
            InsightsCommand::Weekly { date } => {
                let insight = state.insights.fetch_weekly(date).await?;
                println!(
                    "{}..{}: {:.0} min ({:+.0} vs previous week)",
                    insight.week_start_date,
                    insight.week_end_date,
                    insight.total_minutes,
                    insight.total_minutes_delta
                );
            }
        },
        Command::Tasks { list, status } => {
            let filter = TaskFilter {
                list_id: list,
                status: status.map(TaskStatus::from),
            };
            for task in state.tasks.fetch_tasks(&filter).await? {
                println!("[{}] {} ({})", task.status.as_str(), task.title, task.id);
            }
        }
        Command::Import { file } => {
            let bytes = tokio::fs::read(&file)
                .await
                .map_err(|source| RuntimeError::ReadFile {
                    path: file.clone(),
                    source,
                })?;
            let file_name = file
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| "import.xlsx".to_string());
            let result = state
                .import
                .import_excel(ImportFile { file_name, bytes })
                .await?;
            println!(
                "Imported {} groups, {} categories, {} activities",
                result.groups_created, result.categories_created, result.activities_created
            );
            for error in result.errors {
                println!("  skipped: {error}");
            }
        }
    }

    Ok(())
}

async fn run_timer(state: &AppState, action: TimerCommand) -> Result<(), ClientError> {
    match action {
        TimerCommand::Start { category_id } => {
            let activity = state.timer.start(category_id).await?;
            println!("Timer started at {}", activity.start_time);
        }
        TimerCommand::Stop => {
            let activity = state.timer.stop().await?;
            println!(
                "Timer stopped at {}",
                activity.end_time.as_deref().unwrap_or("?")
            );
        }
        TimerCommand::StopAt { end_time } => {
            let activity = state.timer.stop_at(&end_time).await?;
            println!(
                "Timer stopped at {}",
                activity.end_time.as_deref().unwrap_or(&end_time)
            );
        }
        TimerCommand::Active => match state.timer.check_active().await? {
            Some(activity) => println!(
                "Running since {} ({})",
                activity.start_time,
                state.timer.elapsed_formatted(Local::now().naive_local()).await
            ),
            None => println!("No timer running"),
        },
    }
    Ok(())
}

fn print_session(state: &AppState) {
    let Some(token) = state.vault.token() else {
        println!("Not signed in");
        return;
    };
    let now = SystemClock.now_epoch_seconds();
    if jwt::is_expired(&token, now) {
        println!("Access token expired");
    } else {
        println!(
            "Access token valid for {}s",
            jwt::seconds_until_expiry(&token, now)
        );
    }
    if let Some(user) = state.vault.user() {
        println!("User: {} <{}>", user.name, user.email);
    }
}
