//! # Launchdeck CLI Entry Point
//!
//! ## Usage
//!
//! ```bash
//! # Use the default config (created on first start)
//! launchdeck
//!
//! # Use another config file and log somewhere else
//! launchdeck --config ./launchdeck.json --log-file /tmp/launchdeck.log -vv
//!
//! # Let "o" on a place really open a shell there
//! LAUNCHDECK_LAUNCH_IN_DIR=1 launchdeck
//! ```
//!
//! ## Key Bindings
//!
//! - `Tab` / `Shift+Tab` - Cycle focus between Places, Applications and Shortcuts
//! - `j` / `Down`, `k` / `Up` - Move the cursor in the focused panel
//! - `Enter` - Preview the entry, or launch it in the Applications panel
//! - `a` - Add an application (Applications panel)
//! - `o` - Open a shell in the highlighted place
//! - `r` - Refresh the dashboard
//! - `Esc` - Clear the preview, or cancel the add form
//! - `q` / `Ctrl+C` - Quit
//!
//! ## Logging
//!
//! The dashboard owns the screen, so logs never go to stderr. They are
//! appended to `--log-file`, or to `launchdeck.log` in the user cache
//! directory (`~/.cache/launchdeck/` on Linux).

use launchdeck::config::{Config, ConfigStore};
use launchdeck::launch::HandoffController;
use launchdeck::session::{self, CrosstermEventReader, ShutdownSignals};
use launchdeck::ui::app::DashboardSnapshot;
use launchdeck::ui::terminal::{self, CrosstermTerminal};
use launchdeck::ui::theme::Theme;
use launchdeck::ui::App;

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{error, info};

/// Launchdeck - a terminal dashboard for places, applications and shortcuts
#[derive(Parser, Debug)]
#[command(name = "launchdeck")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Keyboard-driven terminal dashboard for launching programs", long_about = None)]
struct Args {
    /// Config file to use instead of the default location
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Append logs to this file instead of the default log in the cache directory
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let log_path = log_file_path(args.log_file.as_deref())?;
    init_tracing(args.verbose, &log_path)?;

    terminal::install_panic_hook();

    run_application(args).await
}

fn init_tracing(verbose: u8, log_path: &Path) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    let file = open_log_file(log_path)?;
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .with(filter)
        .try_init()
        .context("Failed to initialize tracing subscriber")?;

    Ok(())
}

fn log_file_path(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    let dirs = directories::ProjectDirs::from("", "", "launchdeck")
        .context("Could not determine cache directory")?;
    Ok(dirs.cache_dir().join("launchdeck.log"))
}

fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))
}

fn open_store(args: &Args) -> Result<ConfigStore> {
    let path = match &args.config {
        Some(path) => path.clone(),
        None => Config::default_path()?,
    };
    ConfigStore::open(&path)
        .with_context(|| format!("Failed to load config: {}", path.display()))
}

async fn run_application(args: Args) -> Result<()> {
    let store = open_store(&args)?;
    let theme = Theme::resolve(store.config().theme.as_deref()).clone();
    info!(config = %store.path().display(), theme = theme.name, "starting");

    let mut app = App::new(store, theme, DashboardSnapshot::capture());
    let mut shutdown = ShutdownSignals::install()?;
    let mut terminal = CrosstermTerminal::enter()?;
    let mut events = CrosstermEventReader;
    let mut controller = HandoffController::new();

    let result = session::run_session(
        &mut terminal,
        &mut app,
        &mut events,
        &mut shutdown,
        &mut controller,
    )
    .await;

    finish(result, terminal.restore())
}

/// A session error is reported over a failed terminal restore, which is only
/// logged then.
fn finish(session: Result<()>, restored: Result<()>) -> Result<()> {
    if let Err(e) = &restored {
        error!("Failed to restore terminal: {e:#}");
    }
    session.and(restored)
}
