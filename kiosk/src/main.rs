//! Review Kiosk - terminal star-rating review collector.
//!
//! # Commands
//!
//! - `review-kiosk run`: Start the interactive kiosk
//! - `review-kiosk url`: Print the review-platform link for a place
//!
//! # Environment Variables
//!
//! See the [`config`](review_kiosk::config) module for available
//! configuration options. Command-line flags take precedence.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use review_kiosk::config::Config;
use review_kiosk::error::TuiError;
use review_kiosk::form::{redirect_url_for, ReviewWidget};
use review_kiosk::review::{ReviewInput, ReviewRecord};
use review_kiosk::sink::JsonLinesSink;
use review_kiosk::tui::{install_panic_hook, App, Tui};

/// Capacity of the channel carrying timer completions.
const TIMER_CHANNEL_CAPACITY: usize = 16;

/// Review Kiosk - terminal star-rating review collector.
///
/// Shows a branded splash screen, collects a name and three star ratings,
/// then points the customer to the public review page.
#[derive(Parser, Debug)]
#[command(name = "review-kiosk")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "\
ENVIRONMENT VARIABLES:
    REVIEW_PLACE_ID         Review platform place identifier (default: PLACE_ID)
    REVIEW_BRAND            Brand shown on the splash screen (default: Pietra Fina)
    REVIEW_SPLASH           Set to false to skip the splash screen
    REVIEW_SPLASH_MS        Splash duration in milliseconds (default: 1800)
    REVIEW_SUBMIT_DELAY_MS  Submission delay in milliseconds (default: 1000)
    REVIEW_OUTPUT           JSON Lines file receiving submitted reviews
    REVIEW_LOG_FILE         File receiving log output (RUST_LOG sets the level)

EXAMPLES:
    # Start the kiosk for a place, recording reviews
    review-kiosk run --place-id ChIJebKgpDisKIQRyMQkUb7GbqM --output reviews.jsonl

    # Print the review link
    review-kiosk url --place-id ChIJebKgpDisKIQRyMQkUb7GbqM
")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

/// CLI subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Start the interactive kiosk.
    Run(RunArgs),

    /// Print the review-platform link.
    Url {
        /// Place identifier (overrides REVIEW_PLACE_ID).
        #[arg(long)]
        place_id: Option<String>,
    },
}

/// Flags for `review-kiosk run`.
#[derive(Args, Debug, Default)]
struct RunArgs {
    /// Place identifier (overrides REVIEW_PLACE_ID).
    #[arg(long)]
    place_id: Option<String>,

    /// Start directly on the form.
    #[arg(long)]
    no_splash: bool,

    /// Append submitted reviews to this JSON Lines file.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write logs to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl RunArgs {
    /// Applies the flags on top of the environment configuration.
    fn apply(self, config: &mut Config) {
        if let Some(place_id) = self.place_id {
            config.place_id = place_id;
        }
        if self.no_splash {
            config.splash_enabled = false;
        }
        if self.output.is_some() {
            config.output = self.output;
        }
        if self.log_file.is_some() {
            config.log_file = self.log_file;
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Url { place_id } => run_url(place_id),
        Command::Run(args) => {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .context("Failed to create tokio runtime")?;

            runtime.block_on(run_kiosk(args))
        }
    }
}

/// Prints the redirect URL for the configured place.
fn run_url(place_id: Option<String>) -> Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;
    let place_id = place_id.unwrap_or(config.place_id);
    println!("{}", redirect_url_for(&place_id));
    Ok(())
}

/// Runs the interactive kiosk until the user quits.
async fn run_kiosk(args: RunArgs) -> Result<()> {
    let mut config = Config::from_env().context("Failed to load configuration")?;
    args.apply(&mut config);

    init_logging(config.log_file.as_deref())?;

    info!(
        place_id = %config.place_id,
        brand = %config.brand,
        splash = config.splash_enabled,
        output = ?config.output,
        "Starting review kiosk"
    );

    let mut sink = match &config.output {
        Some(path) => Some(
            JsonLinesSink::open(path, config.place_id.clone())
                .with_context(|| format!("Failed to open review output {}", path.display()))?,
        ),
        None => None,
    };

    let (timer_tx, timer_rx) = mpsc::channel(TIMER_CHANNEL_CAPACITY);
    let widget = ReviewWidget::new(config.widget_config(), timer_tx)
        .with_on_submit(move |review| record_review(sink.as_mut(), review));

    install_panic_hook();
    let mut tui = Tui::new().map_err(TuiError::TerminalInit)?;

    let result = App::new(widget, config.brand.clone())
        .run(&mut tui, timer_rx)
        .await;

    tui.restore().context("Failed to restore terminal")?;
    result?;

    info!("Review kiosk stopped");
    Ok(())
}

/// Submission callback: appends to the sink when configured, logs otherwise.
///
/// Sink failures are logged and never reach the review component.
fn record_review(sink: Option<&mut JsonLinesSink>, review: &ReviewInput) {
    let record = ReviewRecord::from(review);

    match sink {
        Some(sink) => match sink.record(review) {
            Ok(()) => info!(
                path = %sink.path().display(),
                total = sink.written(),
                "Review recorded"
            ),
            Err(e) => warn!(error = %e, "Failed to record review"),
        },
        None => info!(
            quality = record.quality,
            punctuality = record.punctuality,
            service = record.service,
            named = !record.name.trim().is_empty(),
            "Review submitted"
        ),
    }
}

/// Initializes the logging subsystem.
///
/// Logs go to `log_file` only; without one no subscriber is installed so
/// nothing is written over the terminal UI.
fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();

    Ok(())
}
