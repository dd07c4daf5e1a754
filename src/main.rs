//! Channelwatch - Twitch roster status viewer
//!
//! A CLI tool that aggregates stream and channel data for a roster of
//! Twitch channels and renders the live/offline view.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (bad config, cancelled refresh, unwritable output)
//!   2 - Some channels failed to load and --strict was set

use anyhow::{Context, Result};
use channelwatch::cli::{Args, OutputFormat};
use channelwatch::config::{Config, CONFIG_FILE_NAME};
use channelwatch::report::{build_view, generate_json_view, generate_markdown_view};
use channelwatch::{run_batch, HttpFetcher};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    let (mut config, config_origin) = match load_config(&args) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("❌ Error: {:#}", e);
            std::process::exit(1);
        }
    };
    config.merge_with_args(&args);

    if let Err(e) = config.validate() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    init_logging(log_level(&args, &config));

    info!("Channelwatch v{}", env!("CARGO_PKG_VERSION"));
    debug!("Configuration from {}", config_origin);
    debug!("Arguments: {:?}", args);

    match run(&args, config).await {
        Ok(exit_code) => {
            std::process::exit(exit_code);
        }
        Err(e) => {
            error!("Refresh failed: {:#}", e);
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .channelwatch.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(CONFIG_FILE_NAME);

    if path.exists() {
        eprintln!(
            "⚠️  {} already exists. Remove it first or edit it manually.",
            CONFIG_FILE_NAME
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", CONFIG_FILE_NAME))?;

    println!("✅ Created {} with default settings.", CONFIG_FILE_NAME);
    println!("   Edit it to customize the channel roster, proxy URL, and timeout.");
    Ok(())
}

fn log_level(args: &Args, config: &Config) -> tracing::Level {
    if config.general.verbose && !args.quiet {
        tracing::Level::DEBUG
    } else {
        args.log_level()
    }
}

/// Initialize logging. Logs go to stderr so stdout carries only the view.
fn init_logging(level: tracing::Level) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Refresh the roster once and emit the view. Returns exit code (0 or 2).
async fn run(args: &Args, config: Config) -> Result<i32> {
    let start_time = Instant::now();

    if config.roster.channels.is_empty() {
        anyhow::bail!(
            "No channels configured; pass --channels or edit {}",
            CONFIG_FILE_NAME
        );
    }

    let fetcher = HttpFetcher::new(config.api.base_url.clone(), config.api.timeout())
        .context("Failed to create HTTP client")?;

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            trigger.cancel();
        }
    });

    let spinner = progress_spinner(args.quiet, config.roster.channels.len());
    let batch = run_batch(&fetcher, &config.roster.channels, &cancel).await;
    spinner.finish_and_clear();
    let batch = batch.context("Refresh aborted")?;

    let view = build_view(
        &batch,
        config.roster.filter,
        fetcher.base_url(),
        start_time.elapsed().as_secs_f64(),
    );

    let output = match config.general.format {
        OutputFormat::Json => generate_json_view(&view)?,
        OutputFormat::Markdown => generate_markdown_view(&view),
    };

    match config.general.output {
        Some(ref path) => {
            std::fs::write(path, &output)
                .with_context(|| format!("Failed to write view to {}", path))?;
            if !args.quiet {
                eprintln!("✅ Roster saved to: {}", path);
            }
        }
        None => println!("{}", output),
    }

    let summary = &view.summary;
    info!(
        "{} online, {} offline, {} failed in {:.1}s",
        summary.online, summary.offline, summary.failed, view.metadata.duration_seconds
    );

    if args.strict && batch.has_failures() {
        eprintln!(
            "\n⛔ Failed to load: {}. Failing (exit code 2).",
            batch.failed_ids().join(", ")
        );
        return Ok(2);
    }

    Ok(0)
}

fn progress_spinner(quiet: bool, channels: usize) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(format!("Fetching {} channels...", channels));
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Load configuration from file or use defaults.
///
/// Returns the config together with a description of where it came from.
fn load_config(args: &Args) -> Result<(Config, String)> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        let config = Config::load(config_path)?;
        return Ok((config, config_path.display().to_string()));
    }

    // Try default location
    match Config::load_default()? {
        Some(config) => Ok((config, CONFIG_FILE_NAME.to_string())),
        None => Ok((Config::default(), "built-in defaults".to_string())),
    }
}
