//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use crate::models::FilterMode;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Channelwatch - live/offline status for a roster of Twitch channels
///
/// Fetches stream and channel data for every tracked channel at once,
/// merges them, and prints the roster as Markdown or JSON.
///
/// Examples:
///   channelwatch
///   channelwatch --filter online
///   channelwatch --channels ESL_SC2,freecodecamp --format json
///   channelwatch --output roster.md --strict
///   channelwatch --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Channels to track (comma-separated)
    ///
    /// Overrides the roster from the config file.
    /// Example: --channels ESL_SC2,freecodecamp
    #[arg(long, value_name = "NAMES", value_delimiter = ',')]
    pub channels: Option<Vec<String>>,

    /// Which channels to show (all, online, offline)
    #[arg(short, long, value_name = "MODE")]
    pub filter: Option<FilterMode>,

    /// Base URL of the Twitch API proxy
    #[arg(long, value_name = "URL", env = "CHANNELWATCH_BASE_URL")]
    pub base_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .channelwatch.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output file path for the view
    ///
    /// If not specified, the view is printed to stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (markdown, json)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Exit with code 2 if any channel fails to load
    #[arg(long)]
    pub strict: bool,

    /// Generate a default .channelwatch.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the view.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Markdown format (default)
    #[default]
    Markdown,
    /// JSON format
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        if let Some(ref base_url) = self.base_url {
            if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
                return Err("Base URL must start with 'http://' or 'https://'".to_string());
            }
        }

        if let Some(timeout) = self.timeout {
            if timeout == 0 {
                return Err("Timeout must be at least 1 second".to_string());
            }
        }

        if let Some(ref channels) = self.channels {
            if channels.iter().any(|c| c.trim().is_empty()) {
                return Err("Channel names must not be empty".to_string());
            }
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
