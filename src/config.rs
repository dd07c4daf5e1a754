//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.channelwatch.toml` files.

use crate::cli::{Args, OutputFormat};
use crate::models::FilterMode;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default config file name, looked up in the current directory.
pub const CONFIG_FILE_NAME: &str = ".channelwatch.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Upstream API settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Channels to track.
    #[serde(default)]
    pub roster: RosterConfig,
}

/// General application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Output file path; the view goes to stdout when unset.
    #[serde(default)]
    pub output: Option<String>,

    /// Output format.
    #[serde(default)]
    pub format: OutputFormat,

    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

/// Upstream API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the Twitch proxy.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

fn default_base_url() -> String {
    "https://twitch-proxy.freecodecamp.rocks/twitch-api".to_string()
}

fn default_timeout() -> u64 {
    10
}

/// Roster settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterConfig {
    /// Channel identifiers, in display order.
    #[serde(default = "default_channels")]
    pub channels: Vec<String>,

    /// Filter applied when none is given on the command line.
    #[serde(default)]
    pub filter: FilterMode,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            channels: default_channels(),
            filter: FilterMode::default(),
        }
    }
}

fn default_channels() -> Vec<String> {
    vec![
        "ESL_SC2",
        "OgamingSC2",
        "cretetion",
        "freecodecamp",
        "storbeck",
        "habathcx",
        "RobotCaleb",
        "noobs2ninjas",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from a directory.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let config_path = dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            Ok(Some(Self::load(&config_path)?))
        } else {
            Ok(None)
        }
    }

    /// Try to load configuration from the current directory.
    pub fn load_default() -> Result<Option<Self>> {
        Self::load_from_dir(Path::new("."))
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings, but only
    /// when they were given explicitly.
    pub fn merge_with_args(&mut self, args: &Args) {
        if let Some(ref base_url) = args.base_url {
            self.api.base_url = base_url.clone();
        }
        if let Some(timeout) = args.timeout {
            self.api.timeout_seconds = timeout;
        }

        if let Some(ref channels) = args.channels {
            self.roster.channels = channels.iter().map(|c| c.trim().to_string()).collect();
        }
        if let Some(filter) = args.filter {
            self.roster.filter = filter;
        }

        if let Some(ref output) = args.output {
            self.general.output = Some(output.display().to_string());
        }
        if let Some(format) = args.format {
            self.general.format = format;
        }

        // Flags always override
        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Check the merged configuration.
    ///
    /// File values bypass CLI validation, so the same rules apply here.
    pub fn validate(&self) -> Result<()> {
        let base_url = &self.api.base_url;
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            bail!("Base URL must start with 'http://' or 'https://': {}", base_url);
        }

        if self.api.timeout_seconds == 0 {
            bail!("Timeout must be at least 1 second");
        }

        if let Some(bad) = self
            .roster
            .channels
            .iter()
            .find(|c| c.is_empty() || c.trim() != c.as_str())
        {
            bail!("Invalid channel name {:?}: empty or surrounded by whitespace", bad);
        }

        Ok(())
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
