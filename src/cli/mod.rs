//! CLI module for the YugoSM dashboard client
//!
//! # Commands
//!
//! - `watch` - Log in and follow the live status/log feed
//! - `auth` - Check a password against the backend
//! - `download-logs` - Fetch the complete backend log file
//! - `config` - Configuration utilities (init)
//! - `completions` - Generate shell completions
//!
//! # Example
//!
//! ```bash
//! DASHBOARD_PASSWORD=secret yugosm watch --origin http://status.lan:8000
//! yugosm completions zsh > ~/.zfunc/_yugosm
//! ```

pub mod auth;
pub mod completions;
pub mod config;
pub mod output;
pub mod watch;

pub use completions::handle_completions;
pub use config::handle_config_init;

use crate::config::DashboardConfig;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// YugoSM - service uptime dashboard
#[derive(Parser, Debug)]
#[command(
    name = "yugosm",
    version,
    about = "Password-gated live uptime and log dashboard"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in and follow the live feed
    Watch(WatchArgs),
    /// Check a password against the backend
    Auth(AuthArgs),
    /// Download the complete backend log file
    DownloadLogs(DownloadLogsArgs),
    /// Configuration utilities
    #[command(subcommand)]
    Config(ConfigCommands),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Options shared by every command that talks to the backend.
#[derive(Args, Debug, Clone)]
pub struct ConnectArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "yugosm.toml")]
    pub config: PathBuf,

    /// Override the backend origin (e.g. http://status.lan:8000)
    #[arg(long, env = "YUGOSM_ORIGIN")]
    pub origin: Option<String>,

    /// Dashboard password
    #[arg(short, long, env = "DASHBOARD_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "YUGOSM_LOG_LEVEL")]
    pub log_level: Option<String>,
}

impl ConnectArgs {
    /// Load configuration with CLI overrides
    pub fn load_config(&self) -> Result<DashboardConfig, Box<dyn std::error::Error>> {
        // Load from file if it exists, otherwise use defaults
        let mut config = if self.config.exists() {
            DashboardConfig::load(Some(&self.config))?
        } else {
            DashboardConfig::default()
        };

        config = config.with_env_overrides();

        if let Some(ref origin) = self.origin {
            config.backend.origin = origin.clone();
        }
        if let Some(ref log_level) = self.log_level {
            config.logging.level = log_level.clone();
        }

        config.validate()?;
        Ok(config)
    }
}

#[derive(Args, Debug)]
pub struct WatchArgs {
    #[command(flatten)]
    pub connect: ConnectArgs,

    /// Number of log lines to show
    #[arg(short = 'n', long, default_value = "20")]
    pub tail: usize,

    /// Print one JSON object per update instead of redrawing
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct AuthArgs {
    #[command(flatten)]
    pub connect: ConnectArgs,
}

#[derive(Args, Debug)]
pub struct DownloadLogsArgs {
    #[command(flatten)]
    pub connect: ConnectArgs,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Initialize a new configuration file
    Init(ConfigInitArgs),
}

#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Output file path
    #[arg(short, long, default_value = "yugosm.toml")]
    pub output: PathBuf,

    /// Overwrite existing file
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
