//! Configuration module for the YugoSM dashboard client
//!
//! Provides layered configuration loading from files, environment variables, and defaults.
//!
//! # Configuration Precedence
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`YUGOSM_*`)
//! 3. Configuration file (TOML)
//! 4. Default values (lowest priority)
//!
//! # Example
//!
//! ```rust
//! use yugosm::config::DashboardConfig;
//!
//! let config = DashboardConfig::default();
//! assert_eq!(config.backend.ws_port, 8000);
//!
//! let toml = r#"
//! [backend]
//! origin = "http://status.lan:3000"
//! "#;
//! let config: DashboardConfig = toml::from_str(toml).unwrap();
//! assert_eq!(config.backend.feed_url().unwrap(), "ws://status.lan:8000/ws");
//! ```

pub mod backend;
pub mod error;
pub mod logging;
pub mod monitor;

pub use backend::BackendConfig;
pub use error::ConfigError;
pub use logging::{LogFormat, LoggingConfig};
pub use monitor::{MonitorTarget, UptimeCheckType};

// Re-export FeedConfig from feed module
pub use crate::feed::FeedConfig;

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Unified configuration for the dashboard client.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DashboardConfig {
    /// Backend endpoints
    pub backend: BackendConfig,
    /// Live feed reconnection settings
    pub feed: FeedConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
    /// What the backend monitors (informational)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monitor: Option<MonitorTarget>,
}

impl DashboardConfig {
    /// Load configuration from a TOML file
    ///
    /// If path is None, returns default configuration.
    /// If path doesn't exist, returns NotFound error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.to_path_buf()));
                }
                let content = std::fs::read_to_string(p).map_err(|source| ConfigError::Read {
                    path: p.to_path_buf(),
                    source,
                })?;
                toml::from_str(&content).map_err(|e| ConfigError::Parse {
                    path: p.to_path_buf(),
                    message: e.message().to_string(),
                })
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supports YUGOSM_* environment variables for common settings.
    /// Invalid values are silently ignored (defaults are kept).
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(origin) = std::env::var("YUGOSM_ORIGIN") {
            self.backend.origin = origin;
        }
        if let Ok(port) = std::env::var("YUGOSM_WS_PORT") {
            if let Ok(p) = port.parse() {
                self.backend.ws_port = p;
            }
        }
        if let Ok(delay) = std::env::var("YUGOSM_RETRY_DELAY_MS") {
            if let Ok(d) = delay.parse() {
                self.feed.retry_delay_ms = d;
            }
        }

        if let Ok(level) = std::env::var("YUGOSM_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("YUGOSM_LOG_FORMAT") {
            if let Ok(f) = format.parse() {
                self.logging.format = f;
            }
        }

        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.backend.origin_url()?;

        if self.backend.ws_port == 0 {
            return Err(ConfigError::invalid("backend.ws_port", "port must be non-zero"));
        }
        if !self.backend.ws_path.starts_with('/') {
            return Err(ConfigError::invalid(
                "backend.ws_path",
                "path must start with '/'",
            ));
        }
        // A zero timeout fails every request before it is sent
        if self.backend.request_timeout_seconds == 0 {
            return Err(ConfigError::invalid(
                "backend.request_timeout_seconds",
                "timeout must be non-zero",
            ));
        }
        if self.feed.retry_delay_ms == 0 {
            return Err(ConfigError::invalid(
                "feed.retry_delay_ms",
                "retry delay must be non-zero",
            ));
        }
        if self.feed.connect_timeout_seconds == 0 {
            return Err(ConfigError::invalid(
                "feed.connect_timeout_seconds",
                "timeout must be non-zero",
            ));
        }

        self.logging.validate()?;

        if let Some(monitor) = &self.monitor {
            monitor.validate()?;
        }

        Ok(())
    }
}
