//! `[logging]` section

use super::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;
use tracing_subscriber::filter::LevelFilter;

/// How log lines are rendered on stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Pretty,
    /// One JSON object per line
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("pretty") {
            Ok(LogFormat::Pretty)
        } else if s.eq_ignore_ascii_case("json") {
            Ok(LogFormat::Json)
        } else {
            Err(ConfigError::invalid(
                "logging.format",
                format!("expected 'pretty' or 'json', got '{}'", s),
            ))
        }
    }
}

/// Log filtering for the client. Quiet by default so logs stay out of the
/// rendered dashboard.
///
/// ```toml
/// [logging]
/// level = "warn"
/// format = "json"
///
/// [logging.components]
/// feed = "debug"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Base level for every target
    pub level: String,
    pub format: LogFormat,
    /// Per-module levels, keyed by module name under `yugosm::`
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub components: BTreeMap<String, String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Pretty,
            components: BTreeMap::new(),
        }
    }
}

impl LoggingConfig {
    /// Every level must be one tracing understands.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let check = |level: &str| {
            level.parse::<LevelFilter>().map_err(|_| {
                ConfigError::invalid(
                    "logging.level",
                    format!("unknown level '{}'", level),
                )
            })
        };

        check(&self.level)?;
        for level in self.components.values() {
            check(level)?;
        }
        Ok(())
    }
}
