//! Tracing setup for the dashboard client
//!
//! Logs always go to stderr so they never interleave with rendered output.

use crate::config::{LogFormat, LoggingConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Build filter directives string from LoggingConfig
///
/// Constructs a tracing filter string that includes the base log level
/// and any component-specific log levels configured in the LoggingConfig.
///
/// # Examples
///
/// ```
/// use yugosm::config::LoggingConfig;
/// use yugosm::logging::build_filter_directives;
///
/// let mut config = LoggingConfig {
///     level: "info".to_string(),
///     ..Default::default()
/// };
/// config.components.insert("feed".to_string(), "debug".to_string());
///
/// assert_eq!(build_filter_directives(&config), "info,yugosm::feed=debug");
/// ```
pub fn build_filter_directives(config: &LoggingConfig) -> String {
    let mut filter_str = config.level.clone();
    for (component, level) in &config.components {
        filter_str.push_str(&format!(",yugosm::{}={}", component, level));
    }
    filter_str
}

/// Initialize tracing based on configuration. `RUST_LOG` wins over the
/// configured level.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    let filter_str = build_filter_directives(config);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    match config.format {
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .try_init()?;
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .try_init()?;
        }
    }

    Ok(())
}
