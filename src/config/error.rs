//! Errors raised while loading or checking `yugosm.toml`.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// An explicitly requested file is missing
    #[error("no config file at {}", .0.display())]
    NotFound(PathBuf),

    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not valid TOML: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    /// A setting parsed but cannot work, e.g. a zero timeout.
    /// `field` is the dotted TOML key.
    #[error("{field}: {message}")]
    Invalid {
        field: &'static str,
        message: String,
    },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field,
            message: message.into(),
        }
    }

    /// Dotted key of the offending setting, if any.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ConfigError::Invalid { field, .. } => Some(*field),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_names_the_key() {
        let err = ConfigError::invalid("feed.retry_delay_ms", "must be non-zero");
        assert_eq!(err.to_string(), "feed.retry_delay_ms: must be non-zero");
        assert_eq!(err.field(), Some("feed.retry_delay_ms"));
    }

    #[test]
    fn test_parse_error_names_the_file() {
        let err = ConfigError::Parse {
            path: PathBuf::from("yugosm.toml"),
            message: "expected `]`".to_string(),
        };
        assert_eq!(err.to_string(), "yugosm.toml is not valid TOML: expected `]`");
        assert!(err.field().is_none());
    }
}
