//! Error types for the credential gate.

use thiserror::Error;

/// Errors that can occur while challenging the backend with a password.
///
/// The `Display` text of the two challenge outcomes is the exact message
/// shown to the user next to the password prompt.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    /// Backend answered with a non-2xx status
    #[error("Invalid password")]
    InvalidPassword { status: u16 },

    /// No response at all (refused, DNS, timeout, TLS)
    #[error("Authentication failed")]
    Transport(String),

    /// HTTP client could not be constructed
    #[error("HTTP client error: {0}")]
    Client(String),

    /// Endpoint URL could not be derived from the configured origin
    #[error("invalid endpoint URL: {0}")]
    InvalidUrl(String),

    /// Response body was not in the expected shape
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl AuthError {
    /// Classify a reqwest send error. Every send error means no usable
    /// response was received.
    pub(crate) fn from_send_error(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            AuthError::Transport(format!("request timed out: {}", e))
        } else {
            AuthError::Transport(e.to_string())
        }
    }

    /// True for the outcomes a user can fix by retrying the prompt.
    pub fn is_challenge_failure(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidPassword { .. } | AuthError::Transport(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_password_display() {
        let err = AuthError::InvalidPassword { status: 401 };
        assert_eq!(err.to_string(), "Invalid password");
    }

    #[test]
    fn test_transport_display_hides_detail() {
        let err = AuthError::Transport("connection refused".to_string());
        assert_eq!(err.to_string(), "Authentication failed");
    }

    #[test]
    fn test_client_display() {
        let err = AuthError::Client("no TLS backend".to_string());
        assert_eq!(err.to_string(), "HTTP client error: no TLS backend");
    }

    #[test]
    fn test_challenge_failure_classification() {
        assert!(AuthError::InvalidPassword { status: 403 }.is_challenge_failure());
        assert!(AuthError::Transport("x".into()).is_challenge_failure());
        assert!(!AuthError::Client("x".into()).is_challenge_failure());
        assert!(!AuthError::InvalidUrl("x".into()).is_challenge_failure());
    }
}
