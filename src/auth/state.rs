//! Authentication state published by the credential gate.

use super::error::AuthError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of the most recent password challenge.
///
/// An empty `password` means no credential is held. It is cleared on every
/// failed challenge.
#[derive(Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AuthState {
    pub is_authenticated: bool,
    pub error: Option<String>,
    #[serde(skip_serializing)]
    #[serde(default)]
    pub password: String,
}

impl AuthState {
    /// State after a 2xx challenge response.
    pub fn authenticated(password: impl Into<String>) -> Self {
        Self {
            is_authenticated: true,
            error: None,
            password: password.into(),
        }
    }

    /// Unauthenticated state carrying a user-facing error message.
    pub fn rejected(error: impl Into<String>) -> Self {
        Self {
            is_authenticated: false,
            error: Some(error.into()),
            password: String::new(),
        }
    }

    /// Whether a credential is currently held.
    pub fn has_password(&self) -> bool {
        !self.password.is_empty()
    }
}

impl From<AuthError> for AuthState {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidPassword { .. } => AuthState::rejected("Invalid password"),
            _ => AuthState::rejected("Authentication failed"),
        }
    }
}

impl fmt::Debug for AuthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthState")
            .field("is_authenticated", &self.is_authenticated)
            .field("error", &self.error)
            .field(
                "password",
                &if self.has_password() { "<redacted>" } else { "" },
            )
            .finish()
    }
}
