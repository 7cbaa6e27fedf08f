//! Credential gate: validates the shared dashboard password.
//!
//! A single `GET` challenge carrying basic-auth credentials (empty username)
//! decides whether the session is authenticated. Only the status code matters.

mod error;
mod state;

pub use error::AuthError;
pub use state::AuthState;

use crate::config::BackendConfig;
use reqwest::Url;
use std::time::Duration;

/// One-shot password challenge against the backend.
#[derive(Debug, Clone)]
pub struct CredentialGate {
    /// HTTP client with connection pooling
    client: reqwest::Client,
    /// Challenge endpoint
    auth_url: Url,
    /// Full log file endpoint
    download_url: Url,
}

impl CredentialGate {
    /// Create a gate for the configured backend.
    pub fn new(config: &BackendConfig) -> Result<Self, AuthError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| AuthError::Client(e.to_string()))?;
        Self::with_client(config, client)
    }

    /// Create a gate with a custom HTTP client (for testing).
    pub fn with_client(config: &BackendConfig, client: reqwest::Client) -> Result<Self, AuthError> {
        let auth_url = config
            .auth_url()
            .map_err(|e| AuthError::InvalidUrl(e.to_string()))?;
        let download_url = config
            .download_url()
            .map_err(|e| AuthError::InvalidUrl(e.to_string()))?;

        Ok(Self {
            client,
            auth_url,
            download_url,
        })
    }

    /// Challenge endpoint this gate talks to.
    pub fn auth_url(&self) -> &Url {
        &self.auth_url
    }

    /// Send one challenge with `password`.
    ///
    /// `Ok` carries the authenticated state; a rejection or a missing response
    /// is an `Err` that folds into the unauthenticated state via
    /// `AuthState::from`.
    pub async fn authenticate(&self, password: &str) -> Result<AuthState, AuthError> {
        let response = self
            .client
            .get(self.auth_url.clone())
            .basic_auth("", Some(password))
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(url = %self.auth_url, error = %e, "Auth challenge got no response");
                AuthError::from_send_error(e)
            })?;

        let status = response.status();
        if status.is_success() {
            tracing::info!(status = status.as_u16(), "Password accepted");
            Ok(AuthState::authenticated(password))
        } else {
            tracing::info!(status = status.as_u16(), "Password rejected");
            Err(AuthError::InvalidPassword {
                status: status.as_u16(),
            })
        }
    }

    /// Like [`authenticate`](Self::authenticate) but always yields the state
    /// to publish.
    pub async fn challenge(&self, password: &str) -> AuthState {
        self.authenticate(password)
            .await
            .unwrap_or_else(AuthState::from)
    }

    /// Fetch the complete backend log file using the same credential.
    pub async fn download_logs(&self, password: &str) -> Result<String, AuthError> {
        let response = self
            .client
            .get(self.download_url.clone())
            .basic_auth("", Some(password))
            .send()
            .await
            .map_err(AuthError::from_send_error)?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Log download rejected");
            return Err(AuthError::InvalidPassword {
                status: status.as_u16(),
            });
        }

        let is_json = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/json"));
        let body = response
            .text()
            .await
            .map_err(|e| AuthError::Transport(e.to_string()))?;

        // The backend returns the file contents as a JSON string
        let content = if is_json {
            serde_json::from_str::<String>(&body)
                .map_err(|e| AuthError::Decode(e.to_string()))?
        } else {
            body
        };
        tracing::debug!(bytes = content.len(), is_json, "Downloaded log file");
        Ok(content)
    }
}
