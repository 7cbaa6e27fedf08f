//! Session: ties the credential gate to the live feed.
//!
//! A successful login starts exactly one [`FeedClient`]. Anything that
//! revokes authentication (logout, a failed re-login, dropping the session)
//! tears the feed down without scheduling another reconnect.

use crate::auth::{AuthError, AuthState, CredentialGate};
use crate::config::{ConfigError, DashboardConfig};
use crate::feed::{FeedClient, FeedConfig};
use thiserror::Error;
use tokio::sync::watch;

/// Errors building a session from configuration.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Auth(#[from] AuthError),
}

/// Authentication state plus the feed it unlocks.
pub struct Session {
    gate: CredentialGate,
    feed_url: String,
    feed_config: FeedConfig,
    auth_tx: watch::Sender<AuthState>,
    feed: Option<FeedClient>,
}

impl Session {
    /// Build an unauthenticated session for the configured backend.
    pub fn new(config: &DashboardConfig) -> Result<Self, SessionError> {
        let gate = CredentialGate::new(&config.backend)?;
        Ok(Self::with_gate(gate, config.backend.feed_url()?, config.feed.clone()))
    }

    /// Build a session around an existing gate (for testing).
    pub fn with_gate(gate: CredentialGate, feed_url: String, feed_config: FeedConfig) -> Self {
        let (auth_tx, _) = watch::channel(AuthState::default());
        Self {
            gate,
            feed_url,
            feed_config,
            auth_tx,
            feed: None,
        }
    }

    pub fn gate(&self) -> &CredentialGate {
        &self.gate
    }

    pub fn feed_url(&self) -> &str {
        &self.feed_url
    }

    /// Current authentication state.
    pub fn auth_state(&self) -> AuthState {
        self.auth_tx.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth_tx.borrow().is_authenticated
    }

    /// Receiver that observes every published [`AuthState`].
    pub fn subscribe_auth(&self) -> watch::Receiver<AuthState> {
        self.auth_tx.subscribe()
    }

    /// The running feed, present only while authenticated.
    pub fn feed(&self) -> Option<&FeedClient> {
        self.feed.as_ref()
    }

    /// Challenge the backend with `password` and publish the outcome.
    ///
    /// On success any previous feed is replaced by a fresh one, so at most
    /// one connection is live. On failure any running feed is stopped.
    pub async fn login(&mut self, password: &str) -> AuthState {
        let state = self.gate.challenge(password).await;

        self.stop_feed().await;
        if state.is_authenticated {
            tracing::info!(url = %self.feed_url, "Authenticated, starting live feed");
            self.feed = Some(FeedClient::start(
                self.feed_url.clone(),
                self.feed_config.clone(),
            ));
        }

        self.auth_tx.send_replace(state.clone());
        state
    }

    /// Revoke authentication and close the feed.
    pub async fn logout(&mut self) {
        self.stop_feed().await;
        self.auth_tx.send_replace(AuthState::default());
        tracing::info!("Session logged out");
    }

    async fn stop_feed(&mut self) {
        if let Some(feed) = self.feed.take() {
            tracing::debug!(url = %feed.url(), "Stopping live feed");
            feed.shutdown().await;
        }
    }
}
