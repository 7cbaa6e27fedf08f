//! Live feed client: the persistent connection to the backend.
//!
//! Once started, the client owns exactly one WebSocket at a time. Every text
//! frame is parsed and applied to the published [`FeedState`] by snapshot
//! replacement. Whenever the connection closes, for any reason, the client
//! waits a fixed delay and connects again, forever, until it is closed.

mod config;
mod error;
mod parser;
mod state;
mod types;


pub use config::FeedConfig;
pub use error::FrameError;
pub use parser::parse_frame;
pub use state::{ConnectionState, FeedState};
pub use types::{CheckType, Frame, LogEntry, ServiceStatus};

use futures::StreamExt;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tokio_util::sync::CancellationToken;

type FeedStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Upper bound on sending our close frame during teardown.
const CLOSE_TIMEOUT: Duration = Duration::from_secs(1);

/// Handle to a running feed loop.
///
/// Dropping the handle cancels the loop; [`shutdown`](Self::shutdown) also
/// waits for the socket to be released.
pub struct FeedClient {
    url: String,
    cancel: CancellationToken,
    handle: Option<JoinHandle<()>>,
    state_rx: watch::Receiver<FeedState>,
    connection_rx: watch::Receiver<ConnectionState>,
}

impl FeedClient {
    /// Spawn the feed loop against `url` (e.g. `ws://host:8000/ws`).
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(url: impl Into<String>, config: FeedConfig) -> Self {
        let url = url.into();
        let cancel = CancellationToken::new();
        let (state_tx, state_rx) = watch::channel(FeedState::default());
        let (connection_tx, connection_rx) = watch::channel(ConnectionState::Disconnected);

        let task = FeedTask {
            url: url.clone(),
            config,
            cancel: cancel.clone(),
            state_tx,
            connection_tx,
        };
        let handle = tokio::spawn(task.run());

        Self {
            url,
            cancel,
            handle: Some(handle),
            state_rx,
            connection_rx,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Receiver that observes every published [`FeedState`].
    pub fn subscribe(&self) -> watch::Receiver<FeedState> {
        self.state_rx.clone()
    }

    /// Current feed state.
    pub fn state(&self) -> FeedState {
        self.state_rx.borrow().clone()
    }

    /// Receiver that observes connection lifecycle transitions.
    pub fn subscribe_connection(&self) -> watch::Receiver<ConnectionState> {
        self.connection_rx.clone()
    }

    pub fn connection_state(&self) -> ConnectionState {
        *self.connection_rx.borrow()
    }

    /// Stop the loop. Closing an already closed client is a no-op.
    pub fn close(&self) {
        self.cancel.cancel();
    }

    pub fn is_closed(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Stop the loop and wait until the socket has been released.
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                tracing::warn!(error = %e, "Live feed task ended abnormally");
            }
        }
    }
}

impl Drop for FeedClient {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Why a connected socket stopped delivering frames.
enum CloseReason {
    /// Client was closed; do not reconnect
    Cancelled,
    /// Remote close, error, or end of stream
    Closed(String),
}

/// The spawned side of a [`FeedClient`]. Owns the socket.
struct FeedTask {
    url: String,
    config: FeedConfig,
    cancel: CancellationToken,
    state_tx: watch::Sender<FeedState>,
    connection_tx: watch::Sender<ConnectionState>,
}

impl FeedTask {
    async fn run(self) {
        tracing::info!(
            url = %self.url,
            retry_delay_ms = self.config.retry_delay_ms,
            "Live feed started"
        );

        let mut attempt: u64 = 0;
        loop {
            attempt += 1;
            self.connection_tx
                .send_replace(ConnectionState::Connecting { attempt });

            let connect = tokio::time::timeout(
                self.config.connect_timeout(),
                tokio_tungstenite::connect_async(self.url.as_str()),
            );
            let connected = tokio::select! {
                _ = self.cancel.cancelled() => break,
                result = connect => result,
            };

            match connected {
                Ok(Ok((stream, _response))) => {
                    self.connection_tx
                        .send_replace(ConnectionState::Connected { attempt });
                    tracing::info!(attempt, "Live feed connected");

                    match self.pump(stream).await {
                        CloseReason::Cancelled => break,
                        CloseReason::Closed(reason) => {
                            tracing::info!(attempt, reason = %reason, "Live feed connection closed");
                        }
                    }
                }
                Ok(Err(e)) => {
                    tracing::warn!(attempt, error = %e, "Live feed connection failed");
                }
                Err(_) => {
                    tracing::warn!(
                        attempt,
                        timeout_seconds = self.config.connect_timeout_seconds,
                        "Live feed connection timed out"
                    );
                }
            }

            self.connection_tx
                .send_replace(ConnectionState::RetryWait { attempt });
            tracing::debug!(
                attempt,
                retry_delay_ms = self.config.retry_delay_ms,
                "Scheduling live feed reconnect"
            );

            tokio::select! {
                _ = self.cancel.cancelled() => break,
                _ = tokio::time::sleep(self.config.retry_delay()) => {}
            }
        }

        self.connection_tx.send_replace(ConnectionState::Disconnected);
        tracing::info!(url = %self.url, "Live feed stopped");
    }

    /// Read frames until the socket closes or the client is cancelled.
    async fn pump(&self, mut stream: FeedStream) -> CloseReason {
        loop {
            let next = tokio::select! {
                _ = self.cancel.cancelled() => None,
                msg = stream.next() => Some(msg),
            };

            let Some(next) = next else {
                match tokio::time::timeout(CLOSE_TIMEOUT, stream.close(None)).await {
                    Ok(Err(e)) => tracing::debug!(error = %e, "Error closing live feed socket"),
                    Err(_) => tracing::debug!("Timed out closing live feed socket"),
                    Ok(Ok(())) => {}
                }
                return CloseReason::Cancelled;
            };

            match next {
                None => return CloseReason::Closed("stream ended".to_string()),
                Some(Err(e)) => return CloseReason::Closed(e.to_string()),
                Some(Ok(Message::Text(text))) => self.handle_text(&text),
                Some(Ok(Message::Binary(data))) => {
                    let error = FrameError::Binary(data.len());
                    tracing::debug!(error = %error, "Dropping feed frame");
                }
                Some(Ok(Message::Close(frame))) => {
                    let reason = frame
                        .map(|f| format!("{} {}", u16::from(f.code), f.reason))
                        .unwrap_or_else(|| "no close frame".to_string());
                    return CloseReason::Closed(reason);
                }
                // Ping/pong are answered by tungstenite
                Some(Ok(_)) => {}
            }
        }
    }

    /// Parse one text frame and publish it. Malformed frames are dropped and
    /// the connection stays up.
    fn handle_text(&self, text: &str) {
        match parse_frame(text) {
            Ok(frame) if frame.is_empty() => {
                tracing::debug!("Feed frame carried neither status nor logs");
            }
            Ok(frame) => {
                let has_status = frame.status.is_some();
                let log_count = frame.logs.as_ref().map(Vec::len);
                self.state_tx.send_if_modified(|state| state.apply_frame(frame));
                tracing::trace!(has_status, ?log_count, "Applied feed frame");
            }
            Err(e) => {
                tracing::warn!(error = %e, bytes = text.len(), "Dropping malformed feed frame");
            }
        }
    }
}
