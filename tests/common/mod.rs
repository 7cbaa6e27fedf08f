//! Shared test utilities for the dashboard client integration tests.
//!
//! Provides a scriptable in-process feed server (axum WebSocket endpoint),
//! status/log builders, and polling helpers.

#![allow(dead_code)]

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use yugosm::feed::{CheckType, FeedConfig, LogEntry, ServiceStatus};

// =============================================================================
// Builders
// =============================================================================

/// Status payload used by the end-to-end scenario.
pub fn reference_status() -> ServiceStatus {
    ServiceStatus {
        status: true,
        uptime_24h: 99.9,
        uptime_7d: 99.5,
        uptime_30d: 99.1,
        last_updated: "2024-01-01T00:00:00Z".to_string(),
        check_type: CheckType::Endpoint,
        health_check_url: None,
        last_error: None,
    }
}

pub const REFERENCE_STATUS_FRAME: &str = r#"{"status":{"status":true,"uptime_24h":99.9,"uptime_7d":99.5,"uptime_30d":99.1,"last_updated":"2024-01-01T00:00:00Z","check_type":"endpoint"}}"#;

pub fn make_log(message: &str) -> LogEntry {
    LogEntry {
        timestamp: Some("2024-01-01T00:00:00Z".to_string()),
        message: message.to_string(),
    }
}

/// Short retry delay so reconnect tests stay fast.
pub fn fast_feed_config() -> FeedConfig {
    FeedConfig {
        retry_delay_ms: 50,
        connect_timeout_seconds: 2,
    }
}

/// A local port nothing is listening on.
pub async fn unused_port() -> u16 {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

/// Poll `condition` every 10ms until it holds or `timeout` elapses.
pub async fn wait_until<F: Fn() -> bool>(timeout: Duration, condition: F) -> bool {
    let deadline = tokio::time::Instant::now() + timeout;
    loop {
        if condition() {
            return true;
        }
        if tokio::time::Instant::now() >= deadline {
            return false;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

// =============================================================================
// Feed server
// =============================================================================

/// What the server pushes to every open connection.
#[derive(Debug, Clone)]
pub enum ServerMsg {
    Text(String),
    Binary(Vec<u8>),
    Close,
}

/// How the server treats new connections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behavior {
    /// Keep connections open and forward pushed messages
    Hold,
    /// Send a close frame right after the handshake
    CloseImmediately,
}

struct ServerState {
    behavior: Behavior,
    tx: broadcast::Sender<ServerMsg>,
    connections: AtomicUsize,
    active: AtomicUsize,
    client_closes: AtomicUsize,
}

/// In-process WebSocket feed endpoint at `/ws`.
pub struct FeedServer {
    pub addr: SocketAddr,
    state: Arc<ServerState>,
}

impl FeedServer {
    pub async fn start(behavior: Behavior) -> Self {
        let (tx, _) = broadcast::channel(64);
        let state = Arc::new(ServerState {
            behavior,
            tx,
            connections: AtomicUsize::new(0),
            active: AtomicUsize::new(0),
            client_closes: AtomicUsize::new(0),
        });

        let app = Router::new()
            .route("/ws", get(websocket_handler))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, state }
    }

    pub fn url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// Total connections accepted so far.
    pub fn connections(&self) -> usize {
        self.state.connections.load(Ordering::SeqCst)
    }

    /// Connections currently open.
    pub fn active(&self) -> usize {
        self.state.active.load(Ordering::SeqCst)
    }

    /// Connections the client closed (close frame or EOF).
    pub fn client_closes(&self) -> usize {
        self.state.client_closes.load(Ordering::SeqCst)
    }

    /// Push a message to every open connection.
    pub fn push(&self, msg: ServerMsg) {
        let _ = self.state.tx.send(msg);
    }

    pub fn push_text(&self, text: &str) {
        self.push(ServerMsg::Text(text.to_string()));
    }
}

async fn websocket_handler(ws: WebSocketUpgrade, State(state): State<Arc<ServerState>>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

enum Event {
    Push(Result<ServerMsg, broadcast::error::RecvError>),
    Client(Option<Result<Message, axum::Error>>),
}

async fn handle_socket(mut socket: WebSocket, state: Arc<ServerState>) {
    // Subscribe before counting so a test that waits on the counter never
    // pushes into a connection that cannot see it yet.
    let mut rx = state.tx.subscribe();
    state.active.fetch_add(1, Ordering::SeqCst);
    state.connections.fetch_add(1, Ordering::SeqCst);

    if state.behavior == Behavior::CloseImmediately {
        let _ = socket.send(Message::Close(None)).await;
        state.active.fetch_sub(1, Ordering::SeqCst);
        return;
    }

    loop {
        let event = tokio::select! {
            msg = rx.recv() => Event::Push(msg),
            msg = socket.recv() => Event::Client(msg),
        };

        match event {
            Event::Push(Ok(ServerMsg::Text(text))) => {
                if socket.send(Message::Text(text)).await.is_err() {
                    break;
                }
            }
            Event::Push(Ok(ServerMsg::Binary(data))) => {
                if socket.send(Message::Binary(data)).await.is_err() {
                    break;
                }
            }
            Event::Push(Ok(ServerMsg::Close)) => {
                let _ = socket.send(Message::Close(None)).await;
                break;
            }
            Event::Push(Err(_)) => break,
            Event::Client(Some(Ok(Message::Close(_)))) | Event::Client(None) => {
                state.client_closes.fetch_add(1, Ordering::SeqCst);
                break;
            }
            Event::Client(Some(Err(_))) => {
                state.client_closes.fetch_add(1, Ordering::SeqCst);
                break;
            }
            Event::Client(Some(Ok(_))) => {}
        }
    }

    state.active.fetch_sub(1, Ordering::SeqCst);
}
