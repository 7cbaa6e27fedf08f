//! Published feed state and connection lifecycle states.

use super::types::{Frame, LogEntry, ServiceStatus};

/// Lifecycle of the single persistent connection.
///
/// `attempt` counts connection attempts since the client was started,
/// starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    /// No socket exists
    #[default]
    Disconnected,
    /// Opening a new connection
    Connecting { attempt: u64 },
    /// Socket open, frames flowing
    Connected { attempt: u64 },
    /// Connection closed; waiting out the fixed retry delay
    RetryWait { attempt: u64 },
}

impl ConnectionState {
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionState::Connected { .. })
    }

    /// Attempt number, `None` when disconnected.
    pub fn attempt(&self) -> Option<u64> {
        match self {
            ConnectionState::Disconnected => None,
            ConnectionState::Connecting { attempt }
            | ConnectionState::Connected { attempt }
            | ConnectionState::RetryWait { attempt } => Some(*attempt),
        }
    }
}

/// Latest status snapshot and log tail received from the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedState {
    pub status: Option<ServiceStatus>,
    pub logs: Vec<LogEntry>,
    /// True until the first status arrives
    pub is_loading: bool,
}

impl Default for FeedState {
    fn default() -> Self {
        Self {
            status: None,
            logs: Vec::new(),
            is_loading: true,
        }
    }
}

impl FeedState {
    /// Apply one frame by snapshot replacement. Absent fields leave the
    /// corresponding state untouched.
    ///
    /// Returns true if anything was replaced.
    pub fn apply_frame(&mut self, frame: Frame) -> bool {
        let mut changed = false;

        if let Some(status) = frame.status {
            self.status = Some(status);
            self.is_loading = false;
            changed = true;
        }
        if let Some(logs) = frame.logs {
            self.logs = logs;
            changed = true;
        }

        changed
    }
}
