//! Configuration for the live feed connection.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Reconnection settings for the live feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Fixed delay between a close and the next connection attempt
    pub retry_delay_ms: u64,
    /// Give up on a single connection attempt after this long
    pub connect_timeout_seconds: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            retry_delay_ms: 1000,
            connect_timeout_seconds: 10,
        }
    }
}

impl FeedConfig {
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_seconds)
    }
}
