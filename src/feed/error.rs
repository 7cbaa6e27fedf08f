//! Error types for the live feed.

use thiserror::Error;

/// Reasons an inbound frame is dropped.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FrameError {
    /// Payload is not valid JSON or does not match the frame shape
    #[error("invalid frame: {0}")]
    Invalid(String),

    /// Binary payloads are not part of the protocol
    #[error("unexpected binary frame ({0} bytes)")]
    Binary(usize),
}
