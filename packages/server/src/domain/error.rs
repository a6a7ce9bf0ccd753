//! Domain errors.

use thiserror::Error;

use super::ConnectionId;

/// Reasons an inbound frame cannot become a chat message
#[derive(Debug, Error)]
pub enum EnvelopeError {
    #[error("frame is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// `type` is `"message"` but a required field is absent or falsy
    #[error("required field '{0}' is missing or empty")]
    MissingField(&'static str),
}

/// Per-connection delivery failure
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PushError {
    #[error("connection '{0}' is closed")]
    ChannelClosed(ConnectionId),
}
