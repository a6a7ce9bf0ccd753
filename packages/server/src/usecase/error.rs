//! UseCase errors.

use thiserror::Error;

use crate::domain::{EnvelopeError, PushError};

/// Errors while accepting a new connection
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConnectError {
    #[error("welcome message could not be delivered: {0}")]
    WelcomeUndeliverable(#[from] PushError),
}

/// Errors while turning an inbound frame into a broadcast.
///
/// None of these are reported to the client: the frame is dropped.
#[derive(Debug, Error)]
pub enum SendMessageError {
    #[error(transparent)]
    InvalidEnvelope(#[from] EnvelopeError),

    #[error("failed to serialize stamped message: {0}")]
    Serialize(#[source] serde_json::Error),
}
