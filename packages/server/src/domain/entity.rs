//! Entities.

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;

use super::{ConnectionId, PushError};

/// Outbound queue of a single connection.
///
/// The connection's writer task owns the receiving end; pushing never waits.
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// Registry entry for an accepted connection.
///
/// The handle does not own the socket: the transport does. Once the writer
/// task is gone the handle reports itself closed and sends start failing.
#[derive(Debug, Clone)]
pub struct ConnectionHandle {
    id: ConnectionId,
    sender: PusherChannel,
    connected_at: DateTime<Utc>,
}

impl ConnectionHandle {
    pub fn new(id: ConnectionId, sender: PusherChannel, connected_at: DateTime<Utc>) -> Self {
        Self {
            id,
            sender,
            connected_at,
        }
    }

    pub fn id(&self) -> &ConnectionId {
        &self.id
    }

    pub fn connected_at(&self) -> DateTime<Utc> {
        self.connected_at
    }

    /// Whether the transport side is still draining this connection's queue
    pub fn is_open(&self) -> bool {
        !self.sender.is_closed()
    }

    /// Queue a text frame for this connection
    pub fn push(&self, content: &str) -> Result<(), PushError> {
        self.sender
            .send(content.to_string())
            .map_err(|_| PushError::ChannelClosed(self.id))
    }
}
