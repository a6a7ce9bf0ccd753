//! UseCase: ブロードキャスト（fan-out）
//!
//! レジストリの全メンバーにメッセージをそのまま送信します。送信者自身も対象に
//! 含まれます（エコー抑制なし）。閉じている、または送信に失敗したメンバーは
//! その場でレジストリから取り除かれ、残りのメンバーへの送信は継続されます。

use std::sync::Arc;

use crate::domain::{ConnectionHandle, ConnectionId, ConnectionRegistry, Visit};

/// Result of a single fan-out
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BroadcastOutcome {
    /// Members the message was queued for
    pub delivered: usize,
    /// Members found closed and removed from the registry
    pub pruned: usize,
}

/// Broadcast Relay
pub struct BroadcastRelay {
    registry: Arc<dyn ConnectionRegistry>,
}

impl BroadcastRelay {
    pub fn new(registry: Arc<dyn ConnectionRegistry>) -> Self {
        Self { registry }
    }

    /// Send `message` verbatim to every registry member.
    ///
    /// Never fails as a whole; per-member failures only prune that member.
    pub async fn broadcast(&self, message: &str, origin: &ConnectionId) -> BroadcastOutcome {
        let mut outcome = BroadcastOutcome::default();

        let mut deliver = |handle: &ConnectionHandle| {
            if !handle.is_open() {
                tracing::info!(
                    "Connection '{}' is closed, removing it from the registry",
                    handle.id()
                );
                outcome.pruned += 1;
                return Visit::Remove;
            }

            match handle.push(message) {
                Ok(()) => {
                    outcome.delivered += 1;
                    Visit::Keep
                }
                Err(e) => {
                    tracing::warn!("Failed to push message, removing: {}", e);
                    outcome.pruned += 1;
                    Visit::Remove
                }
            }
        };
        self.registry.for_each(&mut deliver).await;

        tracing::info!(
            "Broadcasted message from '{}' to {} client(s), pruned {}",
            origin,
            outcome.delivered,
            outcome.pruned
        );

        outcome
    }
}
