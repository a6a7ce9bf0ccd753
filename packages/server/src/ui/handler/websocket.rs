//! WebSocket connection handlers.

use std::{sync::Arc, time::Duration};

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use chrono::Utc;
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, StreamExt},
};
use tokio::sync::{mpsc, oneshot};

use crate::{
    domain::{ConnectionHandle, ConnectionId},
    infrastructure::dto::websocket::SystemMessage,
    ui::state::AppState,
    usecase::Delivery,
};

/// Upper bound for flushing the close reply once the reader has stopped
const CLOSE_FLUSH_TIMEOUT: Duration = Duration::from_secs(1);

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that drains the connection's queue into its WebSocket sink.
///
/// The task ends (dropping the receiver, which marks the registry handle as
/// closed) when the queue's senders are gone, a write fails, or `closing`
/// fires. On `closing` the sink is closed, which flushes the close reply
/// queued by the protocol when the client sent a Close frame.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
    mut closing: oneshot::Receiver<()>,
    connection_id: ConnectionId,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            tokio::select! {
                msg = rx.recv() => {
                    let Some(msg) = msg else { break };
                    if let Err(e) = sender.send(Message::Text(msg.into())).await {
                        tracing::debug!("Failed to write to '{}': {}", connection_id, e);
                        break;
                    }
                }
                _ = &mut closing => {
                    if let Err(e) = sender.close().await {
                        tracing::debug!("Failed to close '{}' cleanly: {}", connection_id, e);
                    }
                    break;
                }
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let connection_id = ConnectionId::generate();
    let (sender, mut receiver) = socket.split();

    // Create a channel for this client to receive messages
    let (tx, rx) = mpsc::unbounded_channel();
    let handle = ConnectionHandle::new(connection_id, tx, Utc::now());
    let connected_at = handle.connected_at();

    let welcome_json =
        match serde_json::to_string(&SystemMessage::welcome(state.welcome_message.as_str())) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!("Failed to serialize welcome message: {}", e);
                return;
            }
        };

    if let Err(e) = state
        .connect_client_usecase
        .execute(handle, &welcome_json)
        .await
    {
        tracing::error!("Failed to accept client '{}': {}", connection_id, e);
        return;
    }
    tracing::info!("Client '{}' connected", connection_id);

    let (close_tx, close_rx) = oneshot::channel();
    let mut send_task = pusher_loop(rx, sender, close_rx, connection_id);

    let state_clone = state.clone();

    // Spawn a task to receive messages from this client
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error on '{}': {}", connection_id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    tracing::debug!("Received text from '{}': {}", connection_id, text.as_str());

                    match state_clone
                        .send_message_usecase
                        .execute(&connection_id, text.as_str())
                        .await
                    {
                        Ok(Delivery::Broadcast(_)) => {}
                        Ok(Delivery::Ignored) => {
                            tracing::debug!(
                                "Frame from '{}' is not a chat message, ignoring",
                                connection_id
                            );
                        }
                        Err(e) => {
                            tracing::warn!("Dropping frame from '{}': {}", connection_id, e);
                        }
                    }
                }
                Message::Binary(_) => {
                    tracing::debug!("Ignoring binary frame from '{}'", connection_id);
                }
                Message::Close(frame) => {
                    match frame {
                        Some(frame) => tracing::info!(
                            "Client '{}' requested close (code: {}, reason: {})",
                            connection_id,
                            frame.code,
                            frame.reason.as_str()
                        ),
                        None => tracing::info!("Client '{}' requested close", connection_id),
                    }
                    break;
                }
                // Ping/pong is handled automatically by the WebSocket protocol
                _ => {}
            }
        }
    });

    // If any one of the tasks completes, stop the other
    tokio::select! {
        _ = &mut recv_task => {
            // The writer completes the close handshake before it stops
            let _ = close_tx.send(());
            if tokio::time::timeout(CLOSE_FLUSH_TIMEOUT, &mut send_task)
                .await
                .is_err()
            {
                send_task.abort();
            }
        }
        _ = &mut send_task => recv_task.abort(),
    };

    let connected_for = Utc::now().signed_duration_since(connected_at);

    if state
        .disconnect_client_usecase
        .execute(&connection_id)
        .await
    {
        tracing::info!(
            "Client '{}' disconnected after {}s and removed from registry",
            connection_id,
            connected_for.num_seconds()
        );
    } else {
        tracing::info!(
            "Client '{}' disconnected after {}s (already pruned from registry)",
            connection_id,
            connected_for.num_seconds()
        );
    }
}
