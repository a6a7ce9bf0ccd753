//! Server execution logic.

use std::sync::Arc;

use axum::{Router, routing::get};
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::usecase::{
    ConnectClientUseCase, DisconnectClientUseCase, GetConnectionCountUseCase, SendMessageUseCase,
};

use super::{
    handler::{http::health_check, websocket::websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// Listener-level failures; the only errors that escape the relay
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// WebSocket chat relay server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(
///     connect_client_usecase,
///     disconnect_client_usecase,
///     send_message_usecase,
///     get_connection_count_usecase,
///     "Welcome to the chat!".to_string(),
/// );
/// server.run("0.0.0.0".to_string(), 8080).await?;
/// ```
pub struct Server {
    connect_client_usecase: Arc<ConnectClientUseCase>,
    disconnect_client_usecase: Arc<DisconnectClientUseCase>,
    send_message_usecase: Arc<SendMessageUseCase>,
    get_connection_count_usecase: Arc<GetConnectionCountUseCase>,
    welcome_message: String,
}

impl Server {
    /// Create a new Server instance
    ///
    /// # Arguments
    ///
    /// * `connect_client_usecase` - UseCase for accepting a connection
    /// * `disconnect_client_usecase` - UseCase for removing a connection
    /// * `send_message_usecase` - UseCase for validating and relaying chat messages
    /// * `get_connection_count_usecase` - UseCase backing the health endpoint
    /// * `welcome_message` - Text of the system message sent on connect
    pub fn new(
        connect_client_usecase: Arc<ConnectClientUseCase>,
        disconnect_client_usecase: Arc<DisconnectClientUseCase>,
        send_message_usecase: Arc<SendMessageUseCase>,
        get_connection_count_usecase: Arc<GetConnectionCountUseCase>,
        welcome_message: String,
    ) -> Self {
        Self {
            connect_client_usecase,
            disconnect_client_usecase,
            send_message_usecase,
            get_connection_count_usecase,
            welcome_message,
        }
    }

    /// Build the router without binding anything
    pub fn router(self) -> Router {
        let app_state = Arc::new(AppState {
            connect_client_usecase: self.connect_client_usecase,
            disconnect_client_usecase: self.disconnect_client_usecase,
            send_message_usecase: self.send_message_usecase,
            get_connection_count_usecase: self.get_connection_count_usecase,
            welcome_message: self.welcome_message,
        });

        Router::new()
            // WebSocket エンドポイント（ホスト直下への接続も受け付ける）
            .route("/", get(websocket_handler))
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state)
    }

    /// Run the relay server until Ctrl+C / SIGTERM
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), ServerError> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: bind_addr.clone(),
                source,
            })?;

        tracing::info!("Connect to: ws://{}", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve(listener, shutdown_signal()).await
    }

    /// Serve on an already bound listener until `shutdown` resolves
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        match listener.local_addr() {
            Ok(addr) => tracing::info!("WebSocket chat relay listening on {}", addr),
            Err(e) => tracing::warn!("Listening on an unknown address: {}", e),
        }

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(ServerError::Serve)?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{infrastructure::registry::InMemoryConnectionRegistry, usecase::BroadcastRelay};
    use chat_relay_shared::time::SystemClock;

    fn create_test_server() -> Server {
        let registry = Arc::new(InMemoryConnectionRegistry::new());
        let relay = Arc::new(BroadcastRelay::new(registry.clone()));
        Server::new(
            Arc::new(ConnectClientUseCase::new(registry.clone())),
            Arc::new(DisconnectClientUseCase::new(registry.clone())),
            Arc::new(SendMessageUseCase::new(Arc::new(SystemClock), relay)),
            Arc::new(GetConnectionCountUseCase::new(registry)),
            "Welcome to the chat!".to_string(),
        )
    }

    #[tokio::test]
    async fn test_run_reports_bind_failure() {
        // テスト項目: 使用中のポートで起動すると Bind エラーが返される
        // given (前提条件):
        let occupied = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = occupied.local_addr().unwrap().port();

        // when (操作):
        let result = create_test_server()
            .run("127.0.0.1".to_string(), port)
            .await;

        // then (期待する結果):
        match result {
            Err(ServerError::Bind { addr, .. }) => {
                assert_eq!(addr, format!("127.0.0.1:{}", port));
            }
            other => panic!("expected a bind error, got {:?}", other),
        }
    }
}
