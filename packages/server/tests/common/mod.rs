//! Helpers for driving a real relay server over WebSockets.

#![allow(dead_code)]

use std::{net::SocketAddr, sync::Arc, time::Duration};

use chat_relay_server::{
    infrastructure::{dto::http::HealthDto, registry::InMemoryConnectionRegistry},
    ui::Server,
    usecase::{
        BroadcastRelay, ConnectClientUseCase, DisconnectClientUseCase, GetConnectionCountUseCase,
        SendMessageUseCase,
    },
};
use chat_relay_shared::time::SystemClock;
use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

pub const WELCOME: &str = "Welcome to the chat!";
const RECV_TIMEOUT: Duration = Duration::from_secs(2);

pub type Client = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Start a relay on an ephemeral port and return its address
pub async fn start_server() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Listener has no address");

    let registry = Arc::new(InMemoryConnectionRegistry::new());
    let relay = Arc::new(BroadcastRelay::new(registry.clone()));
    let server = Server::new(
        Arc::new(ConnectClientUseCase::new(registry.clone())),
        Arc::new(DisconnectClientUseCase::new(registry.clone())),
        Arc::new(SendMessageUseCase::new(Arc::new(SystemClock), relay)),
        Arc::new(GetConnectionCountUseCase::new(registry)),
        WELCOME.to_string(),
    );

    tokio::spawn(server.serve(listener, std::future::pending()));

    addr
}

/// Open a WebSocket connection without consuming the welcome message
pub async fn connect_raw(addr: SocketAddr, path: &str) -> Client {
    let url = format!("ws://{}{}", addr, path);
    let (client, _response) = connect_async(url)
        .await
        .expect("Failed to connect to relay");
    client
}

/// Open a WebSocket connection and consume the welcome message
pub async fn connect(addr: SocketAddr) -> Client {
    let mut client = connect_raw(addr, "/ws").await;
    let welcome = next_text(&mut client).await;
    assert_eq!(
        serde_json::from_str::<serde_json::Value>(&welcome).unwrap(),
        serde_json::json!({"type": "system", "message": WELCOME})
    );
    client
}

pub async fn send_text(client: &mut Client, text: &str) {
    client
        .send(Message::text(text.to_string()))
        .await
        .expect("Failed to send frame");
}

/// Next text frame, failing the test after a timeout
pub async fn next_text(client: &mut Client) -> String {
    tokio::time::timeout(RECV_TIMEOUT, async {
        loop {
            match client.next().await {
                Some(Ok(Message::Text(text))) => return text.as_str().to_string(),
                Some(Ok(Message::Ping(_) | Message::Pong(_))) => continue,
                other => panic!("Expected a text frame, got {:?}", other),
            }
        }
    })
    .await
    .expect("Timed out waiting for a text frame")
}

/// Assert that no text frame arrives within `window`
pub async fn expect_silence(client: &mut Client, window: Duration) {
    if let Ok(frame) = tokio::time::timeout(window, client.next()).await {
        panic!("Expected no frame, got {:?}", frame);
    }
}

pub async fn health(addr: SocketAddr) -> HealthDto {
    reqwest::get(format!("http://{}/api/health", addr))
        .await
        .expect("Health request failed")
        .json::<HealthDto>()
        .await
        .expect("Health response is not valid JSON")
}

/// Poll the health endpoint until the registry reaches `expected` connections
pub async fn wait_for_connections(addr: SocketAddr, expected: usize) {
    let waited = tokio::time::timeout(RECV_TIMEOUT, async {
        loop {
            if health(addr).await.connections == expected {
                return;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    })
    .await;
    assert!(
        waited.is_ok(),
        "Registry never reached {} connection(s)",
        expected
    );
}
