//! WebSocket chat relay server.
//!
//! Stamps every valid chat message with the server's UTC time and broadcasts
//! it to all connected clients, the sender included.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin chat-relay-server
//! cargo run --bin chat-relay-server -- --host 127.0.0.1 --port 3000
//! ```

use std::sync::Arc;

use chat_relay_server::{
    config::{DEFAULT_HOST, DEFAULT_LOG_LEVEL, DEFAULT_PORT, DEFAULT_WELCOME_MESSAGE, ServerConfig},
    infrastructure::registry::InMemoryConnectionRegistry,
    ui::Server,
    usecase::{
        BroadcastRelay, ConnectClientUseCase, DisconnectClientUseCase, GetConnectionCountUseCase,
        SendMessageUseCase,
    },
};
use chat_relay_shared::{logger::setup_logger, time::SystemClock};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "chat-relay-server")]
#[command(about = "WebSocket chat relay with server-side timestamps", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = DEFAULT_HOST)]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Text of the system message sent to every new client
    #[arg(short = 'w', long = "welcome", default_value = DEFAULT_WELCOME_MESSAGE)]
    welcome_message: String,

    /// Default log level (overridden by RUST_LOG)
    #[arg(short = 'l', long, default_value = DEFAULT_LOG_LEVEL)]
    log_level: String,
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
            welcome_message: args.welcome_message,
            log_level: args.log_level,
        }
    }
}

#[tokio::main]
async fn main() {
    let config = ServerConfig::from(Args::parse());

    // Initialize tracing
    setup_logger(
        &[env!("CARGO_CRATE_NAME"), "chat_relay_shared", "tower_http"],
        &config.log_level,
    );

    // Initialize dependencies in order:
    // 1. Registry
    // 2. BroadcastRelay
    // 3. UseCases
    // 4. Server

    // 1. Create Registry (process memory only, empty on every start)
    let registry = Arc::new(InMemoryConnectionRegistry::new());

    // 2. Create BroadcastRelay
    let relay = Arc::new(BroadcastRelay::new(registry.clone()));

    // 3. Create UseCases
    let connect_client_usecase = Arc::new(ConnectClientUseCase::new(registry.clone()));
    let disconnect_client_usecase = Arc::new(DisconnectClientUseCase::new(registry.clone()));
    let send_message_usecase = Arc::new(SendMessageUseCase::new(Arc::new(SystemClock), relay));
    let get_connection_count_usecase = Arc::new(GetConnectionCountUseCase::new(registry));

    // 4. Create and run the server
    let server = Server::new(
        connect_client_usecase,
        disconnect_client_usecase,
        send_message_usecase,
        get_connection_count_usecase,
        config.welcome_message.clone(),
    );
    tracing::info!("Starting chat relay on {}", config.bind_addr());
    if let Err(e) = server.run(config.host, config.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
