//! UseCase 層
//!
//! ドメイン層のインターフェースを組み合わせて、接続・切断・メッセージ中継の
//! 各処理を提供します。

pub mod broadcast;
pub mod connect_client;
pub mod disconnect_client;
pub mod error;
pub mod get_connection_count;
pub mod send_message;

pub use broadcast::{BroadcastOutcome, BroadcastRelay};
pub use connect_client::ConnectClientUseCase;
pub use disconnect_client::DisconnectClientUseCase;
pub use error::{ConnectError, SendMessageError};
pub use get_connection_count::GetConnectionCountUseCase;
pub use send_message::{Delivery, SendMessageUseCase};
