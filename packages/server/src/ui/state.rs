//! Server state.

use std::sync::Arc;

use crate::usecase::{
    ConnectClientUseCase, DisconnectClientUseCase, GetConnectionCountUseCase, SendMessageUseCase,
};

/// Shared application state
pub struct AppState {
    /// ConnectClientUseCase（接続のユースケース）
    pub connect_client_usecase: Arc<ConnectClientUseCase>,
    /// DisconnectClientUseCase（切断のユースケース）
    pub disconnect_client_usecase: Arc<DisconnectClientUseCase>,
    /// SendMessageUseCase（メッセージ中継のユースケース）
    pub send_message_usecase: Arc<SendMessageUseCase>,
    /// GetConnectionCountUseCase（接続数取得のユースケース）
    pub get_connection_count_usecase: Arc<GetConnectionCountUseCase>,
    /// Text of the system message sent once to every new connection
    pub welcome_message: String,
}
