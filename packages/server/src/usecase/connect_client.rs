//! UseCase: 接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectClientUseCase::execute() メソッド
//!
//! ### なぜこのテストが必要か
//! - ウェルカムメッセージは接続直後に 1 回だけ、どのブロードキャストよりも先に届く必要がある
//! - ウェルカムを送れなかった接続はレジストリに登録してはならない

use std::sync::Arc;

use crate::domain::{ConnectionHandle, ConnectionRegistry};

use super::error::ConnectError;

/// 接続のユースケース
pub struct ConnectClientUseCase {
    registry: Arc<dyn ConnectionRegistry>,
}

impl ConnectClientUseCase {
    pub fn new(registry: Arc<dyn ConnectionRegistry>) -> Self {
        Self { registry }
    }

    /// 接続を受け付ける
    ///
    /// ウェルカムメッセージを先にキューへ積んでからレジストリに登録するため、
    /// この接続が受け取る最初のフレームは必ずウェルカムメッセージになる。
    ///
    /// # Arguments
    ///
    /// * `handle` - 受け付けた接続
    /// * `welcome_json` - 送信するウェルカムメッセージ（DTO 層で生成されたもの）
    pub async fn execute(
        &self,
        handle: ConnectionHandle,
        welcome_json: &str,
    ) -> Result<(), ConnectError> {
        handle.push(welcome_json)?;

        let id = *handle.id();
        if !self.registry.add(handle).await {
            tracing::warn!("Connection '{}' was already registered", id);
        }

        Ok(())
    }
}
