//! UseCase: 切断処理
//!
//! close と error の両方から呼ばれうるため、二重に呼ばれても安全（冪等）。

use std::sync::Arc;

use crate::domain::{ConnectionId, ConnectionRegistry};

/// 切断のユースケース
pub struct DisconnectClientUseCase {
    registry: Arc<dyn ConnectionRegistry>,
}

impl DisconnectClientUseCase {
    pub fn new(registry: Arc<dyn ConnectionRegistry>) -> Self {
        Self { registry }
    }

    /// 接続をレジストリから削除する
    ///
    /// # Returns
    ///
    /// 実際に削除した場合は `true`、既に存在しなかった場合は `false`
    pub async fn execute(&self, id: &ConnectionId) -> bool {
        let removed = self.registry.remove(id).await;
        if !removed {
            tracing::debug!("Connection '{}' was already removed", id);
        }
        removed
    }
}
