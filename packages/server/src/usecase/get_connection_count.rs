//! UseCase: 接続数取得

use std::sync::Arc;

use crate::domain::ConnectionRegistry;

/// 接続数取得のユースケース
pub struct GetConnectionCountUseCase {
    registry: Arc<dyn ConnectionRegistry>,
}

impl GetConnectionCountUseCase {
    pub fn new(registry: Arc<dyn ConnectionRegistry>) -> Self {
        Self { registry }
    }

    pub async fn execute(&self) -> usize {
        self.registry.len().await
    }
}
