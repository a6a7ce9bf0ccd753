//! InMemory Connection Registry 実装
//!
//! ドメイン層が定義する ConnectionRegistry trait の具体的な実装。
//! マルチスレッドランタイム上で動くため、全ての操作は Mutex で直列化されます。
//! 再起動するとレジストリは空になります（永続化なし）。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionHandle, ConnectionId, ConnectionRegistry, Visit};

/// インメモリ Connection Registry 実装
#[derive(Default)]
pub struct InMemoryConnectionRegistry {
    /// Key: ConnectionId, Value: ConnectionHandle
    connections: Mutex<HashMap<ConnectionId, ConnectionHandle>>,
}

impl InMemoryConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConnectionRegistry for InMemoryConnectionRegistry {
    async fn add(&self, handle: ConnectionHandle) -> bool {
        let mut connections = self.connections.lock().await;
        if connections.contains_key(handle.id()) {
            tracing::debug!("Connection '{}' is already registered", handle.id());
            return false;
        }
        tracing::debug!("Connection '{}' registered", handle.id());
        connections.insert(*handle.id(), handle);
        true
    }

    async fn remove(&self, id: &ConnectionId) -> bool {
        let mut connections = self.connections.lock().await;
        let removed = connections.remove(id).is_some();
        if removed {
            tracing::debug!("Connection '{}' unregistered", id);
        }
        removed
    }

    async fn for_each(
        &self,
        visitor: &mut (dyn for<'h> FnMut(&'h ConnectionHandle) -> Visit + Send),
    ) {
        let mut connections = self.connections.lock().await;
        // retain は訪問中の要素の削除に対して安全
        connections.retain(|_, handle| visitor(&*handle) == Visit::Keep);
    }

    async fn contains(&self, id: &ConnectionId) -> bool {
        self.connections.lock().await.contains_key(id)
    }

    async fn len(&self) -> usize {
        self.connections.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tokio::sync::mpsc;

    fn create_test_handle() -> (ConnectionHandle, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            ConnectionHandle::new(ConnectionId::generate(), tx, Utc::now()),
            rx,
        )
    }

    #[tokio::test]
    async fn test_add_registers_connection() {
        // テスト項目: add した接続がレジストリに含まれる
        // given (前提条件):
        let registry = InMemoryConnectionRegistry::new();
        let (handle, _rx) = create_test_handle();
        let id = *handle.id();

        // when (操作):
        let added = registry.add(handle).await;

        // then (期待する結果):
        assert!(added);
        assert!(registry.contains(&id).await);
        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test]
    async fn test_add_is_idempotent() {
        // テスト項目: 同じ接続を 2 回 add しても重複しない
        // given (前提条件):
        let registry = InMemoryConnectionRegistry::new();
        let (handle, _rx) = create_test_handle();
        registry.add(handle.clone()).await;

        // when (操作):
        let added_again = registry.add(handle).await;

        // then (期待する結果):
        assert!(!added_again);
        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        // テスト項目: remove は 2 回目以降も安全に呼べる（error と close の二重削除）
        // given (前提条件):
        let registry = InMemoryConnectionRegistry::new();
        let (handle, _rx) = create_test_handle();
        let id = *handle.id();
        registry.add(handle).await;

        // when (操作):
        let first = registry.remove(&id).await;
        let second = registry.remove(&id).await;

        // then (期待する結果):
        assert!(first);
        assert!(!second);
        assert!(registry.is_empty().await);
    }

    #[tokio::test]
    async fn test_remove_absent_connection_is_noop() {
        // テスト項目: 存在しない接続の remove は何もしない
        // given (前提条件):
        let registry = InMemoryConnectionRegistry::new();
        let (handle, _rx) = create_test_handle();
        registry.add(handle).await;

        // when (操作):
        let removed = registry.remove(&ConnectionId::generate()).await;

        // then (期待する結果):
        assert!(!removed);
        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test]
    async fn test_for_each_visits_every_member() {
        // テスト項目: for_each が全メンバーを 1 回ずつ訪問する
        // given (前提条件):
        let registry = InMemoryConnectionRegistry::new();
        let mut receivers = Vec::new();
        for _ in 0..3 {
            let (handle, rx) = create_test_handle();
            registry.add(handle).await;
            receivers.push(rx);
        }

        // when (操作):
        let mut visited = Vec::new();
        registry
            .for_each(&mut |handle: &ConnectionHandle| {
                visited.push(*handle.id());
                Visit::Keep
            })
            .await;

        // then (期待する結果):
        assert_eq!(visited.len(), 3);
        assert_eq!(registry.len().await, 3);
    }

    #[tokio::test]
    async fn test_for_each_removal_does_not_skip_others() {
        // テスト項目: 訪問中の削除が他のメンバーの訪問を妨げない
        // given (前提条件):
        let registry = InMemoryConnectionRegistry::new();
        let mut ids = Vec::new();
        let mut receivers = Vec::new();
        for _ in 0..4 {
            let (handle, rx) = create_test_handle();
            ids.push(*handle.id());
            registry.add(handle).await;
            receivers.push(rx);
        }
        let doomed = [ids[0], ids[2]];

        // when (操作):
        let mut visited = 0;
        registry
            .for_each(&mut |handle: &ConnectionHandle| {
                visited += 1;
                if doomed.contains(handle.id()) {
                    Visit::Remove
                } else {
                    Visit::Keep
                }
            })
            .await;

        // then (期待する結果):
        assert_eq!(visited, 4);
        assert_eq!(registry.len().await, 2);
        assert!(!registry.contains(&ids[0]).await);
        assert!(registry.contains(&ids[1]).await);
        assert!(!registry.contains(&ids[2]).await);
        assert!(registry.contains(&ids[3]).await);
    }
}
