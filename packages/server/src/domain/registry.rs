//! ConnectionRegistry trait 定義
//!
//! ブロードキャスト対象となる接続の集合へのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{ConnectionHandle, ConnectionId};

/// `for_each` の訪問者が返す指示
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    /// メンバーを残す
    Keep,
    /// 訪問中のメンバーを削除する（遅延プルーニング）
    Remove,
}

/// Connection Registry trait
///
/// 現在開いている（と信じられている）接続の集合。重複は持たず、順序の保証もない。
/// 古くなったメンバーは送信時に遅延的に取り除かれる。
#[async_trait]
pub trait ConnectionRegistry: Send + Sync {
    /// 接続を追加（既に存在する場合は何もせず `false` を返す）
    async fn add(&self, handle: ConnectionHandle) -> bool;

    /// 接続を削除（存在しない場合は何もせず `false` を返す）
    async fn remove(&self, id: &ConnectionId) -> bool;

    /// 全メンバーを訪問する
    ///
    /// 訪問者は `Visit::Remove` を返すことで訪問中のメンバーを削除できる。
    /// 削除しても他のメンバーの訪問がスキップされることはない。
    async fn for_each(
        &self,
        visitor: &mut (dyn for<'h> FnMut(&'h ConnectionHandle) -> Visit + Send),
    );

    /// 接続が登録されているか
    async fn contains(&self, id: &ConnectionId) -> bool;

    /// 登録中の接続数
    async fn len(&self) -> usize;

    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
