//! UseCase: メッセージ中継処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//! - 受信フレームの検証、サーバー時刻の付与、ブロードキャスト
//!
//! ### なぜこのテストが必要か
//! - 不正なフレームは誰にもブロードキャストされてはならない
//! - timestamp はクライアントの値に関わらずサーバー時刻で上書きされる
//! - timestamp 以外のフィールドは一切変更されない
//!
//! ### どのような状況を想定しているか
//! - 正常系：有効なメッセージのブロードキャスト（送信者を含む）
//! - 異常系：JSON でない、type が違う、必須フィールドの欠落・空文字
//! - エッジケース：クライアントが timestamp を送ってきた場合

use std::sync::Arc;

use chat_relay_shared::time::Clock;

use crate::domain::{ConnectionId, InboundEnvelope};

use super::{
    broadcast::{BroadcastOutcome, BroadcastRelay},
    error::SendMessageError,
};

/// What happened to an inbound frame that was not an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Broadcast(BroadcastOutcome),
    /// Valid JSON that is not a chat submission; dropped without broadcast
    Ignored,
}

/// メッセージ中継のユースケース
pub struct SendMessageUseCase {
    /// サーバー時刻の唯一の取得元
    clock: Arc<dyn Clock>,
    relay: Arc<BroadcastRelay>,
}

impl SendMessageUseCase {
    pub fn new(clock: Arc<dyn Clock>, relay: Arc<BroadcastRelay>) -> Self {
        Self { clock, relay }
    }

    /// 受信した生のテキストフレームを処理する
    ///
    /// # Arguments
    ///
    /// * `origin` - フレームを送ってきた接続
    /// * `raw` - 受信したテキスト
    ///
    /// # Returns
    ///
    /// * `Ok(Delivery::Broadcast(_))` - 検証を通過し、全接続に送信した
    /// * `Ok(Delivery::Ignored)` - チャットメッセージではないため破棄した
    /// * `Err(SendMessageError)` - 不正なフレームのため破棄した
    pub async fn execute(
        &self,
        origin: &ConnectionId,
        raw: &str,
    ) -> Result<Delivery, SendMessageError> {
        let submission = match InboundEnvelope::parse(raw)? {
            InboundEnvelope::Chat(submission) => submission,
            InboundEnvelope::Ignored { kind } => {
                tracing::debug!(
                    "Ignoring frame from '{}' with type {:?}",
                    origin,
                    kind.map(|kind| kind.to_string())
                );
                return Ok(Delivery::Ignored);
            }
        };

        tracing::debug!(
            "Relaying message from nickname {} on '{}'",
            submission.nickname(),
            origin
        );
        let stamped = submission.stamp(self.clock.now_utc());
        let json = stamped.to_json().map_err(SendMessageError::Serialize)?;

        let outcome = self.relay.broadcast(&json, origin).await;
        Ok(Delivery::Broadcast(outcome))
    }
}
