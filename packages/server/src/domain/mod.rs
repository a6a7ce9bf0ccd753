//! ドメイン層
//!
//! 接続・エンベロープ・レジストリのモデルを定義します。
//! トランスポート（axum / WebSocket）には依存しません。

pub mod entity;
pub mod envelope;
pub mod error;
pub mod registry;
pub mod value_object;

pub use entity::{ConnectionHandle, PusherChannel};
pub use envelope::{ChatSubmission, InboundEnvelope, StampedMessage};
pub use error::{EnvelopeError, PushError};
pub use registry::{ConnectionRegistry, Visit};
pub use value_object::ConnectionId;
