//! WebSocket message DTOs.
//!
//! Chat broadcasts are not modelled here: they are the client's own object
//! re-serialized with a server timestamp (see `domain::envelope`).

use serde::{Deserialize, Serialize};

/// Envelope `type` values the server emits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MessageType {
    /// Server notice addressed to a single connection
    System,
}

/// Server notice, e.g. the welcome sent once after accept
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemMessage {
    pub r#type: MessageType,
    pub message: String,
}

impl SystemMessage {
    pub fn welcome(text: impl Into<String>) -> Self {
        Self {
            r#type: MessageType::System,
            message: text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_welcome_message_wire_format() {
        // テスト項目: ウェルカムメッセージが {"type":"system","message":...} にシリアライズされる
        // given (前提条件):
        let welcome = SystemMessage::welcome("Welcome to the chat!");

        // when (操作):
        let json = serde_json::to_string(&welcome).unwrap();

        // then (期待する結果):
        assert_eq!(json, r#"{"type":"system","message":"Welcome to the chat!"}"#);
    }

    #[test]
    fn test_system_message_deserializes() {
        // テスト項目: system メッセージの JSON から DTO を復元できる
        // given (前提条件):
        let json = r#"{"type":"system","message":"Bem-vindo ao chat!"}"#;

        // when (操作):
        let message: SystemMessage = serde_json::from_str(json).unwrap();

        // then (期待する結果):
        assert_eq!(message, SystemMessage::welcome("Bem-vindo ao chat!"));
    }
}
