//! Inbound envelope model.
//!
//! A frame is either a chat submission (`type == "message"` with a truthy
//! `nickname` and `message`) or something the relay ignores. Chat submissions
//! keep the client's whole object, extra fields included, so the broadcast is
//! the client's envelope plus the server timestamp.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use chat_relay_shared::time::to_iso8601_millis;

use super::EnvelopeError;

/// `type` value that marks a chat submission
pub const CHAT_MESSAGE_TYPE: &str = "message";

const TYPE_FIELD: &str = "type";
const NICKNAME_FIELD: &str = "nickname";
const MESSAGE_FIELD: &str = "message";
const TIMESTAMP_FIELD: &str = "timestamp";

/// Parsed inbound frame
#[derive(Debug, Clone, PartialEq)]
pub enum InboundEnvelope {
    Chat(ChatSubmission),
    /// Valid JSON that is not a chat submission.
    ///
    /// `kind` is the raw `type` value when there was one.
    Ignored { kind: Option<Value> },
}

impl InboundEnvelope {
    /// Parse a raw text frame.
    ///
    /// # Errors
    ///
    /// - `InvalidJson` when the frame does not parse
    /// - `MissingField` when a `"message"` envelope lacks a truthy
    ///   `nickname` or `message`
    pub fn parse(text: &str) -> Result<Self, EnvelopeError> {
        let Value::Object(fields) = serde_json::from_str::<Value>(text)? else {
            return Ok(Self::Ignored { kind: None });
        };

        match fields.get(TYPE_FIELD) {
            Some(Value::String(kind)) if kind == CHAT_MESSAGE_TYPE => {
                ChatSubmission::try_from(fields).map(Self::Chat)
            }
            other => Ok(Self::Ignored {
                kind: other.cloned(),
            }),
        }
    }
}

/// Validated chat submission, still carrying every client-supplied field
#[derive(Debug, Clone, PartialEq)]
pub struct ChatSubmission {
    fields: Map<String, Value>,
}

impl ChatSubmission {
    pub fn nickname(&self) -> &Value {
        &self.fields[NICKNAME_FIELD]
    }

    /// Set `timestamp` to `received_at`, replacing any client value.
    ///
    /// An existing `timestamp` keeps its position in the object.
    pub fn stamp(mut self, received_at: DateTime<Utc>) -> StampedMessage {
        self.fields.insert(
            TIMESTAMP_FIELD.to_string(),
            Value::String(to_iso8601_millis(received_at)),
        );
        StampedMessage {
            fields: self.fields,
        }
    }
}

impl TryFrom<Map<String, Value>> for ChatSubmission {
    type Error = EnvelopeError;

    fn try_from(fields: Map<String, Value>) -> Result<Self, Self::Error> {
        for required in [NICKNAME_FIELD, MESSAGE_FIELD] {
            if !fields.get(required).is_some_and(is_truthy) {
                return Err(EnvelopeError::MissingField(required));
            }
        }
        Ok(Self { fields })
    }
}

/// Chat message ready for fan-out
#[derive(Debug, Clone, PartialEq)]
pub struct StampedMessage {
    fields: Map<String, Value>,
}

impl StampedMessage {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.fields)
    }
}

/// Loose truthiness: `null`, `false`, `0` and `""` are falsy
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
