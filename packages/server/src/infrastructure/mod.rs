//! Infrastructure 層
//!
//! - `dto`: ワイヤーフォーマット（WebSocket / HTTP）
//! - `registry`: `ConnectionRegistry` の実装

pub mod dto;
pub mod registry;
