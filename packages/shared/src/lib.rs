//! Utilities shared by the chat relay crates.
//!
//! - `logger`: tracing subscriber setup
//! - `time`: clock abstraction and UTC ISO-8601 formatting

pub mod logger;
pub mod time;
