//! Minimal real-time chat relay.
//!
//! Clients open WebSocket connections and submit chat messages; the server
//! stamps each valid message with its own UTC time and rebroadcasts it to every
//! connected client, the sender included.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;
