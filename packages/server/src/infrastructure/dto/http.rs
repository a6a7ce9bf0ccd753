//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// Response body of `GET /api/health`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthDto {
    pub status: String,
    /// Number of connections currently in the registry
    pub connections: usize,
}

impl HealthDto {
    pub fn ok(connections: usize) -> Self {
        Self {
            status: "ok".to_string(),
            connections,
        }
    }
}
