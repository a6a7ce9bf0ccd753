//! Time-related utilities with clock abstraction for testability.
//!
//! The relay is the only clock authority for chat messages, so every
//! server-assigned timestamp goes through a [`Clock`] and is rendered as
//! UTC ISO-8601 with millisecond precision (`2024-01-01T00:00:00.000Z`).

use chrono::{DateTime, SecondsFormat, Utc};

/// Clock trait for dependency injection and testing
pub trait Clock: Send + Sync {
    /// Current instant in UTC
    fn now_utc(&self) -> DateTime<Utc>;
}

/// System clock implementation (uses actual system time)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Fixed clock implementation for testing (returns a fixed time)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    fixed_time: DateTime<Utc>,
}

impl FixedClock {
    /// Create a new fixed clock returning the given instant
    pub fn new(fixed_time: DateTime<Utc>) -> Self {
        Self { fixed_time }
    }

    /// Create a new fixed clock from a Unix timestamp in milliseconds.
    ///
    /// Returns `None` when the timestamp is outside chrono's supported range.
    pub fn from_millis(fixed_time_millis: i64) -> Option<Self> {
        DateTime::from_timestamp_millis(fixed_time_millis).map(Self::new)
    }
}

impl Clock for FixedClock {
    fn now_utc(&self) -> DateTime<Utc> {
        self.fixed_time
    }
}

/// Format an instant as UTC ISO-8601 with millisecond precision and a `Z` suffix
pub fn to_iso8601_millis(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}
