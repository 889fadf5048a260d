//! Ephemeral log record passed to formatters

use super::fields::Fields;
use super::level::LogLevel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single record on its way to a sink. Built by the dispatch core at
/// emission time; never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogRecord {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub message: String,
    pub fields: Fields,
}

impl LogRecord {
    /// Sanitize the message to prevent log injection: newlines, carriage
    /// returns, and tabs are replaced with escape sequences so a caller
    /// cannot forge additional log lines.
    fn sanitize_message(message: &str) -> String {
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    pub fn new(level: LogLevel, message: String, fields: Fields) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            message: Self::sanitize_message(&message),
            fields,
        }
    }

    /// Replace the timestamp. Used by formatter tests that need a fixed
    /// instant.
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}
