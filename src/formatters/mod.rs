//! Rendering strategies mapping a log record to bytes
//!
//! Three built-ins ship pre-registered: `simple` (bracketed text), `text`
//! (logfmt key-value pairs), and `json` (one object per line). Custom
//! formatters implement [`Format`] and register through
//! [`add_formatter`](crate::registry::add_formatter); registering under an
//! existing name replaces the prior strategy.

pub mod json;
pub mod simple;
pub mod text;

pub use json::JsonFormatter;
pub use simple::SimpleFormatter;
pub use text::TextFormatter;

use crate::core::error::Result;
use crate::core::record::LogRecord;

/// Registry key of the simple bracketed-text formatter.
pub const FORMATTER_SIMPLE: &str = "simple";
/// Registry key of the logfmt formatter.
pub const FORMATTER_TEXT: &str = "text";
/// Registry key of the JSON formatter.
pub const FORMATTER_JSON: &str = "json";

/// Keys reserved for the rendered preamble (timestamp, severity, message).
/// Fields under these names are never rendered as extra key=value tokens.
pub(crate) const RESERVED_KEYS: [&str; 3] = ["time", "level", "msg"];

/// A named rendering strategy. `render` must be deterministic for a given
/// record and must not panic.
pub trait Format: Send + Sync {
    fn render(&self, record: &LogRecord) -> Result<Vec<u8>>;
    fn name(&self) -> &str;
}
