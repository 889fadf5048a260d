//! Simple bracketed-text formatter

use super::{Format, FORMATTER_SIMPLE, RESERVED_KEYS};
use crate::core::error::Result;
use crate::core::record::LogRecord;
use crate::core::timestamp::TimestampFormat;

/// Renders `[<timestamp>] [<LEVEL>] <message>` followed by one ` key=value`
/// token per non-reserved field and a single trailing newline.
///
/// The timestamp format is configurable; when unspecified it falls back to
/// RFC 3339.
///
/// # Examples
///
/// ```
/// use logistry::core::{Fields, LogLevel, LogRecord};
/// use logistry::formatters::{Format, SimpleFormatter};
///
/// let record = LogRecord::new(
///     LogLevel::Info,
///     "started".to_string(),
///     Fields::new().with_field("user", "a"),
/// );
/// let rendered = SimpleFormatter::new().render(&record).unwrap();
/// let text = String::from_utf8(rendered).unwrap();
/// assert!(text.contains("[INFO] started user=a"));
/// assert!(text.ends_with('\n'));
/// ```
pub struct SimpleFormatter {
    timestamp_format: TimestampFormat,
}

impl SimpleFormatter {
    pub fn new() -> Self {
        Self {
            timestamp_format: TimestampFormat::default(),
        }
    }

    /// Set the timestamp format
    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Set a custom timestamp format using a strftime-compatible string
    #[must_use]
    pub fn with_custom_timestamp(mut self, format_str: &str) -> Self {
        self.timestamp_format = TimestampFormat::Custom(format_str.to_string());
        self
    }
}

impl Default for SimpleFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Format for SimpleFormatter {
    fn render(&self, record: &LogRecord) -> Result<Vec<u8>> {
        let mut out = String::with_capacity(64 + record.message.len());

        out.push('[');
        out.push_str(&self.timestamp_format.format(&record.timestamp));
        out.push_str("] [");
        out.push_str(record.level.to_str());
        out.push_str("] ");
        out.push_str(&record.message);

        for (key, value) in record.fields.iter() {
            if !RESERVED_KEYS.contains(&key.as_str()) {
                out.push(' ');
                out.push_str(key);
                out.push('=');
                out.push_str(&value.to_string());
            }
        }

        out.push('\n');
        Ok(out.into_bytes())
    }

    fn name(&self) -> &str {
        FORMATTER_SIMPLE
    }
}
