//! Logfmt text formatter

use super::{Format, FORMATTER_TEXT, RESERVED_KEYS};
use crate::core::error::Result;
use crate::core::record::LogRecord;
use crate::core::timestamp::TimestampFormat;

/// Renders `time=<rfc3339> level=<severity> msg="<message>"` followed by
/// `key=value` pairs for the non-reserved fields, one record per line.
/// Values containing whitespace, quotes, or `=` are quoted and escaped.
pub struct TextFormatter {
    timestamp_format: TimestampFormat,
}

impl TextFormatter {
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

    fn needs_quoting(value: &str) -> bool {
        value.is_empty()
            || value
                .chars()
                .any(|c| c.is_whitespace() || c == '"' || c == '=')
    }

    fn append_value(out: &mut String, value: &str) {
        if Self::needs_quoting(value) {
            out.push('"');
            for c in value.chars() {
                match c {
                    '"' => out.push_str("\\\""),
                    '\\' => out.push_str("\\\\"),
                    _ => out.push(c),
                }
            }
            out.push('"');
        } else {
            out.push_str(value);
        }
    }
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Format for TextFormatter {
    fn render(&self, record: &LogRecord) -> Result<Vec<u8>> {
        let mut out = String::with_capacity(64 + record.message.len());

        out.push_str("time=");
        Self::append_value(&mut out, &self.timestamp_format.format(&record.timestamp));
        out.push_str(" level=");
        out.push_str(record.level.as_lower_str());
        out.push_str(" msg=\"");
        for c in record.message.chars() {
            match c {
                '"' => out.push_str("\\\""),
                '\\' => out.push_str("\\\\"),
                _ => out.push(c),
            }
        }
        out.push('"');

        for (key, value) in record.fields.iter() {
            if !RESERVED_KEYS.contains(&key.as_str()) {
                out.push(' ');
                out.push_str(key);
                out.push('=');
                Self::append_value(&mut out, &value.to_string());
            }
        }

        out.push('\n');
        Ok(out.into_bytes())
    }

    fn name(&self) -> &str {
        FORMATTER_TEXT
    }
}
