//! JSON formatter

use super::{Format, FORMATTER_JSON};
use crate::core::error::Result;
use crate::core::record::LogRecord;
use crate::core::timestamp::TimestampFormat;
use serde_json::{Map, Value};

/// Renders one JSON object per line with a `time`/`level`/`msg` preamble
/// plus the record's fields. On a key collision the preamble wins.
pub struct JsonFormatter {
    timestamp_format: TimestampFormat,
}

impl JsonFormatter {
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
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Format for JsonFormatter {
    fn render(&self, record: &LogRecord) -> Result<Vec<u8>> {
        let mut object = Map::new();

        for (key, value) in record.fields.iter() {
            object.insert(key.clone(), value.to_json_value());
        }

        // Preamble keys overwrite same-named fields.
        object.insert(
            "time".to_string(),
            Value::String(self.timestamp_format.format(&record.timestamp)),
        );
        object.insert(
            "level".to_string(),
            Value::String(record.level.as_lower_str().to_string()),
        );
        object.insert("msg".to_string(), Value::String(record.message.clone()));

        let mut bytes = serde_json::to_vec(&Value::Object(object))?;
        bytes.push(b'\n');
        Ok(bytes)
    }

    fn name(&self) -> &str {
        FORMATTER_JSON
    }
}
