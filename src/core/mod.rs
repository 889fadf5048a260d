//! Core logger types and the dispatch engine

pub mod caller;
pub(crate) mod dispatch;
pub mod engine;
pub mod error;
pub mod fields;
pub mod level;
pub mod logger;
pub mod record;
pub mod sink;
pub mod timestamp;

pub use caller::{CallerResolver, CALLER_FIELD, UNKNOWN_CALLER};
pub use engine::{EmitScope, Engine};
pub use error::{LoggerError, Result};
pub use fields::{FieldValue, Fields};
pub use level::LogLevel;
pub use logger::{BestEffortWriter, Logger, LoggerConfig};
pub use record::LogRecord;
pub use sink::Sink;
pub use timestamp::TimestampFormat;
