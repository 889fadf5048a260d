//! # Logistry
//!
//! A registry of named loggers with pluggable appenders and formatters,
//! fire-and-forget asynchronous emission, and safe concurrent mutation of
//! a live logger's level and formatter.
//!
//! ## Features
//!
//! - **Named Loggers**: Configure once, look up by name anywhere
//! - **Pluggable Outputs**: Console, size-rotating, and daily-rotating
//!   files, plus custom appenders and formatters
//! - **Async by Default**: Fire-and-forget emission, with an optional
//!   bounded queue per logger
//! - **Thread Safe**: Level and formatter mutate safely under live traffic
//!
//! ## Quick start
//!
//! ```
//! use logistry::{configure, get_logger, Fields, LoggerConfig};
//!
//! configure(vec![LoggerConfig::new("app")
//!     .with_formatter("simple")
//!     .with_level("info")])?;
//!
//! let logger = get_logger("app");
//! logger.info_sync(Fields::new().with_field("user", "a"), &["started"]);
//! # Ok::<(), logistry::LoggerError>(())
//! ```

pub mod appenders;
pub mod core;
pub mod formatters;
pub mod macros;
pub mod registry;

pub mod prelude {
    pub use crate::appenders::{
        Appender, ConsoleSink, DailyRotatingSink, SetupFn, SizeRotatingSink,
    };
    pub use crate::core::{
        FieldValue, Fields, LogLevel, LogRecord, Logger, LoggerConfig, LoggerError, Result, Sink,
        TimestampFormat,
    };
    pub use crate::formatters::{Format, JsonFormatter, SimpleFormatter, TextFormatter};
    pub use crate::registry::{
        add_appender, add_formatter, configure, get_logger, Registry,
    };
}

pub use appenders::{
    Appender, ConsoleSink, DailyRotatingSink, SetupFn, SizeRotatingSink, APPENDER_DAILY,
    APPENDER_DEFAULT, APPENDER_SIZE,
};
pub use core::{
    BestEffortWriter, FieldValue, Fields, LogLevel, LogRecord, Logger, LoggerConfig, LoggerError,
    Result, Sink, TimestampFormat,
};
pub use formatters::{
    Format, JsonFormatter, SimpleFormatter, TextFormatter, FORMATTER_JSON, FORMATTER_SIMPLE,
    FORMATTER_TEXT,
};
pub use registry::{add_appender, add_formatter, configure, get_logger, Registry};
