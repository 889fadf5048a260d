//! Severity engine: the record machinery behind a wired logger
//!
//! An [`Engine`] holds the minimum level and formatter behind one exclusive
//! lock, plus the shared sink. Emission snapshots the guarded state, releases
//! the lock, and only then renders and writes, so mutators never contend
//! with sink I/O. An in-flight emission may observe either the pre- or
//! post-mutation value, never a torn one.

use super::error::Result;
use super::fields::Fields;
use super::level::LogLevel;
use super::record::LogRecord;
use super::sink::Sink;
use crate::formatters::Format;
use parking_lot::Mutex;
use std::sync::Arc;

/// The mutable half of a wired logger: guarded by one exclusive lock.
struct EngineState {
    level: LogLevel,
    formatter: Arc<dyn Format>,
}

pub struct Engine {
    state: Mutex<EngineState>,
    sink: Arc<dyn Sink>,
}

impl Engine {
    pub fn new(level: LogLevel, formatter: Arc<dyn Format>, sink: Arc<dyn Sink>) -> Self {
        Self {
            state: Mutex::new(EngineState { level, formatter }),
            sink,
        }
    }

    pub fn level(&self) -> LogLevel {
        self.state.lock().level
    }

    pub fn set_level(&self, level: LogLevel) {
        self.state.lock().level = level;
    }

    pub fn set_formatter(&self, formatter: Arc<dyn Format>) {
        self.state.lock().formatter = formatter;
    }

    pub fn sink(&self) -> Arc<dyn Sink> {
        Arc::clone(&self.sink)
    }

    /// Decorate an emission with structured fields. The returned scope
    /// exposes one emission operation per severity.
    pub fn scoped(&self, fields: Fields) -> EmitScope<'_> {
        EmitScope {
            engine: self,
            fields,
        }
    }

    /// Flush the underlying sink.
    pub fn flush(&self) -> Result<()> {
        self.sink.flush()
    }
}

/// Emission context scoped to a set of fields.
pub struct EmitScope<'a> {
    engine: &'a Engine,
    fields: Fields,
}

impl EmitScope<'_> {
    pub fn debug(self, message: &str) {
        self.emit(LogLevel::Debug, message);
    }

    pub fn info(self, message: &str) {
        self.emit(LogLevel::Info, message);
    }

    pub fn warn(self, message: &str) {
        self.emit(LogLevel::Warn, message);
    }

    pub fn error(self, message: &str) {
        self.emit(LogLevel::Error, message);
    }

    pub fn fatal(self, message: &str) {
        self.emit(LogLevel::Fatal, message);
    }

    /// Resolve a severity name against the emission operations above.
    ///
    /// Resolution is an explicit mapping over the five-element level
    /// enumeration; a name that matches none of them silently downgrades to
    /// the Debug operation. Emission never fails a call over a bad name.
    pub fn emit_named(self, level_name: &str, message: &str) {
        match level_name.parse::<LogLevel>() {
            Ok(LogLevel::Debug) => self.debug(message),
            Ok(LogLevel::Info) => self.info(message),
            Ok(LogLevel::Warn) => self.warn(message),
            Ok(LogLevel::Error) => self.error(message),
            Ok(LogLevel::Fatal) => self.fatal(message),
            Err(_) => self.debug(message),
        }
    }

    fn emit(self, level: LogLevel, message: &str) {
        let (min_level, formatter) = {
            let state = self.engine.state.lock();
            (state.level, Arc::clone(&state.formatter))
        };

        if level < min_level {
            return;
        }

        let record = LogRecord::new(level, message.to_string(), self.fields);
        match formatter.render(&record) {
            Ok(bytes) => {
                // Write failures must never reach the logging caller.
                if let Err(e) = self.engine.sink.write(&bytes) {
                    eprintln!(
                        "[LOGISTRY ERROR] sink '{}' write failed: {}",
                        self.engine.sink.name(),
                        e
                    );
                }
            }
            Err(e) => {
                eprintln!(
                    "[LOGISTRY ERROR] formatter '{}' failed: {}",
                    formatter.name(),
                    e
                );
            }
        }
    }
}
