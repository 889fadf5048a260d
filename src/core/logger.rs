//! The named, stateful logger unit
//!
//! A [`Logger`] binds a name to a wired output (sink + formatter + level)
//! and exposes the leveled entry points. Each level has four forms:
//! plain-message asynchronous (`info`), formatted asynchronous (`infof`),
//! and their synchronous counterparts (`info_sync`, `infof_sync`).
//! Asynchronous calls are fire-and-forget: they return immediately, surface
//! no emission error, and give no ordering guarantee relative to any other
//! call on the same logger.
//!
//! A logger is wired exactly once by its appender's setup strategy. The only
//! state mutable afterwards is the level/formatter pair, guarded by the
//! engine's exclusive lock; re-wiring means replacing the whole logger in
//! the registry, never mutating the bound entry points in place.

use super::caller::{CallerResolver, INTERNAL_SOURCES};
use super::dispatch::AsyncDispatch;
use super::engine::Engine;
use super::error::Result;
use super::fields::Fields;
use super::level::LogLevel;
use super::sink::Sink;
use crate::appenders::APPENDER_DEFAULT;
use crate::formatters::{Format, FORMATTER_TEXT};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;
use std::panic::Location;
use std::path::PathBuf;
use std::sync::Arc;

fn default_appender_kind() -> String {
    APPENDER_DEFAULT.to_string()
}

fn default_formatter_kind() -> String {
    FORMATTER_TEXT.to_string()
}

fn default_level_name() -> String {
    "info".to_string()
}

/// Declared configuration of a logger, as handed to [`configure`] or built
/// up with the `with_*` methods.
///
/// `path`, `rotation_size`, and `max_rotated` only apply to the file-backed
/// appenders; the rotation options fall back to library defaults when unset.
///
/// [`configure`]: crate::registry::configure
///
/// # Examples
///
/// ```
/// use logistry::LoggerConfig;
///
/// let config = LoggerConfig::new("svc")
///     .with_appender("size")
///     .with_formatter("simple")
///     .with_level("warn")
///     .with_path("/var/log/svc.log")
///     .with_rotation_size(10 * 1024 * 1024)
///     .with_max_rotated(7);
/// assert_eq!(config.name, "svc");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggerConfig {
    /// Unique key within the process-wide registry.
    pub name: String,
    /// Symbolic reference into the appender registry.
    #[serde(default = "default_appender_kind")]
    pub appender: String,
    /// Symbolic reference into the formatter registry.
    #[serde(default = "default_formatter_kind")]
    pub formatter: String,
    /// Symbolic severity name; unparseable names abort setup.
    #[serde(default = "default_level_name")]
    pub level: String,
    /// Output file path, required by the file-backed appenders.
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Size-rotation threshold in bytes.
    #[serde(default)]
    pub rotation_size: Option<u64>,
    /// Maximum retained rotated files.
    #[serde(default)]
    pub max_rotated: Option<usize>,
    /// Annotate records with the originating call site.
    #[serde(default)]
    pub include_caller: bool,
    /// Route asynchronous emissions through a bounded queue of this capacity
    /// instead of spawning a thread per call.
    #[serde(default)]
    pub queue_capacity: Option<usize>,
}

impl LoggerConfig {
    /// Create a configuration with default bindings
    /// (`default` appender, `text` formatter, `info` level).
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            appender: default_appender_kind(),
            formatter: default_formatter_kind(),
            level: default_level_name(),
            path: None,
            rotation_size: None,
            max_rotated: None,
            include_caller: false,
            queue_capacity: None,
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_appender(mut self, appender: impl Into<String>) -> Self {
        self.appender = appender.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_formatter(mut self, formatter: impl Into<String>) -> Self {
        self.formatter = formatter.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_rotation_size(mut self, bytes: u64) -> Self {
        self.rotation_size = Some(bytes);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_max_rotated(mut self, count: usize) -> Self {
        self.max_rotated = Some(count);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_caller_info(mut self, include: bool) -> Self {
        self.include_caller = include;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = Some(capacity);
        self
    }
}

pub struct Logger {
    config: LoggerConfig,
    engine: Arc<Engine>,
    dispatch: Arc<AsyncDispatch>,
    resolver: CallerResolver,
}

impl Logger {
    /// Wire a logger from resolved bindings. Called by appender setup
    /// strategies, including user-registered ones.
    pub fn wire(
        config: LoggerConfig,
        level: LogLevel,
        formatter: Arc<dyn Format>,
        sink: Arc<dyn Sink>,
    ) -> Self {
        let dispatch = match config.queue_capacity {
            Some(capacity) => AsyncDispatch::queued(capacity),
            None => AsyncDispatch::Spawn,
        };

        Self {
            engine: Arc::new(Engine::new(level, formatter, sink)),
            dispatch: Arc::new(dispatch),
            resolver: CallerResolver::new(INTERNAL_SOURCES),
            config,
        }
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }

    /// Current severity threshold.
    pub fn get_level(&self) -> LogLevel {
        self.engine.level()
    }

    /// Replace the severity threshold. Safe to race with emission: an
    /// in-flight call observes either the old or the new value.
    pub fn set_level(&self, level: LogLevel) {
        self.engine.set_level(level);
    }

    /// Replace the formatter, under the same lock discipline as
    /// [`set_level`](Self::set_level).
    pub fn set_formatter(&self, formatter: Arc<dyn Format>) {
        self.engine.set_formatter(formatter);
    }

    /// Flush the underlying sink.
    pub fn flush(&self) -> Result<()> {
        self.engine.flush()
    }

    // -- generic entry points (dynamic-by-name dispatch)

    /// Asynchronous emission under a severity name. Message parts are joined
    /// with a space; an unrecognized name downgrades to Debug.
    #[track_caller]
    pub fn call(&self, level: &str, fields: Fields, messages: &[&str]) {
        self.dispatch_async(level.to_string(), fields, messages.join(" "), Location::caller());
    }

    /// Asynchronous formatted emission under a severity name.
    #[track_caller]
    pub fn callf(&self, level: &str, fields: Fields, args: fmt::Arguments<'_>) {
        self.dispatch_async(level.to_string(), fields, args.to_string(), Location::caller());
    }

    /// Synchronous emission under a severity name; returns once the sink
    /// has accepted the write.
    #[track_caller]
    pub fn call_sync(&self, level: &str, fields: Fields, messages: &[&str]) {
        self.dispatch_sync(level, fields, messages.join(" "), Location::caller());
    }

    /// Synchronous formatted emission under a severity name.
    #[track_caller]
    pub fn callf_sync(&self, level: &str, fields: Fields, args: fmt::Arguments<'_>) {
        self.dispatch_sync(level, fields, args.to_string(), Location::caller());
    }

    // -- leveled entry points, asynchronous

    #[track_caller]
    pub fn debug(&self, fields: Fields, messages: &[&str]) {
        self.dispatch_async("debug".to_string(), fields, messages.join(" "), Location::caller());
    }

    #[track_caller]
    pub fn info(&self, fields: Fields, messages: &[&str]) {
        self.dispatch_async("info".to_string(), fields, messages.join(" "), Location::caller());
    }

    #[track_caller]
    pub fn warn(&self, fields: Fields, messages: &[&str]) {
        self.dispatch_async("warn".to_string(), fields, messages.join(" "), Location::caller());
    }

    #[track_caller]
    pub fn error(&self, fields: Fields, messages: &[&str]) {
        self.dispatch_async("error".to_string(), fields, messages.join(" "), Location::caller());
    }

    #[track_caller]
    pub fn fatal(&self, fields: Fields, messages: &[&str]) {
        self.dispatch_async("fatal".to_string(), fields, messages.join(" "), Location::caller());
    }

    #[track_caller]
    pub fn debugf(&self, fields: Fields, args: fmt::Arguments<'_>) {
        self.dispatch_async("debug".to_string(), fields, args.to_string(), Location::caller());
    }

    #[track_caller]
    pub fn infof(&self, fields: Fields, args: fmt::Arguments<'_>) {
        self.dispatch_async("info".to_string(), fields, args.to_string(), Location::caller());
    }

    #[track_caller]
    pub fn warnf(&self, fields: Fields, args: fmt::Arguments<'_>) {
        self.dispatch_async("warn".to_string(), fields, args.to_string(), Location::caller());
    }

    #[track_caller]
    pub fn errorf(&self, fields: Fields, args: fmt::Arguments<'_>) {
        self.dispatch_async("error".to_string(), fields, args.to_string(), Location::caller());
    }

    #[track_caller]
    pub fn fatalf(&self, fields: Fields, args: fmt::Arguments<'_>) {
        self.dispatch_async("fatal".to_string(), fields, args.to_string(), Location::caller());
    }

    // -- leveled entry points, synchronous

    #[track_caller]
    pub fn debug_sync(&self, fields: Fields, messages: &[&str]) {
        self.dispatch_sync("debug", fields, messages.join(" "), Location::caller());
    }

    #[track_caller]
    pub fn info_sync(&self, fields: Fields, messages: &[&str]) {
        self.dispatch_sync("info", fields, messages.join(" "), Location::caller());
    }

    #[track_caller]
    pub fn warn_sync(&self, fields: Fields, messages: &[&str]) {
        self.dispatch_sync("warn", fields, messages.join(" "), Location::caller());
    }

    #[track_caller]
    pub fn error_sync(&self, fields: Fields, messages: &[&str]) {
        self.dispatch_sync("error", fields, messages.join(" "), Location::caller());
    }

    #[track_caller]
    pub fn fatal_sync(&self, fields: Fields, messages: &[&str]) {
        self.dispatch_sync("fatal", fields, messages.join(" "), Location::caller());
    }

    #[track_caller]
    pub fn debugf_sync(&self, fields: Fields, args: fmt::Arguments<'_>) {
        self.dispatch_sync("debug", fields, args.to_string(), Location::caller());
    }

    #[track_caller]
    pub fn infof_sync(&self, fields: Fields, args: fmt::Arguments<'_>) {
        self.dispatch_sync("info", fields, args.to_string(), Location::caller());
    }

    #[track_caller]
    pub fn warnf_sync(&self, fields: Fields, args: fmt::Arguments<'_>) {
        self.dispatch_sync("warn", fields, args.to_string(), Location::caller());
    }

    #[track_caller]
    pub fn errorf_sync(&self, fields: Fields, args: fmt::Arguments<'_>) {
        self.dispatch_sync("error", fields, args.to_string(), Location::caller());
    }

    #[track_caller]
    pub fn fatalf_sync(&self, fields: Fields, args: fmt::Arguments<'_>) {
        self.dispatch_sync("fatal", fields, args.to_string(), Location::caller());
    }

    // -- raw byte path

    /// Best-effort raw write to the sink: schedules the write, discards any
    /// error, and always reports `0`. Logging must never fail or block the
    /// caller's control flow, so this lossy result is deliberate.
    pub fn write_bytes(&self, bytes: &[u8]) -> usize {
        let engine = Arc::clone(&self.engine);
        let owned = bytes.to_vec();
        self.dispatch.dispatch(Box::new(move || {
            let _ = engine.sink().write(&owned);
        }));
        0
    }

    /// An [`io::Write`] adapter over [`write_bytes`](Self::write_bytes) for
    /// byte-stream consumers. The adapter shares this logger's dispatch
    /// policy, so a queued logger queues adapter writes too.
    pub fn writer(&self) -> BestEffortWriter {
        BestEffortWriter {
            engine: Arc::clone(&self.engine),
            dispatch: Arc::clone(&self.dispatch),
        }
    }

    fn dispatch_async(
        &self,
        level: String,
        mut fields: Fields,
        message: String,
        location: &'static Location<'static>,
    ) {
        // Caller resolution happens before the spawn so the annotation names
        // the true call site, not the worker thread.
        self.resolver
            .annotate(&mut fields, self.config.include_caller, location);
        let engine = Arc::clone(&self.engine);
        self.dispatch.dispatch(Box::new(move || {
            engine.scoped(fields).emit_named(&level, &message);
        }));
    }

    fn dispatch_sync(
        &self,
        level: &str,
        mut fields: Fields,
        message: String,
        location: &'static Location<'static>,
    ) {
        self.resolver
            .annotate(&mut fields, self.config.include_caller, location);
        self.engine.scoped(fields).emit_named(level, &message);
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Byte-stream adapter that schedules each buffer as an independent
/// best-effort write through its logger's dispatch policy and never
/// surfaces an error.
///
/// Unlike [`Logger::write_bytes`], `write` reports the full buffer length:
/// returning `Ok(0)` would read as end-of-stream to `write_all` callers.
/// The write outcome is still discarded.
pub struct BestEffortWriter {
    engine: Arc<Engine>,
    dispatch: Arc<AsyncDispatch>,
}

impl io::Write for BestEffortWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let engine = Arc::clone(&self.engine);
        let owned = buf.to_vec();
        self.dispatch.dispatch(Box::new(move || {
            let _ = engine.sink().write(&owned);
        }));
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
