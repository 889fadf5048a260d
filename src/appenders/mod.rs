//! Appenders: named setup strategies and the sinks they wire
//!
//! An appender is not a sink. It is a named strategy that takes a declared
//! [`LoggerConfig`], resolves its symbolic formatter and level bindings
//! against the registry, constructs the destination, and returns a fully
//! wired [`Logger`]. The built-in strategies cover stdout and the two
//! rotating-file destinations; user strategies registered under the same
//! names replace them for subsequent setups.

mod console;
mod daily_rotating;
mod size_rotating;

pub use console::ConsoleSink;
pub use daily_rotating::DailyRotatingSink;
pub use size_rotating::{SizeRotatingSink, DEFAULT_MAX_ROTATED, DEFAULT_ROTATION_SIZE};

use crate::core::error::{LoggerError, Result};
use crate::core::level::LogLevel;
use crate::core::logger::{Logger, LoggerConfig};
use crate::formatters::Format;
use crate::registry::Registry;
use std::sync::Arc;

/// Name of the stdout appender, also the fallback for unknown references.
pub const APPENDER_DEFAULT: &str = "default";
/// Name of the size-rotating file appender.
pub const APPENDER_SIZE: &str = "size";
/// Name of the daily-rotating file appender.
pub const APPENDER_DAILY: &str = "daily";

/// A setup strategy: configuration in, wired logger out.
pub type SetupFn = Arc<dyn Fn(&Registry, &LoggerConfig) -> Result<Logger> + Send + Sync>;

/// A named setup strategy held in the appender registry.
#[derive(Clone)]
pub struct Appender {
    pub name: String,
    pub setup: SetupFn,
}

impl Appender {
    pub fn new(name: impl Into<String>, setup: SetupFn) -> Self {
        Self {
            name: name.into(),
            setup,
        }
    }
}

impl std::fmt::Debug for Appender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Appender")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Resolve the symbolic formatter and level references of a configuration.
///
/// Both resolutions are fatal: an unknown formatter name or an unparseable
/// level name aborts the setup (and with it the configuration batch), unlike
/// the appender reference itself which falls back to the default strategy.
pub fn resolve_binding(
    registry: &Registry,
    config: &LoggerConfig,
) -> Result<(LogLevel, Arc<dyn Format>)> {
    let formatter = registry
        .formatter(&config.formatter)
        .ok_or_else(|| LoggerError::unknown_formatter(&config.formatter))?;
    let level: LogLevel = config.level.parse()?;
    Ok((level, formatter))
}

pub(crate) fn builtin_appenders() -> Vec<Appender> {
    vec![
        Appender::new(APPENDER_DEFAULT, Arc::new(default_setup) as SetupFn),
        Appender::new(APPENDER_SIZE, Arc::new(size_rotating_setup) as SetupFn),
        Appender::new(APPENDER_DAILY, Arc::new(daily_rotating_setup) as SetupFn),
    ]
}

fn required_path(config: &LoggerConfig) -> Result<&std::path::Path> {
    config.path.as_deref().ok_or_else(|| {
        LoggerError::config(
            &config.name,
            format!("appender '{}' requires a file path", config.appender),
        )
    })
}

fn default_setup(registry: &Registry, config: &LoggerConfig) -> Result<Logger> {
    let (level, formatter) = resolve_binding(registry, config)?;
    Ok(Logger::wire(
        config.clone(),
        level,
        formatter,
        Arc::new(ConsoleSink::new()),
    ))
}

fn size_rotating_setup(registry: &Registry, config: &LoggerConfig) -> Result<Logger> {
    let (level, formatter) = resolve_binding(registry, config)?;
    let sink = SizeRotatingSink::new(
        required_path(config)?,
        config.rotation_size,
        config.max_rotated,
    )?;
    Ok(Logger::wire(config.clone(), level, formatter, Arc::new(sink)))
}

fn daily_rotating_setup(registry: &Registry, config: &LoggerConfig) -> Result<Logger> {
    let (level, formatter) = resolve_binding(registry, config)?;
    let sink = DailyRotatingSink::new(required_path(config)?)?;
    Ok(Logger::wire(config.clone(), level, formatter, Arc::new(sink)))
}
