//! Process-wide logger, appender, and formatter registries
//!
//! The [`Registry`] owns three named tables: wired loggers, appender setup
//! strategies, and formatters. A fresh registry already carries the
//! built-ins (appenders `default`/`size`/`daily`, formatters
//! `simple`/`text`/`json`); registration is last-writer-wins and an
//! overwrite affects future setups only, never already-wired loggers.
//!
//! One process-global instance backs the free functions [`configure`],
//! [`get_logger`], [`add_appender`], and [`add_formatter`]. Code that needs
//! isolation (tests, embedded use) constructs its own `Registry` instead.

use crate::appenders::{builtin_appenders, Appender, APPENDER_DEFAULT};
use crate::core::error::Result;
use crate::core::level::LogLevel;
use crate::core::logger::{Logger, LoggerConfig};
use crate::formatters::{
    Format, JsonFormatter, SimpleFormatter, TextFormatter, FORMATTER_JSON, FORMATTER_SIMPLE,
    FORMATTER_TEXT,
};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

static GLOBAL: Lazy<Registry> = Lazy::new(Registry::new);

/// The process-global registry behind the free functions.
pub fn global() -> &'static Registry {
    &GLOBAL
}

/// Set up every configuration against the global registry, in order.
/// See [`Registry::configure`].
///
/// # Errors
///
/// Returns the first setup error; configurations after it are not applied.
pub fn configure(configs: Vec<LoggerConfig>) -> Result<()> {
    GLOBAL.configure(configs)
}

/// Look up a logger by name in the global registry, wiring a default one
/// on first use. See [`Registry::get_logger`].
pub fn get_logger(name: &str) -> Arc<Logger> {
    GLOBAL.get_logger(name)
}

/// Register a setup strategy in the global registry.
/// See [`Registry::add_appender`].
pub fn add_appender(appender: Appender) {
    GLOBAL.add_appender(appender);
}

/// Register a formatter in the global registry.
/// See [`Registry::add_formatter`].
pub fn add_formatter(name: impl Into<String>, formatter: Arc<dyn Format>) {
    GLOBAL.add_formatter(name, formatter);
}

pub struct Registry {
    loggers: RwLock<HashMap<String, Arc<Logger>>>,
    appenders: RwLock<HashMap<String, Appender>>,
    formatters: RwLock<HashMap<String, Arc<dyn Format>>>,
}

impl Registry {
    /// Create a registry pre-populated with the built-in appenders and
    /// formatters and no loggers.
    pub fn new() -> Self {
        let registry = Self {
            loggers: RwLock::new(HashMap::new()),
            appenders: RwLock::new(HashMap::new()),
            formatters: RwLock::new(HashMap::new()),
        };
        registry.install_builtins();
        registry
    }

    fn install_builtins(&self) {
        {
            let mut appenders = self.appenders.write();
            for appender in builtin_appenders() {
                appenders.insert(appender.name.clone(), appender);
            }
        }
        {
            let mut formatters = self.formatters.write();
            formatters.insert(
                FORMATTER_SIMPLE.to_string(),
                Arc::new(SimpleFormatter::new()) as Arc<dyn Format>,
            );
            formatters.insert(
                FORMATTER_TEXT.to_string(),
                Arc::new(TextFormatter::new()) as Arc<dyn Format>,
            );
            formatters.insert(
                FORMATTER_JSON.to_string(),
                Arc::new(JsonFormatter::new()) as Arc<dyn Format>,
            );
        }
    }

    /// Set up every configuration in order and insert the wired loggers,
    /// overwriting on name collision. Re-running with a changed entry
    /// replaces that logger wholesale; handles obtained earlier keep the
    /// old wiring.
    ///
    /// # Errors
    ///
    /// Returns the first setup error (unknown formatter, unknown level,
    /// file creation failure); earlier entries in the batch stay applied,
    /// later ones are not attempted. An unknown appender name is not an
    /// error; it falls back to `default`.
    pub fn configure(&self, configs: Vec<LoggerConfig>) -> Result<()> {
        for config in configs {
            let logger = self.setup(&config)?;
            self.loggers
                .write()
                .insert(config.name.clone(), Arc::new(logger));
        }
        Ok(())
    }

    fn setup(&self, config: &LoggerConfig) -> Result<Logger> {
        // Clone the strategy out so the appender table is unlocked while
        // setup runs; strategies read the formatter table themselves.
        let appender = {
            let appenders = self.appenders.read();
            appenders
                .get(&config.appender)
                .or_else(|| appenders.get(APPENDER_DEFAULT))
                .cloned()
        };
        match appender {
            Some(appender) => (appender.setup)(self, config),
            None => {
                // Only reachable when the default strategy itself was
                // overwritten away; wire straight to stdout.
                Ok(self.hardwired_fallback(config))
            }
        }
    }

    fn hardwired_fallback(&self, config: &LoggerConfig) -> Logger {
        Logger::wire(
            config.clone(),
            LogLevel::Info,
            Arc::new(TextFormatter::new()),
            Arc::new(crate::appenders::ConsoleSink::new()),
        )
    }

    /// Look up a logger by name, wiring one with the default bindings
    /// (`default` appender, `text` formatter, `info` level) on first use.
    /// Idempotent: repeated lookups of an unconfigured name return the same
    /// instance.
    pub fn get_logger(&self, name: &str) -> Arc<Logger> {
        if let Some(logger) = self.loggers.read().get(name) {
            return Arc::clone(logger);
        }

        let mut loggers = self.loggers.write();
        // Re-check under the write lock; another thread may have won.
        if let Some(logger) = loggers.get(name) {
            return Arc::clone(logger);
        }

        let config = LoggerConfig::new(name);
        let logger = match self.setup(&config) {
            Ok(logger) => logger,
            Err(e) => {
                // Default bindings only fail when a built-in was replaced
                // with a broken strategy; lookup still must hand back a
                // working logger.
                eprintln!(
                    "[LOGISTRY WARN] default setup for '{}' failed: {}; using console fallback",
                    name, e
                );
                self.hardwired_fallback(&config)
            }
        };
        let logger = Arc::new(logger);
        loggers.insert(name.to_string(), Arc::clone(&logger));
        logger
    }

    /// Existing logger by name, without lazy creation.
    pub fn logger(&self, name: &str) -> Option<Arc<Logger>> {
        self.loggers.read().get(name).cloned()
    }

    /// Register a setup strategy under its name, replacing any previous one.
    /// Affects subsequent setups only.
    pub fn add_appender(&self, appender: Appender) {
        self.appenders
            .write()
            .insert(appender.name.clone(), appender);
    }

    /// Register a formatter under a name, replacing any previous one.
    /// Affects subsequent setups only.
    pub fn add_formatter(&self, name: impl Into<String>, formatter: Arc<dyn Format>) {
        self.formatters.write().insert(name.into(), formatter);
    }

    pub fn appender(&self, name: &str) -> Option<Appender> {
        self.appenders.read().get(name).cloned()
    }

    pub fn formatter(&self, name: &str) -> Option<Arc<dyn Format>> {
        self.formatters.read().get(name).cloned()
    }

    /// Drop every logger and restore the built-in appender and formatter
    /// tables. Test-isolation hook; handles obtained earlier keep working
    /// against their old wiring.
    pub fn reset(&self) {
        self.loggers.write().clear();
        self.appenders.write().clear();
        self.formatters.write().clear();
        self.install_builtins();
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appenders::SetupFn;
    use crate::core::error::LoggerError;

    #[test]
    fn test_builtins_present() {
        let registry = Registry::new();
        assert!(registry.appender("default").is_some());
        assert!(registry.appender("size").is_some());
        assert!(registry.appender("daily").is_some());
        assert!(registry.formatter("simple").is_some());
        assert!(registry.formatter("text").is_some());
        assert!(registry.formatter("json").is_some());
        assert!(registry.logger("anything").is_none());
    }

    #[test]
    fn test_configure_inserts_logger() {
        let registry = Registry::new();
        registry
            .configure(vec![LoggerConfig::new("svc").with_level("warn")])
            .unwrap();

        let logger = registry.logger("svc").expect("configured logger");
        assert_eq!(logger.get_level(), LogLevel::Warn);
    }

    #[test]
    fn test_configure_unknown_appender_falls_back_to_default() {
        let registry = Registry::new();
        registry
            .configure(vec![LoggerConfig::new("svc").with_appender("mystery")])
            .unwrap();
        assert!(registry.logger("svc").is_some());
    }

    #[test]
    fn test_configure_unknown_formatter_aborts() {
        let registry = Registry::new();
        let err = registry
            .configure(vec![
                LoggerConfig::new("first"),
                LoggerConfig::new("second").with_formatter("nope"),
                LoggerConfig::new("third"),
            ])
            .unwrap_err();

        assert!(matches!(err, LoggerError::UnknownFormatter { .. }));
        // Entries before the failure stay applied; later ones do not run.
        assert!(registry.logger("first").is_some());
        assert!(registry.logger("second").is_none());
        assert!(registry.logger("third").is_none());
    }

    #[test]
    fn test_configure_unknown_level_aborts() {
        let registry = Registry::new();
        let err = registry
            .configure(vec![LoggerConfig::new("svc").with_level("loud")])
            .unwrap_err();
        assert!(matches!(err, LoggerError::UnknownLevel { .. }));
    }

    #[test]
    fn test_get_logger_lazy_and_idempotent() {
        let registry = Registry::new();
        let first = registry.get_logger("lazy");
        let second = registry.get_logger("lazy");

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.get_level(), LogLevel::Info);
        assert_eq!(first.config().appender, "default");
        assert_eq!(first.config().formatter, "text");
    }

    #[test]
    fn test_reconfigure_replaces_instance() {
        let registry = Registry::new();
        let lazy = registry.get_logger("svc");

        registry
            .configure(vec![LoggerConfig::new("svc").with_level("error")])
            .unwrap();
        let reconfigured = registry.get_logger("svc");

        assert!(!Arc::ptr_eq(&lazy, &reconfigured));
        assert_eq!(reconfigured.get_level(), LogLevel::Error);
        // The old handle keeps its old wiring.
        assert_eq!(lazy.get_level(), LogLevel::Info);
    }

    #[test]
    fn test_registration_overrides_for_subsequent_setups() {
        let registry = Registry::new();

        let setup: SetupFn = Arc::new(|registry: &Registry, config: &LoggerConfig| {
            let (_, formatter) = crate::appenders::resolve_binding(registry, config)?;
            Ok(Logger::wire(
                config.clone(),
                LogLevel::Fatal,
                formatter,
                Arc::new(crate::appenders::ConsoleSink::new()),
            ))
        });
        registry.add_appender(Appender::new("default", setup));

        let logger = registry.get_logger("svc");
        assert_eq!(logger.get_level(), LogLevel::Fatal);
    }

    #[test]
    fn test_reset_restores_builtins_and_clears_loggers() {
        let registry = Registry::new();
        registry.get_logger("svc");
        registry.add_formatter("custom", Arc::new(JsonFormatter::new()));

        registry.reset();

        assert!(registry.logger("svc").is_none());
        assert!(registry.formatter("custom").is_none());
        assert!(registry.formatter("text").is_some());
        assert!(registry.appender("default").is_some());
    }

    #[test]
    fn test_concurrent_get_logger_single_instance() {
        let registry = Arc::new(Registry::new());
        let mut handles = Vec::new();
        for _ in 0..8 {
            let registry = Arc::clone(&registry);
            handles.push(std::thread::spawn(move || registry.get_logger("shared")));
        }
        let loggers: Vec<Arc<Logger>> = handles
            .into_iter()
            .map(|h| h.join().expect("lookup thread panicked"))
            .collect();
        for logger in &loggers[1..] {
            assert!(Arc::ptr_eq(&loggers[0], logger));
        }
    }
}
