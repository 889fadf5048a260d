//! End-to-end tests through the public registry surface.

use logistry::{
    Appender, Fields, Format, LogLevel, LogRecord, Logger, LoggerConfig, LoggerError, Registry,
    Result, SetupFn, Sink,
};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tempfile::tempdir;

/// Shared in-memory sink, registered through the public appender path.
struct CaptureSink {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl Sink for CaptureSink {
    fn write(&self, bytes: &[u8]) -> Result<()> {
        self.buffer.lock().extend_from_slice(bytes);
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "capture"
    }
}

/// Register a `capture` appender on the given registry and return the buffer
/// its loggers write into.
fn register_capture_appender(registry: &Registry) -> Arc<Mutex<Vec<u8>>> {
    let buffer = Arc::new(Mutex::new(Vec::new()));
    let sink_buffer = Arc::clone(&buffer);

    let setup: SetupFn = Arc::new(move |registry: &Registry, config: &LoggerConfig| {
        let (level, formatter) = logistry::appenders::resolve_binding(registry, config)?;
        let sink = Arc::new(CaptureSink {
            buffer: Arc::clone(&sink_buffer),
        });
        Ok(Logger::wire(config.clone(), level, formatter, sink))
    });
    registry.add_appender(Appender::new("capture", setup));

    buffer
}

fn captured(buffer: &Arc<Mutex<Vec<u8>>>) -> String {
    String::from_utf8(buffer.lock().clone()).expect("utf8 output")
}

#[test]
fn simple_formatter_end_to_end() {
    let registry = Registry::new();
    let buffer = register_capture_appender(&registry);

    registry
        .configure(vec![LoggerConfig::new("svc")
            .with_appender("capture")
            .with_formatter("simple")
            .with_level("info")])
        .expect("configure");

    let logger = registry.get_logger("svc");
    logger.info_sync(Fields::new().with_field("user", "a"), &["started"]);

    let output = captured(&buffer);
    // [<rfc3339>] [INFO] started user=a\n
    assert!(output.starts_with('['), "unexpected shape: {output:?}");
    assert!(output.contains("] [INFO] started user=a"));
    assert!(output.ends_with('\n'));
    assert_eq!(output.matches('\n').count(), 1);
}

#[test]
fn threshold_filters_below_configured_level() {
    let registry = Registry::new();
    let buffer = register_capture_appender(&registry);

    registry
        .configure(vec![LoggerConfig::new("svc")
            .with_appender("capture")
            .with_formatter("simple")
            .with_level("warn")])
        .expect("configure");

    let logger = registry.get_logger("svc");
    logger.debug_sync(Fields::new(), &["dropped"]);
    assert!(captured(&buffer).is_empty());

    logger.warn_sync(Fields::new(), &["kept"]);
    assert!(captured(&buffer).contains("[WARN] kept"));
}

#[test]
fn unknown_severity_name_emits_as_debug() {
    let registry = Registry::new();
    let buffer = register_capture_appender(&registry);

    registry
        .configure(vec![LoggerConfig::new("svc")
            .with_appender("capture")
            .with_formatter("simple")
            .with_level("debug")])
        .expect("configure");

    let logger = registry.get_logger("svc");
    logger.call_sync("verbose", Fields::new(), &["lenient"]);
    assert!(captured(&buffer).contains("[DEBUG] lenient"));
}

#[test]
fn async_emission_reaches_sink() {
    let registry = Registry::new();
    let buffer = register_capture_appender(&registry);

    registry
        .configure(vec![LoggerConfig::new("svc")
            .with_appender("capture")
            .with_formatter("simple")])
        .expect("configure");

    let logger = registry.get_logger("svc");
    logger.info(Fields::new(), &["fire and forget"]);

    for _ in 0..100 {
        if captured(&buffer).contains("fire and forget") {
            return;
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    panic!("async emission never reached the sink");
}

#[test]
fn lazy_lookup_is_idempotent_until_reconfigured() {
    let registry = Registry::new();

    let first = registry.get_logger("lazy");
    let second = registry.get_logger("lazy");
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.config().appender, "default");
    assert_eq!(first.get_level(), LogLevel::Info);

    registry
        .configure(vec![LoggerConfig::new("lazy").with_level("error")])
        .expect("configure");
    let third = registry.get_logger("lazy");
    assert!(!Arc::ptr_eq(&first, &third));
    assert_eq!(third.get_level(), LogLevel::Error);
}

#[test]
fn configuration_errors_are_fatal_for_the_batch() {
    let registry = Registry::new();

    let err = registry
        .configure(vec![
            LoggerConfig::new("ok"),
            LoggerConfig::new("broken").with_level("loud"),
        ])
        .unwrap_err();
    assert!(matches!(err, LoggerError::UnknownLevel { .. }));

    let err = registry
        .configure(vec![LoggerConfig::new("broken").with_formatter("nope")])
        .unwrap_err();
    assert!(matches!(err, LoggerError::UnknownFormatter { .. }));

    // Unknown appender is lenient, not fatal.
    registry
        .configure(vec![LoggerConfig::new("fallback").with_appender("mystery")])
        .expect("unknown appender falls back to default");
}

#[test]
fn custom_formatter_used_by_subsequent_setups() {
    struct TagFormatter;

    impl Format for TagFormatter {
        fn render(&self, record: &LogRecord) -> Result<Vec<u8>> {
            Ok(format!("<{}> {}\n", record.level.to_str(), record.message).into_bytes())
        }

        fn name(&self) -> &str {
            "tag"
        }
    }

    let registry = Registry::new();
    let buffer = register_capture_appender(&registry);
    registry.add_formatter("tag", Arc::new(TagFormatter));

    registry
        .configure(vec![LoggerConfig::new("svc")
            .with_appender("capture")
            .with_formatter("tag")])
        .expect("configure");

    registry
        .get_logger("svc")
        .info_sync(Fields::new(), &["custom render"]);
    assert_eq!(captured(&buffer), "<INFO> custom render\n");
}

#[test]
fn caller_annotation_names_this_file() {
    let registry = Registry::new();
    let buffer = register_capture_appender(&registry);

    registry
        .configure(vec![LoggerConfig::new("svc")
            .with_appender("capture")
            .with_formatter("simple")
            .with_caller_info(true)])
        .expect("configure");

    let logger = registry.get_logger("svc");
    logger.info_sync(Fields::new(), &["where am I"]);

    let output = captured(&buffer);
    assert!(
        output.contains("integration_tests.rs:"),
        "caller annotation missing in {output:?}"
    );
}

#[test]
fn size_rotation_retains_configured_backups() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("svc.log");

    let registry = Registry::new();
    registry
        .configure(vec![LoggerConfig::new("svc")
            .with_appender("size")
            .with_formatter("simple")
            .with_path(&path)
            .with_rotation_size(200)
            .with_max_rotated(2)])
        .expect("configure");

    // Each rendered line is well over 50 bytes against a 200-byte threshold,
    // so 80 entries rotate far more than twice and saturate retention.
    let logger = registry.get_logger("svc");
    for i in 0..80 {
        logger.infof_sync(Fields::new(), format_args!("filler entry number {}", i));
    }
    logger.flush().expect("flush");

    assert!(path.exists());
    assert!(path.with_file_name("svc.log.1").exists());
    assert!(path.with_file_name("svc.log.2").exists());
    assert!(!path.with_file_name("svc.log.3").exists());

    let log_files = std::fs::read_dir(dir.path())
        .expect("read log dir")
        .filter_map(|e| e.ok())
        .filter(|e| {
            e.file_name()
                .to_str()
                .map(|n| n.starts_with("svc.log"))
                .unwrap_or(false)
        })
        .count();
    // Active file plus exactly the configured two backups.
    assert_eq!(log_files, 3);
}

#[test]
fn level_and_formatter_mutate_under_live_traffic() {
    let registry = Registry::new();
    let buffer = register_capture_appender(&registry);

    registry
        .configure(vec![LoggerConfig::new("svc")
            .with_appender("capture")
            .with_formatter("simple")])
        .expect("configure");
    let logger = registry.get_logger("svc");

    let mut handles = Vec::new();
    for t in 0..4 {
        let logger = Arc::clone(&logger);
        handles.push(std::thread::spawn(move || {
            for i in 0..200 {
                match (t + i) % 4 {
                    0 => logger.set_level(LogLevel::Debug),
                    1 => logger.set_level(LogLevel::Info),
                    2 => logger.set_formatter(Arc::new(logistry::JsonFormatter::new())),
                    _ => logger.info_sync(Fields::new(), &["under contention"]),
                }
                let observed = logger.get_level();
                assert!(observed == LogLevel::Debug || observed == LogLevel::Info);
            }
        }));
    }
    for handle in handles {
        handle.join().expect("mutator thread panicked");
    }

    // Every line that made it through is fully rendered under one formatter
    // or the other, never torn.
    for line in captured(&buffer).lines() {
        let simple_shape = line.contains("[INFO] under contention");
        let json_shape = serde_json::from_str::<serde_json::Value>(line)
            .map(|v| v["msg"] == "under contention")
            .unwrap_or(false);
        assert!(simple_shape || json_shape, "torn line: {line:?}");
    }
}

#[test]
fn queued_dispatch_delivers_everything() {
    let registry = Registry::new();
    let buffer = register_capture_appender(&registry);

    registry
        .configure(vec![LoggerConfig::new("svc")
            .with_appender("capture")
            .with_formatter("simple")
            .with_queue_capacity(4)])
        .expect("configure");

    {
        let logger = registry.get_logger("svc");
        for i in 0..40 {
            logger.infof(Fields::new(), format_args!("queued {}", i));
        }
    }
    registry.reset();

    // The worker drains when the logger drops with the registry entry.
    for _ in 0..200 {
        if captured(&buffer).lines().count() == 40 {
            break;
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    assert_eq!(captured(&buffer).lines().count(), 40);
}

#[test]
fn best_effort_write_path() {
    use std::io::Write;

    let registry = Registry::new();
    let buffer = register_capture_appender(&registry);

    registry
        .configure(vec![LoggerConfig::new("svc").with_appender("capture")])
        .expect("configure");
    let logger = registry.get_logger("svc");

    assert_eq!(logger.write_bytes(b"raw"), 0);
    let mut writer = logger.writer();
    assert_eq!(writer.write(b"bytes").expect("never errors"), 5);
    writer.flush().expect("never errors");

    for _ in 0..100 {
        let output = captured(&buffer);
        if output.contains("raw") && output.contains("bytes") {
            return;
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    panic!("raw writes never reached the sink");
}

#[test]
fn reset_restores_builtins() {
    let registry = Registry::new();
    register_capture_appender(&registry);
    registry.get_logger("svc");

    registry.reset();

    assert!(registry.logger("svc").is_none());
    assert!(registry.appender("capture").is_none());
    assert!(registry.appender("default").is_some());
    assert!(registry.formatter("json").is_some());
}

#[test]
fn global_free_functions_share_one_registry() {
    // Names are namespaced to this test; the global registry is shared
    // across the whole test binary.
    logistry::configure(vec![LoggerConfig::new("global-free-fn-svc").with_level("warn")])
        .expect("configure");

    let logger = logistry::get_logger("global-free-fn-svc");
    assert_eq!(logger.get_level(), LogLevel::Warn);
    assert!(Arc::ptr_eq(
        &logger,
        &logistry::registry::global().get_logger("global-free-fn-svc")
    ));
}
