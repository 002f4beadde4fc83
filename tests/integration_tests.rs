//! Integration tests for the logging façade
//!
//! These tests verify:
//! - Idempotent initialization
//! - Level gating across sinks
//! - Console fallback when the log directory cannot be created
//! - Shutdown semantics
//! - End-to-end file and console output
//! - Exception and context tagging in persisted lines

mod common;

use common::{capturing_service, read_log_files};
use logger_manager::prelude::*;
use logger_manager::{error, info, FALLBACK_LOGGER_NAME, MAIN_LOGGER_NAME};
use std::fs;
use std::io;
use std::sync::Arc;
use tempfile::TempDir;

#[test]
fn test_second_initialize_keeps_first_configuration() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let first_dir = temp_dir.path().join("first");
    let second_dir = temp_dir.path().join("second");
    let (service, factory) = capturing_service();

    assert!(service.initialize(&first_dir, LogLevel::Info, true));
    let logger = service.logger().expect("logger after initialize");

    assert!(service.initialize(&second_dir, LogLevel::Trace, false));

    let still = service.logger().expect("logger still present");
    assert!(Arc::ptr_eq(&logger, &still));
    assert_eq!(service.level(), Some(LogLevel::Info));
    assert_eq!(still.sink_count(), 2);
    assert!(!second_dir.exists());
    assert_eq!(factory.file_sinks_built(), 1);
    assert!(factory
        .console
        .contents()
        .contains("[WARN] [main] Logger system already initialized"));
}

#[test]
fn test_level_gating_reaches_no_sink_below_threshold() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (service, factory) = capturing_service();

    assert!(service.initialize(temp_dir.path(), LogLevel::Warn, false));

    service.debug(format_args!("debug is filtered"));
    service.info(format_args!("info is filtered"));
    service.warn(format_args!("warn passes"));
    service.critical(format_args!("critical passes"));
    service.flush();

    let content = read_log_files(temp_dir.path());
    assert!(!content.contains("debug is filtered"));
    assert!(!content.contains("info is filtered"));
    assert!(content.contains("[WARN] [main] warn passes"));
    assert!(content.contains("[CRITICAL] [main] critical passes"));
    assert!(factory.console.contents().is_empty());
}

#[test]
fn test_uncreatable_directory_falls_back_to_console() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let blocker = temp_dir.path().join("occupied");
    fs::write(&blocker, b"not a directory").expect("Failed to create blocker file");
    let (service, factory) = capturing_service();

    assert!(!service.initialize(&blocker, LogLevel::Info, true));
    assert!(service.is_initialized());
    assert!(service.is_fallback());
    assert_eq!(factory.file_sinks_built(), 0);

    let logger = service.logger().expect("fallback logger");
    assert_eq!(logger.name(), FALLBACK_LOGGER_NAME);
    assert_eq!(logger.sink_count(), 1);

    error!(service, "visible on the console: {}", 1);

    let console = factory.console.contents();
    assert!(console.contains("[ERROR] [fallback] Using fallback console logger"));
    assert!(console.contains("[ERROR] [fallback] visible on the console: 1"));
}

#[test]
fn test_fallback_honors_requested_level() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let blocker = temp_dir.path().join("occupied");
    fs::write(&blocker, b"x").expect("Failed to create blocker file");
    let (service, factory) = capturing_service();

    assert!(!service.initialize(&blocker, LogLevel::Error, true));
    service.warn(format_args!("below fallback level"));
    service.critical(format_args!("above fallback level"));

    let console = factory.console.contents();
    assert!(!console.contains("below fallback level"));
    assert!(console.contains("above fallback level"));
}

#[test]
fn test_shutdown_disables_logging_and_is_idempotent() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (service, factory) = capturing_service();

    assert!(service.initialize(temp_dir.path(), LogLevel::Info, true));
    service.shutdown();

    assert!(!service.is_initialized());
    assert!(service.logger().is_none());

    service.info(format_args!("after shutdown"));
    service.error_with_context("ctx", format_args!("after shutdown"));
    service.log_exception("boom", "Worker", "run", format_args!("after shutdown"));
    service.flush();
    service.shutdown();

    let console = factory.console.contents();
    assert!(!console.contains("after shutdown"));
    assert_eq!(console.matches("Shutting down logger system").count(), 1);

    let content = read_log_files(temp_dir.path());
    assert!(content.contains("[INFO] [main] Shutting down logger system"));
    assert!(!content.contains("after shutdown"));
}

#[test]
fn test_reinitialize_after_shutdown_builds_fresh_logger() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (service, factory) = capturing_service();

    assert!(service.initialize(temp_dir.path(), LogLevel::Info, false));
    let first = service.logger().expect("first logger");
    service.shutdown();

    assert!(service.initialize(temp_dir.path(), LogLevel::Debug, false));
    let second = service.logger().expect("second logger");

    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(service.level(), Some(LogLevel::Debug));
    assert_eq!(factory.file_sinks_built(), 2);
}

#[test]
fn test_end_to_end_file_and_console() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_dir = temp_dir.path().join("t_logs");
    let (service, factory) = capturing_service();

    assert!(service.initialize(&log_dir, LogLevel::Info, true));
    info!(service, "hello {}", 42);
    service.flush();

    let content = read_log_files(&log_dir);
    let line = content
        .lines()
        .find(|l| l.ends_with("hello 42"))
        .expect("hello line persisted");
    assert!(line.starts_with('['));
    assert!(line.contains("] [thread "));
    assert!(line.contains("] [INFO] [main] hello 42"));

    let console = factory.console.contents();
    let console_line = console
        .lines()
        .find(|l| l.ends_with("hello 42"))
        .expect("hello line on console");
    assert!(console_line.contains("] [INFO] [main] hello 42"));
    assert!(!console_line.contains("thread"));
}

#[test]
fn test_initialization_messages_are_persisted() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (service, _factory) = capturing_service();

    assert!(service.initialize(temp_dir.path(), LogLevel::Info, false));
    service.flush();

    let content = read_log_files(temp_dir.path());
    assert!(content.contains("Logger system initialized successfully"));
    assert!(content.contains(&format!(
        "Log level: INFO, Log directory: {}",
        temp_dir.path().display()
    )));
}

#[test]
fn test_exception_line_is_persisted_at_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (service, _factory) = capturing_service();

    assert!(service.initialize(temp_dir.path(), LogLevel::Info, false));
    let failure = io::Error::new(io::ErrorKind::Other, "boom");
    service.log_exception(&failure, "Worker", "run", format_args!("processing item {}", 7));
    service.flush();

    let content = read_log_files(temp_dir.path());
    let line = content
        .lines()
        .find(|l| l.contains("Exception: boom"))
        .expect("exception line persisted");
    assert!(line.contains("[ERROR] [main] [Worker::run] processing item 7 - Exception: boom"));
}

#[test]
fn test_contextual_variants_prefix_messages() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (service, factory) = capturing_service();

    assert!(service.initialize(temp_dir.path(), LogLevel::Trace, true));
    service.trace_with_context("parse", format_args!("token {}", "a"));
    service.info_with_context("parse", format_args!("done"));
    service.critical_with_context("parse", format_args!("{}%", 100));

    let console = factory.console.contents();
    assert!(console.contains("[TRACE] [main] [parse] token a"));
    assert!(console.contains("[INFO] [main] [parse] done"));
    assert!(console.contains("[CRITICAL] [main] [parse] 100%"));
}

#[test]
fn test_set_level_changes_filter_in_place() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (service, factory) = capturing_service();

    assert!(service.initialize(temp_dir.path(), LogLevel::Info, true));
    let logger = service.logger().expect("logger");

    service.debug(format_args!("first debug"));
    service.set_level(LogLevel::Debug);
    service.debug(format_args!("second debug"));

    assert!(Arc::ptr_eq(&logger, &service.logger().expect("same logger")));
    assert!(service.should_log(LogLevel::Debug));
    assert!(!service.should_log(LogLevel::Trace));

    let console = factory.console.contents();
    assert!(!console.contains("first debug"));
    assert!(console.contains("second debug"));
    assert!(console.contains("Log level changed to: DEBUG"));
}

#[test]
fn test_initialize_with_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (service, _factory) = capturing_service();
    let config = LoggerConfig::new(temp_dir.path(), LogLevel::Debug, false)
        .with_file_name("service.txt")
        .with_rotation_time(0, 0)
        .with_max_files(3)
        .with_flush_level(LogLevel::Debug);

    assert!(service.initialize_with(&config));
    service.debug(format_args!("flushed immediately"));

    let logger = service.logger().expect("logger");
    assert_eq!(logger.name(), MAIN_LOGGER_NAME);
    assert_eq!(logger.flush_level(), Some(LogLevel::Debug));

    let written: String = fs::read_dir(temp_dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| {
            let name = e.file_name();
            let name = name.to_str().unwrap();
            name.starts_with("service_") && name.ends_with(".txt")
        })
        .map(|e| fs::read_to_string(e.path()).unwrap())
        .collect();
    assert!(written.contains("flushed immediately"));
}
