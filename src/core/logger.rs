//! Composite logger implementation

use super::{
    appender::Appender, error::Result, log_entry::LogEntry, log_level::LogLevel, registry,
};
use parking_lot::{Mutex, RwLock};
use std::any::Any;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

/// Extract a readable message from a caught panic payload
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

/// A named set of sinks sharing one level filter.
///
/// The sink set is fixed at construction. Each sink sits behind its own
/// mutex so concurrent callers never interleave writes to the same output.
pub struct Logger {
    name: Arc<str>,
    sinks: Vec<Mutex<Box<dyn Appender>>>,
    min_level: RwLock<LogLevel>,
    /// Entries at or above this level flush every sink right after writing
    flush_level: RwLock<Option<LogLevel>>,
}

impl Logger {
    pub fn new(name: impl Into<String>, sinks: Vec<Box<dyn Appender>>) -> Self {
        let name: String = name.into();
        Self {
            name: Arc::from(name),
            sinks: sinks.into_iter().map(Mutex::new).collect(),
            min_level: RwLock::new(LogLevel::Info),
            flush_level: RwLock::new(None),
        }
    }

    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use logger_manager::prelude::*;
    ///
    /// let logger = Logger::builder()
    ///     .name("main")
    ///     .min_level(LogLevel::Debug)
    ///     .flush_on(LogLevel::Info)
    ///     .appender(ConsoleAppender::new())
    ///     .build();
    /// assert_eq!(logger.sink_count(), 1);
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }

    /// Names reported by the attached sinks, in attachment order
    pub fn sink_names(&self) -> Vec<String> {
        self.sinks
            .iter()
            .map(|sink| sink.lock().name().to_string())
            .collect()
    }

    pub fn level(&self) -> LogLevel {
        *self.min_level.read()
    }

    pub fn set_level(&self, level: LogLevel) {
        *self.min_level.write() = level;
    }

    /// Flush all sinks after every entry at or above `level`
    pub fn flush_on(&self, level: LogLevel) {
        *self.flush_level.write() = Some(level);
    }

    pub fn flush_level(&self) -> Option<LogLevel> {
        *self.flush_level.read()
    }

    #[inline]
    pub fn should_log(&self, level: LogLevel) -> bool {
        level >= *self.min_level.read()
    }

    /// Format and dispatch a message if `level` passes the filter
    pub fn log(&self, level: LogLevel, args: fmt::Arguments<'_>) {
        if !self.should_log(level) {
            return;
        }
        match args.as_str() {
            Some(text) => self.dispatch(&LogEntry::new(level, text, Arc::clone(&self.name))),
            None => {
                let text = args.to_string();
                self.dispatch(&LogEntry::new(level, &text, Arc::clone(&self.name)));
            }
        }
    }

    /// Dispatch an already rendered message if `level` passes the filter
    pub fn log_message(&self, level: LogLevel, message: &str) {
        if !self.should_log(level) {
            return;
        }
        self.dispatch(&LogEntry::new(level, message, Arc::clone(&self.name)));
    }

    #[inline]
    pub fn trace(&self, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Trace, args);
    }

    #[inline]
    pub fn debug(&self, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Debug, args);
    }

    #[inline]
    pub fn info(&self, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Info, args);
    }

    #[inline]
    pub fn warn(&self, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Warn, args);
    }

    #[inline]
    pub fn error(&self, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Error, args);
    }

    #[inline]
    pub fn critical(&self, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Critical, args);
    }

    /// Write to every sink with per-sink panic isolation
    ///
    /// A sink that errors or panics is reported through the registry error
    /// handler and the remaining sinks still receive the entry.
    fn dispatch(&self, entry: &LogEntry) {
        for sink in &self.sinks {
            let mut sink = sink.lock();
            match catch_unwind(AssertUnwindSafe(|| sink.append(entry))) {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    registry::report_error(&format!(
                        "[{}] sink '{}' failed: {}",
                        self.name,
                        sink.name(),
                        e
                    ));
                }
                Err(payload) => {
                    registry::report_error(&format!(
                        "[{}] sink '{}' panicked: {}",
                        self.name,
                        sink.name(),
                        panic_message(payload.as_ref())
                    ));
                }
            }
        }

        if self.flush_level().is_some_and(|threshold| entry.level >= threshold) {
            let _ = self.flush();
        }
    }

    /// Flush every sink, reporting failures and returning the first one
    pub fn flush(&self) -> Result<()> {
        let mut first_error = None;

        for sink in &self.sinks {
            let mut sink = sink.lock();
            match catch_unwind(AssertUnwindSafe(|| sink.flush())) {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    registry::report_error(&format!(
                        "[{}] sink '{}' flush failed: {}",
                        self.name,
                        sink.name(),
                        e
                    ));
                    first_error.get_or_insert(e);
                }
                Err(payload) => {
                    registry::report_error(&format!(
                        "[{}] sink '{}' panicked during flush: {}",
                        self.name,
                        sink.name(),
                        panic_message(payload.as_ref())
                    ));
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("sinks", &self.sinks.len())
            .field("level", &self.level())
            .field("flush_level", &self.flush_level())
            .finish()
    }
}

/// Builder for constructing Logger with a fluent API
pub struct LoggerBuilder {
    name: String,
    min_level: LogLevel,
    flush_level: Option<LogLevel>,
    appenders: Vec<Box<dyn Appender>>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            name: "main".to_string(),
            min_level: LogLevel::Info,
            flush_level: None,
            appenders: Vec::new(),
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set minimum log level
    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Flush all sinks after every entry at or above `level`
    #[must_use = "builder methods return a new value"]
    pub fn flush_on(mut self, level: LogLevel) -> Self {
        self.flush_level = Some(level);
        self
    }

    /// Add an appender
    #[must_use = "builder methods return a new value"]
    pub fn appender<A: Appender + 'static>(mut self, appender: A) -> Self {
        self.appenders.push(Box::new(appender));
        self
    }

    /// Add an already boxed appender
    #[must_use = "builder methods return a new value"]
    pub fn boxed_appender(mut self, appender: Box<dyn Appender>) -> Self {
        self.appenders.push(appender);
        self
    }

    /// Build the Logger
    pub fn build(self) -> Logger {
        let logger = Logger::new(self.name, self.appenders);
        logger.set_level(self.min_level);
        if let Some(level) = self.flush_level {
            logger.flush_on(level);
        }
        logger
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::LoggerError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Clone, Default)]
    struct Recorder {
        lines: Arc<Mutex<Vec<String>>>,
        flushes: Arc<AtomicUsize>,
    }

    impl Appender for Recorder {
        fn append(&mut self, entry: &LogEntry) -> Result<()> {
            self.lines
                .lock()
                .push(format!("{} {} {}", entry.logger_name, entry.level, entry.message));
            Ok(())
        }

        fn flush(&mut self) -> Result<()> {
            self.flushes.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn name(&self) -> &str {
            "recorder"
        }
    }

    struct Failing;

    impl Appender for Failing {
        fn append(&mut self, _entry: &LogEntry) -> Result<()> {
            Err(LoggerError::writer("disk unplugged"))
        }

        fn flush(&mut self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    struct Panicking;

    impl Appender for Panicking {
        fn append(&mut self, _entry: &LogEntry) -> Result<()> {
            panic!("sink exploded");
        }

        fn flush(&mut self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "panicking"
        }
    }

    #[test]
    fn test_builder_defaults() {
        let logger = LoggerBuilder::default().build();
        assert_eq!(logger.name(), "main");
        assert_eq!(logger.level(), LogLevel::Info);
        assert_eq!(logger.flush_level(), None);
        assert_eq!(logger.sink_count(), 0);
    }

    #[test]
    fn test_level_gate_is_central() {
        let recorder = Recorder::default();
        let logger = Logger::builder()
            .name("gate")
            .min_level(LogLevel::Warn)
            .appender(recorder.clone())
            .build();

        logger.debug(format_args!("hidden {}", 1));
        logger.warn(format_args!("shown {}", 2));
        logger.critical(format_args!("shown {}", 3));

        let lines = recorder.lines.lock();
        assert_eq!(*lines, vec!["gate WARN shown 2", "gate CRITICAL shown 3"]);
    }

    #[test]
    fn test_set_level_in_place() {
        let recorder = Recorder::default();
        let logger = Logger::builder().appender(recorder.clone()).build();

        logger.log_message(LogLevel::Debug, "before");
        logger.set_level(LogLevel::Trace);
        logger.log_message(LogLevel::Debug, "after");

        assert_eq!(*recorder.lines.lock(), vec!["main DEBUG after"]);
    }

    #[test]
    fn test_flush_on_threshold() {
        let recorder = Recorder::default();
        let logger = Logger::builder()
            .min_level(LogLevel::Trace)
            .flush_on(LogLevel::Info)
            .appender(recorder.clone())
            .build();

        logger.debug(format_args!("buffered"));
        assert_eq!(recorder.flushes.load(Ordering::SeqCst), 0);

        logger.info(format_args!("flushed"));
        logger.error(format_args!("flushed too"));
        assert_eq!(recorder.flushes.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_failing_sinks_do_not_block_others() {
        let recorder = Recorder::default();
        let logger = Logger::builder()
            .name("isolation")
            .appender(Failing)
            .appender(Panicking)
            .appender(recorder.clone())
            .build();

        logger.error(format_args!("still delivered"));

        assert_eq!(*recorder.lines.lock(), vec!["isolation ERROR still delivered"]);
        assert_eq!(logger.sink_names(), vec!["failing", "panicking", "recorder"]);
    }

    #[test]
    fn test_panic_message_extraction() {
        let payload: Box<dyn Any + Send> = Box::new("static str");
        assert_eq!(panic_message(payload.as_ref()), "static str");

        let payload: Box<dyn Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_message(payload.as_ref()), "owned");

        let payload: Box<dyn Any + Send> = Box::new(42_u8);
        assert_eq!(panic_message(payload.as_ref()), "Unknown panic");
    }
}
