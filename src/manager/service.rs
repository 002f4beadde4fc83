//! The logging façade
//!
//! [`LoggingService`] owns at most one composite [`Logger`] and exposes the
//! three halves of its life: initialization (with console fallback), level
//! gated dispatch, and shutdown. Dispatch never fails the caller: before
//! `initialize` and after `shutdown` every logging call is a silent no-op.
//!
//! # Example
//!
//! ```no_run
//! use logger_manager::prelude::*;
//!
//! let service = LoggingService::new();
//! if !service.initialize("logs", LogLevel::Info, true) {
//!     // Still logging, but only to the console
//! }
//! service.info(format_args!("listening on port {}", 8080));
//! service.shutdown();
//! ```

use super::config::LoggerConfig;
use super::factory::{DefaultSinkFactory, SinkFactory};
use crate::core::{registry, LogLevel, Logger, LoggerError, Result};
use parking_lot::{Mutex, RwLock};
use std::fmt;
use std::fs;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

/// Registry name of the file + console logger
pub const MAIN_LOGGER_NAME: &str = "main";

/// Registry name of the console-only logger used after a failed initialization
pub const FALLBACK_LOGGER_NAME: &str = "fallback";

/// Which initialization path produced the live logger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitMode {
    Preferred,
    Fallback,
}

#[derive(Default)]
struct TransitionState {
    mode: Option<InitMode>,
}

pub struct LoggingService {
    /// Serializes initialize / shutdown / set_level
    transition: Mutex<TransitionState>,
    logger: RwLock<Option<Arc<Logger>>>,
    initialized: AtomicBool,
    factory: Box<dyn SinkFactory>,
}

impl LoggingService {
    #[must_use]
    pub fn new() -> Self {
        Self::with_factory(DefaultSinkFactory)
    }

    /// Create a service that builds its sinks with `factory`
    #[must_use]
    pub fn with_factory<F: SinkFactory + 'static>(factory: F) -> Self {
        Self {
            transition: Mutex::new(TransitionState::default()),
            logger: RwLock::new(None),
            initialized: AtomicBool::new(false),
            factory: Box::new(factory),
        }
    }

    /// The process-wide instance, created on first access.
    ///
    /// It lives until process exit, so its `Drop` never runs; call
    /// [`shutdown`](Self::shutdown) before exiting to flush deterministically.
    pub fn global() -> &'static LoggingService {
        static GLOBAL: OnceLock<LoggingService> = OnceLock::new();
        GLOBAL.get_or_init(LoggingService::new)
    }

    /// Build the file (+ console) logger, falling back to console only.
    ///
    /// Returns `true` when the preferred configuration is live. Returns
    /// `false` when only the fallback logger could be built (logging still
    /// works) or when nothing could be built (the service stays
    /// uninitialized). Calling again while initialized changes nothing,
    /// emits a warning and reports the outcome of the live initialization.
    pub fn initialize(&self, log_dir: impl AsRef<Path>, level: LogLevel, enable_console: bool) -> bool {
        self.initialize_with(&LoggerConfig::new(log_dir, level, enable_console))
    }

    /// [`initialize`](Self::initialize) with every knob taken from `config`
    pub fn initialize_with(&self, config: &LoggerConfig) -> bool {
        let mut state = self.transition.lock();

        if let Some(mode) = state.mode {
            self.warn(format_args!("Logger system already initialized"));
            return mode == InitMode::Preferred;
        }

        match self.build_preferred(config) {
            Ok(logger) => {
                self.install(logger);
                state.mode = Some(InitMode::Preferred);

                self.info(format_args!("Logger system initialized successfully"));
                self.info(format_args!(
                    "Log level: {}, Log directory: {}",
                    config.level,
                    config.log_dir.display()
                ));
                true
            }
            Err(e) => {
                eprintln!("Failed to initialize logger: {}", e);

                match self.build_fallback(config) {
                    Ok(logger) => {
                        self.install(logger);
                        state.mode = Some(InitMode::Fallback);

                        self.error(format_args!(
                            "Using fallback console logger due to initialization failure: {}",
                            e
                        ));
                    }
                    Err(fallback_err) => {
                        eprintln!("Critical: Failed to create fallback logger: {}", fallback_err);
                    }
                }
                false
            }
        }
    }

    fn build_preferred(&self, config: &LoggerConfig) -> Result<Arc<Logger>> {
        config.validate()?;

        fs::create_dir_all(&config.log_dir).map_err(|e| {
            LoggerError::io_operation(
                "create log directory",
                format!("Failed to create directory '{}'", config.log_dir.display()),
                e,
            )
        })?;

        let mut builder = Logger::builder()
            .name(MAIN_LOGGER_NAME)
            .boxed_appender(self.factory.file_sink(config)?);

        if config.enable_console {
            builder = builder.boxed_appender(self.factory.console_sink(config.console_colors)?);
        }

        let logger = Arc::new(
            builder
                .min_level(config.level)
                .flush_on(config.flush_level)
                .build(),
        );

        registry::register(Arc::clone(&logger));
        registry::set_error_handler(registry::stderr_handler());
        Ok(logger)
    }

    fn build_fallback(&self, config: &LoggerConfig) -> Result<Arc<Logger>> {
        let logger = Arc::new(
            Logger::builder()
                .name(FALLBACK_LOGGER_NAME)
                .boxed_appender(self.factory.console_sink(config.console_colors)?)
                .min_level(config.level)
                .flush_on(config.flush_level)
                .build(),
        );

        registry::register(Arc::clone(&logger));
        Ok(logger)
    }

    fn install(&self, logger: Arc<Logger>) {
        *self.logger.write() = Some(logger);
        self.initialized.store(true, Ordering::Release);
    }

    /// Flush, unregister and release the logger. No-op when not initialized.
    pub fn shutdown(&self) {
        let mut state = self.transition.lock();
        if state.mode.is_none() {
            return;
        }

        self.info(format_args!("Shutting down logger system"));

        let logger = self.logger.write().take();
        if let Some(logger) = logger {
            let _ = logger.flush();
            registry::unregister(&logger);
        }

        state.mode = None;
        self.initialized.store(false, Ordering::Release);
    }

    /// Change the minimum level of the live logger in place
    pub fn set_level(&self, level: LogLevel) {
        let _state = self.transition.lock();
        if let Some(logger) = self.current() {
            logger.set_level(level);
            logger.info(format_args!("Log level changed to: {}", level));
        }
    }

    /// Write out everything buffered in every sink
    pub fn flush(&self) {
        if let Some(logger) = self.current() {
            // Failures were already routed to the registry error handler
            let _ = logger.flush();
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    /// Whether the live logger is the console-only fallback
    pub fn is_fallback(&self) -> bool {
        self.transition.lock().mode == Some(InitMode::Fallback)
    }

    /// Handle to the live logger.
    ///
    /// Do not keep it past the next [`shutdown`](Self::shutdown): the service
    /// no longer manages it after that.
    pub fn logger(&self) -> Option<Arc<Logger>> {
        self.current()
    }

    /// Minimum level of the live logger
    pub fn level(&self) -> Option<LogLevel> {
        self.current().map(|logger| logger.level())
    }

    /// Whether a message at `level` would currently reach the sinks
    pub fn should_log(&self, level: LogLevel) -> bool {
        self.logger
            .read()
            .as_ref()
            .is_some_and(|logger| logger.should_log(level))
    }

    #[inline]
    fn current(&self) -> Option<Arc<Logger>> {
        self.logger.read().clone()
    }

    pub fn log(&self, level: LogLevel, args: fmt::Arguments<'_>) {
        if let Some(logger) = self.current() {
            logger.log(level, args);
        }
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

    /// Log `[context] message`, formatting only when `level` is enabled
    pub fn log_with_context(&self, level: LogLevel, context: &str, args: fmt::Arguments<'_>) {
        let Some(logger) = self.current() else {
            return;
        };
        if !logger.should_log(level) {
            return;
        }
        logger.log_message(level, &format!("[{}] {}", context, args));
    }

    #[inline]
    pub fn trace_with_context(&self, context: &str, args: fmt::Arguments<'_>) {
        self.log_with_context(LogLevel::Trace, context, args);
    }

    #[inline]
    pub fn debug_with_context(&self, context: &str, args: fmt::Arguments<'_>) {
        self.log_with_context(LogLevel::Debug, context, args);
    }

    #[inline]
    pub fn info_with_context(&self, context: &str, args: fmt::Arguments<'_>) {
        self.log_with_context(LogLevel::Info, context, args);
    }

    #[inline]
    pub fn warn_with_context(&self, context: &str, args: fmt::Arguments<'_>) {
        self.log_with_context(LogLevel::Warn, context, args);
    }

    #[inline]
    pub fn error_with_context(&self, context: &str, args: fmt::Arguments<'_>) {
        self.log_with_context(LogLevel::Error, context, args);
    }

    #[inline]
    pub fn critical_with_context(&self, context: &str, args: fmt::Arguments<'_>) {
        self.log_with_context(LogLevel::Critical, context, args);
    }

    /// Log a caught failure at error level as
    /// `[component::context] message - Exception: <error>`.
    ///
    /// A panic while rendering `error` yields an empty description. The
    /// process panic hook still runs, so the default hook reports it on stderr.
    pub fn log_exception<E>(&self, error: &E, component: &str, context: &str, args: fmt::Arguments<'_>)
    where
        E: fmt::Display + ?Sized,
    {
        let Some(logger) = self.current() else {
            return;
        };
        if !logger.should_log(LogLevel::Error) {
            return;
        }

        let description = describe(error);
        logger.log_message(
            LogLevel::Error,
            &format!("[{}::{}] {} - Exception: {}", component, context, args, description),
        );
    }
}

fn describe<E: fmt::Display + ?Sized>(error: &E) -> String {
    catch_unwind(AssertUnwindSafe(|| error.to_string())).unwrap_or_default()
}

impl Default for LoggingService {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LoggingService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggingService")
            .field("initialized", &self.is_initialized())
            .field("logger", &self.current())
            .finish()
    }
}

impl Drop for LoggingService {
    fn drop(&mut self) {
        self.shutdown();
    }
}
