//! # Logger Manager
//!
//! A process-wide logging façade: one service that initializes a daily
//! rotating file logger (optionally mirrored to a colorized console), routes
//! leveled messages to it from any thread, and shuts it down cleanly.
//!
//! ## Features
//!
//! - **Graceful degradation**: falls back to a console-only logger when the
//!   log directory or file sink cannot be created
//! - **Context tagging**: `[function]` and `[Type::function]` prefixes captured
//!   at the call site
//! - **Thread safe**: initialization, shutdown and level changes are
//!   serialized; dispatch never waits on that serialization, only on a
//!   short read lock of the live logger handle
//! - **Never fails the caller**: logging before `initialize` or after
//!   `shutdown` is a silent no-op
//!
//! ```no_run
//! use logger_manager::prelude::*;
//! use logger_manager::{info, info_ctx};
//!
//! let service = LoggingService::global();
//! service.initialize("logs", LogLevel::Info, true);
//! info!(service, "hello {}", 42);
//! info_ctx!(service, "tagged with the enclosing function");
//! service.shutdown();
//! ```

pub mod appenders;
pub mod core;
pub mod location;
pub mod macros;
pub mod manager;

#[cfg(test)]
pub(crate) mod test_support;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, DailyFileAppender, DailyRotation};
    pub use crate::core::{
        Appender, LogEntry, LogLevel, Logger, LoggerBuilder, LoggerError, Pattern, Result,
    };
    pub use crate::manager::{LoggerConfig, LoggingService, SinkFactory};
}

pub use appenders::{ConsoleAppender, DailyFileAppender, DailyRotation};
pub use core::{
    registry, Appender, ErrorHandler, LogEntry, LogLevel, Logger, LoggerBuilder, LoggerError,
    Pattern, RenderedLine, Result, CONSOLE_PATTERN, FILE_PATTERN,
};
pub use manager::{
    DefaultSinkFactory, InitMode, LoggerConfig, LoggingService, SinkFactory,
    FALLBACK_LOGGER_NAME, MAIN_LOGGER_NAME,
};
