//! Core logger types and traits

pub mod appender;
pub mod error;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod pattern;
pub mod registry;

pub use appender::Appender;
pub use error::{LoggerError, Result};
pub use log_entry::LogEntry;
pub use log_level::LogLevel;
pub use logger::{Logger, LoggerBuilder};
pub use pattern::{Pattern, RenderedLine, CONSOLE_PATTERN, FILE_PATTERN};
pub use registry::ErrorHandler;
