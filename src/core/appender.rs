//! Appender trait for log output destinations

use super::{error::Result, log_entry::LogEntry};

/// A single output destination (a "sink").
///
/// Appenders render and write every entry they receive; level filtering has
/// already happened in [`Logger`](super::Logger) by the time `append` runs.
pub trait Appender: Send {
    fn append(&mut self, entry: &LogEntry) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}
