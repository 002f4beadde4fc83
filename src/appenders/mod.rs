//! Appender implementations

pub mod console;
pub mod daily_file;

pub use console::ConsoleAppender;
pub use daily_file::{dated_file_name, DailyFileAppender, DailyRotation};

pub use crate::core::Appender;
