//! Log entry structure

use super::log_level::LogLevel;
use chrono::{DateTime, Local};
use std::cell::Cell;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_THREAD_NUMBER: AtomicU64 = AtomicU64::new(1);

// Thread-local cache so each thread draws its number once
thread_local! {
    static THREAD_NUMBER: Cell<u64> = const { Cell::new(0) };
}

/// Small, stable per-thread number rendered by the `%t` pattern flag.
///
/// Numbers are handed out in the order threads first log, starting at 1.
pub fn current_thread_number() -> u64 {
    THREAD_NUMBER.with(|cell| {
        let cached = cell.get();
        if cached != 0 {
            return cached;
        }
        let assigned = NEXT_THREAD_NUMBER.fetch_add(1, Ordering::Relaxed);
        cell.set(assigned);
        assigned
    })
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    pub timestamp: DateTime<Local>,
    pub thread_number: u64,
    pub logger_name: Arc<str>,
}

impl LogEntry {
    /// Sanitize log message to prevent log injection attacks
    ///
    /// Replaces newlines, carriage returns, and tabs with escape sequences
    /// so one call always produces one line.
    fn sanitize_message(message: &str) -> String {
        if !message.contains(['\n', '\r', '\t']) {
            return message.to_string();
        }
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    pub fn new(level: LogLevel, message: &str, logger_name: Arc<str>) -> Self {
        Self {
            level,
            message: Self::sanitize_message(message),
            timestamp: Local::now(),
            thread_number: current_thread_number(),
            logger_name,
        }
    }

    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<Local>) -> Self {
        self.timestamp = timestamp;
        self
    }
}
