//! Initialization parameters for [`LoggingService`](super::LoggingService)

use crate::appenders::DailyRotation;
use crate::core::{LogLevel, LoggerError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Everything `initialize` needs to build the preferred backend.
///
/// All fields have defaults, so a config fragment only needs to name what it
/// changes:
///
/// ```
/// use logger_manager::{LogLevel, LoggerConfig};
///
/// let config = LoggerConfig::from_json(r#"{ "log_dir": "var/log", "level": "debug" }"#).unwrap();
/// assert_eq!(config.level, LogLevel::Debug);
/// assert!(config.enable_console);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub log_dir: PathBuf,
    pub level: LogLevel,
    pub enable_console: bool,
    /// Base file name; files are written as `<stem>_<date>.<ext>`
    pub file_name: String,
    pub rotation_hour: u8,
    pub rotation_minute: u8,
    /// Dated files to keep, 0 keeps all
    pub max_files: usize,
    /// Entries at or above this level are flushed immediately
    pub flush_level: LogLevel,
    pub console_colors: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("logs"),
            level: LogLevel::Info,
            enable_console: true,
            file_name: "app.log".to_string(),
            rotation_hour: 23,
            rotation_minute: 59,
            max_files: 0,
            flush_level: LogLevel::Info,
            console_colors: true,
        }
    }
}

impl LoggerConfig {
    pub fn new(log_dir: impl AsRef<Path>, level: LogLevel, enable_console: bool) -> Self {
        Self {
            log_dir: log_dir.as_ref().to_path_buf(),
            level,
            enable_console,
            ..Self::default()
        }
    }

    /// Parse a JSON config fragment
    ///
    /// # Errors
    ///
    /// Returns [`LoggerError::ConfigParse`] on malformed input
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_rotation_time(mut self, hour: u8, minute: u8) -> Self {
        self.rotation_hour = hour;
        self.rotation_minute = minute;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_files(mut self, max_files: usize) -> Self {
        self.max_files = max_files;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_flush_level(mut self, level: LogLevel) -> Self {
        self.flush_level = level;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_console_colors(mut self, enabled: bool) -> Self {
        self.console_colors = enabled;
        self
    }

    /// Rotation schedule for the file sink
    ///
    /// # Errors
    ///
    /// Returns [`LoggerError::InvalidConfiguration`] for an invalid time of day
    pub fn rotation(&self) -> Result<DailyRotation> {
        Ok(DailyRotation::at(self.rotation_hour, self.rotation_minute)?
            .with_max_files(self.max_files))
    }

    /// Check the fields that can be wrong independently of the filesystem
    ///
    /// # Errors
    ///
    /// Returns [`LoggerError::InvalidConfiguration`] describing the first problem
    pub fn validate(&self) -> Result<()> {
        if self.file_name.trim().is_empty() {
            return Err(LoggerError::config("LoggerConfig", "file_name must not be empty"));
        }
        if self.log_dir.as_os_str().is_empty() {
            return Err(LoggerError::config("LoggerConfig", "log_dir must not be empty"));
        }
        self.rotation().map(|_| ())
    }
}
