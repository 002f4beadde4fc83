//! Sink construction seam used by the service

use super::config::LoggerConfig;
use crate::appenders::{ConsoleAppender, DailyFileAppender};
use crate::core::{Appender, Result};

/// Builds the sinks a [`LoggingService`](super::LoggingService) wires into
/// its logger.
///
/// The default implementation produces a [`DailyFileAppender`] and a stdout
/// [`ConsoleAppender`]. Embedding applications can supply their own to
/// redirect console output or add decoration.
pub trait SinkFactory: Send + Sync {
    /// Daily rotating file sink rooted at `config.log_dir`
    fn file_sink(&self, config: &LoggerConfig) -> Result<Box<dyn Appender>>;

    /// Console sink; `colors` selects severity coloring
    fn console_sink(&self, colors: bool) -> Result<Box<dyn Appender>>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultSinkFactory;

impl SinkFactory for DefaultSinkFactory {
    fn file_sink(&self, config: &LoggerConfig) -> Result<Box<dyn Appender>> {
        let appender =
            DailyFileAppender::with_rotation(&config.log_dir, &config.file_name, config.rotation()?)?;
        Ok(Box::new(appender))
    }

    fn console_sink(&self, colors: bool) -> Result<Box<dyn Appender>> {
        Ok(Box::new(ConsoleAppender::with_colors(colors)))
    }
}
