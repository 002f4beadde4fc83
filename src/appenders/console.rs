//! Console appender implementation

use crate::core::{Appender, LogEntry, Pattern, Result};
use colored::Colorize;
use std::io::{self, Write};

enum Target {
    Stdout,
    Writer(Box<dyn Write + Send>),
}

/// Writes each entry as one line to stdout (or a supplied writer), with the
/// pattern's `%^`..`%$` range colorized by severity.
pub struct ConsoleAppender {
    use_colors: bool,
    pattern: Pattern,
    target: Target,
}

impl ConsoleAppender {
    pub fn new() -> Self {
        Self::with_colors(true)
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self {
            use_colors,
            pattern: Pattern::console(),
            target: Target::Stdout,
        }
    }

    /// Write to `writer` instead of stdout
    ///
    /// # Example
    ///
    /// ```
    /// use logger_manager::appenders::ConsoleAppender;
    ///
    /// let appender = ConsoleAppender::with_colors(false).with_writer(std::io::sink());
    /// ```
    #[must_use]
    pub fn with_writer<W: Write + Send + 'static>(mut self, writer: W) -> Self {
        self.target = Target::Writer(Box::new(writer));
        self
    }

    #[must_use]
    pub fn with_pattern(mut self, pattern: Pattern) -> Self {
        self.pattern = pattern;
        self
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn uses_colors(&self) -> bool {
        self.use_colors
    }

    /// Render one line, colorizing the marked range when enabled
    fn format_line(&self, entry: &LogEntry) -> String {
        let rendered = self.pattern.render(entry);
        match rendered.color_range {
            Some(range) if self.use_colors => {
                let text = &rendered.text;
                format!(
                    "{}{}{}",
                    &text[..range.start],
                    text[range.clone()].color(entry.level.color_code()),
                    &text[range.end..]
                )
            }
            _ => rendered.text,
        }
    }
}

impl Default for ConsoleAppender {
    fn default() -> Self {
        Self::new()
    }
}

impl Appender for ConsoleAppender {
    fn append(&mut self, entry: &LogEntry) -> Result<()> {
        let mut line = self.format_line(entry);
        line.push('\n');

        match &mut self.target {
            Target::Stdout => io::stdout().lock().write_all(line.as_bytes())?,
            Target::Writer(writer) => writer.write_all(line.as_bytes())?,
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        match &mut self.target {
            Target::Stdout => io::stdout().flush()?,
            Target::Writer(writer) => writer.flush()?,
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
