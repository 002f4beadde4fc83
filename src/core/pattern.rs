//! Line layout patterns
//!
//! A [`Pattern`] is compiled once from a template string and then renders
//! each [`LogEntry`] into a single line. Supported flags:
//!
//! | flag | output |
//! |------|--------|
//! | `%Y` | four digit year |
//! | `%m` | month `01-12` |
//! | `%d` | day `01-31` |
//! | `%H` | hour `00-23` |
//! | `%M` | minute `00-59` |
//! | `%S` | second `00-59` |
//! | `%e` | milliseconds `000-999` |
//! | `%t` | thread number |
//! | `%l` | level name (`INFO`) |
//! | `%L` | level initial (`I`) |
//! | `%n` | logger name |
//! | `%v` | message |
//! | `%^` / `%$` | start / end of the colorized range |
//! | `%%` | literal `%` |

use super::error::{LoggerError, Result};
use super::log_entry::LogEntry;
use chrono::{Datelike, Timelike};
use std::fmt::Write;
use std::ops::Range;

/// Layout used by file sinks
pub const FILE_PATTERN: &str = "[%Y-%m-%d %H:%M:%S.%e] [thread %t] [%l] [%n] %v";

/// Layout used by console sinks; no thread id, colorized level
pub const CONSOLE_PATTERN: &str = "[%Y-%m-%d %H:%M:%S.%e] [%^%l%$] [%n] %v";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Literal(String),
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    Millis,
    Thread,
    Level,
    ShortLevel,
    Name,
    Message,
    ColorStart,
    ColorEnd,
}

/// A rendered line plus the byte range a console should colorize
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLine {
    pub text: String,
    pub color_range: Option<Range<usize>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    source: String,
    tokens: Vec<Token>,
}

impl Pattern {
    /// Compile a pattern template
    ///
    /// # Errors
    ///
    /// Returns [`LoggerError::InvalidPattern`] on an unknown flag or a
    /// trailing `%`.
    pub fn new(source: &str) -> Result<Self> {
        let mut tokens = Vec::new();
        let mut literal = String::new();
        let mut chars = source.chars();

        while let Some(c) = chars.next() {
            if c != '%' {
                literal.push(c);
                continue;
            }

            let flag = chars
                .next()
                .ok_or_else(|| LoggerError::pattern(source, "pattern ends with a lone '%'"))?;

            let token = match flag {
                '%' => {
                    literal.push('%');
                    continue;
                }
                'Y' => Token::Year,
                'm' => Token::Month,
                'd' => Token::Day,
                'H' => Token::Hour,
                'M' => Token::Minute,
                'S' => Token::Second,
                'e' => Token::Millis,
                't' => Token::Thread,
                'l' => Token::Level,
                'L' => Token::ShortLevel,
                'n' => Token::Name,
                'v' => Token::Message,
                '^' => Token::ColorStart,
                '$' => Token::ColorEnd,
                other => {
                    return Err(LoggerError::pattern(
                        source,
                        format!("unknown flag '%{}'", other),
                    ))
                }
            };

            if !literal.is_empty() {
                tokens.push(Token::Literal(std::mem::take(&mut literal)));
            }
            tokens.push(token);
        }

        if !literal.is_empty() {
            tokens.push(Token::Literal(literal));
        }

        Ok(Self {
            source: source.to_string(),
            tokens,
        })
    }

    /// Default layout for file sinks
    pub fn file() -> Self {
        Self::new(FILE_PATTERN).expect("built-in file pattern compiles")
    }

    /// Default layout for console sinks
    pub fn console() -> Self {
        Self::new(CONSOLE_PATTERN).expect("built-in console pattern compiles")
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Render an entry, tracking where the color markers fell
    pub fn render(&self, entry: &LogEntry) -> RenderedLine {
        let ts = &entry.timestamp;
        let mut out = String::with_capacity(self.source.len() + entry.message.len() + 32);
        let mut color_start = None;
        let mut color_range = None;

        // Writing into a String never fails
        for token in &self.tokens {
            let _ = match token {
                Token::Literal(text) => {
                    out.push_str(text);
                    Ok(())
                }
                Token::Year => write!(out, "{:04}", ts.year()),
                Token::Month => write!(out, "{:02}", ts.month()),
                Token::Day => write!(out, "{:02}", ts.day()),
                Token::Hour => write!(out, "{:02}", ts.hour()),
                Token::Minute => write!(out, "{:02}", ts.minute()),
                Token::Second => write!(out, "{:02}", ts.second()),
                Token::Millis => write!(out, "{:03}", ts.timestamp_subsec_millis() % 1000),
                Token::Thread => write!(out, "{}", entry.thread_number),
                Token::Level => {
                    out.push_str(entry.level.to_str());
                    Ok(())
                }
                Token::ShortLevel => {
                    out.push_str(entry.level.short_str());
                    Ok(())
                }
                Token::Name => {
                    out.push_str(&entry.logger_name);
                    Ok(())
                }
                Token::Message => {
                    out.push_str(&entry.message);
                    Ok(())
                }
                Token::ColorStart => {
                    color_start = Some(out.len());
                    Ok(())
                }
                Token::ColorEnd => {
                    if let Some(start) = color_start.take() {
                        color_range = Some(start..out.len());
                    }
                    Ok(())
                }
            };
        }

        RenderedLine {
            text: out,
            color_range,
        }
    }

    /// Render an entry as plain text
    pub fn format(&self, entry: &LogEntry) -> String {
        self.render(entry).text
    }
}

impl Default for Pattern {
    fn default() -> Self {
        Self::file()
    }
}
