//! Daily rotating file appender
//!
//! Writes to `<dir>/<stem>_<YYYY-MM-DD>.<ext>` and switches to a new file
//! once per day at a fixed local time of day. Rotation is driven by entry
//! timestamps, so the first entry at or past the rotation point opens the
//! next file. Optionally only the newest `max_files` dated files are kept.

use crate::core::{Appender, LogEntry, LoggerError, Pattern, Result};
use chrono::{DateTime, Duration, Local, NaiveDate, TimeZone};
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// When a [`DailyFileAppender`] rolls over and how many files it keeps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyRotation {
    pub hour: u8,
    pub minute: u8,
    /// Number of dated files to keep; 0 keeps every file
    pub max_files: usize,
}

impl Default for DailyRotation {
    fn default() -> Self {
        Self {
            hour: 23,
            minute: 59,
            max_files: 0,
        }
    }
}

impl DailyRotation {
    /// Rotate every day at `hour:minute` local time
    ///
    /// # Errors
    ///
    /// Returns [`LoggerError::InvalidConfiguration`] if the time is out of range.
    pub fn at(hour: u8, minute: u8) -> Result<Self> {
        if hour > 23 || minute > 59 {
            return Err(LoggerError::config(
                "DailyRotation",
                format!("rotation time {:02}:{:02} is not a valid time of day", hour, minute),
            ));
        }
        Ok(Self {
            hour,
            minute,
            max_files: 0,
        })
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_files(mut self, max_files: usize) -> Self {
        self.max_files = max_files;
        self
    }

    /// First rotation point strictly after `now`.
    ///
    /// Points are taken on calendar dates in `now`'s zone, so the wall clock
    /// time stays fixed across DST changes.
    pub fn next_after<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> DateTime<Tz> {
        let zone = now.timezone();
        now.date_naive()
            .iter_days()
            .take(3)
            .filter_map(|date| self.point_on(&zone, date))
            .find(|point| point > now)
            .unwrap_or_else(|| now.clone() + Duration::days(1))
    }

    /// Rotation instant on `date`, moved past a DST gap when the wall clock
    /// skips it
    fn point_on<Tz: TimeZone>(&self, zone: &Tz, date: NaiveDate) -> Option<DateTime<Tz>> {
        let naive = date.and_hms_opt(u32::from(self.hour), u32::from(self.minute), 0)?;
        zone.from_local_datetime(&naive)
            .earliest()
            .or_else(|| zone.from_local_datetime(&(naive + Duration::hours(1))).earliest())
    }
}

/// Dated file name for `base_name`, e.g. `app.log` -> `app_2025-01-08.log`
pub fn dated_file_name(base_name: &str, date: NaiveDate) -> String {
    let (stem, ext) = split_base_name(base_name);
    match ext {
        Some(ext) => format!("{}_{}.{}", stem, date.format(DATE_FORMAT), ext),
        None => format!("{}_{}", stem, date.format(DATE_FORMAT)),
    }
}

fn split_base_name(base_name: &str) -> (&str, Option<&str>) {
    match base_name.rfind('.') {
        Some(idx) if idx > 0 => (&base_name[..idx], Some(&base_name[idx + 1..])),
        _ => (base_name, None),
    }
}

/// Date encoded in a file name produced by [`dated_file_name`]
fn parse_dated_file_name(base_name: &str, file_name: &str) -> Option<NaiveDate> {
    let (stem, ext) = split_base_name(base_name);
    let rest = file_name.strip_prefix(stem)?.strip_prefix('_')?;
    let date_part = match ext {
        Some(ext) => rest.strip_suffix(ext)?.strip_suffix('.')?,
        None => rest,
    };
    NaiveDate::parse_from_str(date_part, DATE_FORMAT).ok()
}

pub struct DailyFileAppender {
    dir: PathBuf,
    base_name: String,
    rotation: DailyRotation,
    pattern: Pattern,
    writer: Option<BufWriter<File>>,
    current_path: PathBuf,
    next_rotation: DateTime<Local>,
}

impl DailyFileAppender {
    /// Create an appender rotating daily at 23:59
    ///
    /// # Errors
    ///
    /// Returns error if the directory or the first file cannot be created
    pub fn new<P: AsRef<Path>>(dir: P, base_name: &str) -> Result<Self> {
        Self::with_rotation(dir, base_name, DailyRotation::default())
    }

    /// Create an appender with a custom rotation schedule
    ///
    /// # Errors
    ///
    /// Returns error if the base name is empty, or if the directory or the
    /// first file cannot be created
    pub fn with_rotation<P: AsRef<Path>>(
        dir: P,
        base_name: &str,
        rotation: DailyRotation,
    ) -> Result<Self> {
        if base_name.is_empty() || base_name.contains(['/', '\\']) {
            return Err(LoggerError::config(
                "DailyFileAppender",
                format!("'{}' is not a plain file name", base_name),
            ));
        }

        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|e| {
            LoggerError::io_operation(
                "create log directory",
                format!("Failed to create directory '{}'", dir.display()),
                e,
            )
        })?;

        let now = Local::now();
        let current_path = dir.join(dated_file_name(base_name, now.date_naive()));
        let writer = Some(BufWriter::new(Self::open(&current_path)?));

        let appender = Self {
            dir,
            base_name: base_name.to_string(),
            rotation,
            pattern: Pattern::file(),
            writer,
            current_path,
            next_rotation: rotation.next_after(&now),
        };
        appender.prune_old_files();
        Ok(appender)
    }

    fn open(path: &Path) -> Result<File> {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| {
                LoggerError::file_appender(
                    path.display().to_string(),
                    format!("Failed to open: {}", e),
                )
            })
    }

    /// Path of the file currently written to
    #[must_use]
    pub fn current_path(&self) -> &Path {
        &self.current_path
    }

    #[must_use]
    pub fn rotation(&self) -> &DailyRotation {
        &self.rotation
    }

    #[must_use]
    pub fn next_rotation(&self) -> DateTime<Local> {
        self.next_rotation
    }

    /// Close the current file and open the one dated `at`
    fn rotate(&mut self, at: DateTime<Local>) -> Result<()> {
        if let Some(mut writer) = self.writer.take() {
            writer.flush().map_err(|e| {
                LoggerError::file_rotation(
                    self.current_path.display().to_string(),
                    format!("Failed to flush before rotation: {}", e),
                )
            })?;
        }

        let next_path = self.dir.join(dated_file_name(&self.base_name, at.date_naive()));
        let file = Self::open(&next_path).map_err(|e| {
            LoggerError::file_rotation(next_path.display().to_string(), e.to_string())
        })?;

        self.writer = Some(BufWriter::new(file));
        self.current_path = next_path;
        self.next_rotation = self.rotation.next_after(&at);
        self.prune_old_files();
        Ok(())
    }

    /// Delete the oldest dated files beyond `max_files`
    fn prune_old_files(&self) {
        if self.rotation.max_files == 0 {
            return;
        }

        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) => {
                eprintln!(
                    "[WARN] Cannot list {} for log retention: {}",
                    self.dir.display(),
                    e
                );
                return;
            }
        };

        let mut dated: Vec<(NaiveDate, PathBuf)> = entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let name = entry.file_name();
                let date = parse_dated_file_name(&self.base_name, name.to_str()?)?;
                Some((date, entry.path()))
            })
            .collect();

        if dated.len() <= self.rotation.max_files {
            return;
        }

        dated.sort();
        let excess = dated.len() - self.rotation.max_files;
        for (_, path) in dated.into_iter().take(excess) {
            if path == self.current_path {
                continue;
            }
            if let Err(e) = fs::remove_file(&path) {
                eprintln!("[WARN] Failed to remove old log file {}: {}", path.display(), e);
            }
        }
    }
}

impl Appender for DailyFileAppender {
    fn append(&mut self, entry: &LogEntry) -> Result<()> {
        if entry.timestamp >= self.next_rotation {
            if let Err(e) = self.rotate(entry.timestamp) {
                eprintln!("[WARN] Log rotation failed: {}. Continuing with current file.", e);

                if self.writer.is_none() {
                    self.writer = Some(BufWriter::new(Self::open(&self.current_path)?));
                }
                // Do not retry on every entry
                self.next_rotation = self.rotation.next_after(&entry.timestamp);
            }
        }

        let mut line = self.pattern.format(entry);
        line.push('\n');

        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| LoggerError::writer("File writer not initialized"))?;
        writer.write_all(line.as_bytes()).map_err(|e| {
            LoggerError::file_appender(
                self.current_path.display().to_string(),
                format!("Failed to write log entry: {}", e),
            )
        })
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush().map_err(|e| {
                LoggerError::file_appender(
                    self.current_path.display().to_string(),
                    format!("Failed to flush: {}", e),
                )
            })?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "daily_file"
    }
}

impl Drop for DailyFileAppender {
    fn drop(&mut self) {
        if let Some(mut writer) = self.writer.take() {
            let _ = writer.flush();
        }
    }
}
