//! Shared fixtures for integration tests

#![allow(dead_code)]

use logger_manager::prelude::*;
use logger_manager::DefaultSinkFactory;
use parking_lot::Mutex;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Cloneable in-memory writer standing in for the terminal
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Real file sinks, console captured, construction counted
#[derive(Clone, Default)]
pub struct CaptureFactory {
    pub console: SharedBuffer,
    pub file_sinks_built: Arc<AtomicUsize>,
}

impl CaptureFactory {
    pub fn file_sinks_built(&self) -> usize {
        self.file_sinks_built.load(Ordering::SeqCst)
    }
}

impl SinkFactory for CaptureFactory {
    fn file_sink(&self, config: &LoggerConfig) -> Result<Box<dyn Appender>> {
        self.file_sinks_built.fetch_add(1, Ordering::SeqCst);
        DefaultSinkFactory.file_sink(config)
    }

    fn console_sink(&self, _colors: bool) -> Result<Box<dyn Appender>> {
        Ok(Box::new(
            ConsoleAppender::with_colors(false).with_writer(self.console.clone()),
        ))
    }
}

/// Service whose console output lands in the returned factory's buffer
pub fn capturing_service() -> (LoggingService, CaptureFactory) {
    let factory = CaptureFactory::default();
    (LoggingService::with_factory(factory.clone()), factory)
}

/// Concatenated contents of every dated `app_*` file in `dir`
pub fn read_log_files(dir: &Path) -> String {
    let mut names: Vec<_> = fs::read_dir(dir)
        .expect("log directory exists")
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with("app_") && n.ends_with(".log"))
        })
        .collect();
    names.sort();

    names
        .iter()
        .map(|p| fs::read_to_string(p).expect("log file readable"))
        .collect()
}
