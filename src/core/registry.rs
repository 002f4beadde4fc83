//! Process-wide logger registry and backend error callback
//!
//! Code that works with [`Logger`] directly can look the live logger up by
//! name instead of being handed the façade. Entries are lookups only: the
//! owner of a logger removes its entry when it tears the logger down, so a
//! handle obtained here must not be assumed valid past that point.

use super::logger::Logger;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

/// Callback invoked with the description of an internal backend error
pub type ErrorHandler = Arc<dyn Fn(&str) + Send + Sync>;

fn loggers() -> &'static RwLock<HashMap<String, Arc<Logger>>> {
    static LOGGERS: OnceLock<RwLock<HashMap<String, Arc<Logger>>>> = OnceLock::new();
    LOGGERS.get_or_init(|| RwLock::new(HashMap::new()))
}

fn error_handler() -> &'static RwLock<ErrorHandler> {
    static HANDLER: OnceLock<RwLock<ErrorHandler>> = OnceLock::new();
    HANDLER.get_or_init(|| RwLock::new(stderr_handler()))
}

/// Handler that writes `Logger error: <msg>` to standard error
pub fn stderr_handler() -> ErrorHandler {
    Arc::new(|msg: &str| eprintln!("Logger error: {}", msg))
}

/// Register a logger under its own name, replacing any previous entry
pub fn register(logger: Arc<Logger>) {
    loggers().write().insert(logger.name().to_string(), logger);
}

/// Look up a registered logger by name
pub fn get(name: &str) -> Option<Arc<Logger>> {
    loggers().read().get(name).cloned()
}

/// Remove the entry for `name`, whichever logger it points at
pub fn drop_logger(name: &str) -> Option<Arc<Logger>> {
    loggers().write().remove(name)
}

/// Remove the entry for this exact logger.
///
/// Leaves the entry alone when the name has since been taken over by a
/// different logger. Returns whether an entry was removed.
pub fn unregister(logger: &Arc<Logger>) -> bool {
    let mut map = loggers().write();
    match map.get(logger.name()) {
        Some(existing) if Arc::ptr_eq(existing, logger) => {
            map.remove(logger.name());
            true
        }
        _ => false,
    }
}

/// Names currently registered, sorted
pub fn registered_names() -> Vec<String> {
    let mut names: Vec<String> = loggers().read().keys().cloned().collect();
    names.sort();
    names
}

/// Replace the process-wide backend error callback
pub fn set_error_handler(handler: ErrorHandler) {
    *error_handler().write() = handler;
}

/// Route an internal backend error to the installed callback
pub fn report_error(message: &str) {
    let handler = Arc::clone(&*error_handler().read());
    handler(message);
}
