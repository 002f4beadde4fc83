//! Logging macros for ergonomic log message formatting.
//!
//! The plain macros mirror `format!`. The `*_ctx!` macros prefix the message
//! with the enclosing function name, and `log_exception!` tags a caught error
//! with the enclosing type (or module) and function. Arguments are only
//! formatted when the level is enabled.
//!
//! # Examples
//!
//! ```
//! use logger_manager::prelude::*;
//! use logger_manager::{info, info_ctx, log_exception};
//!
//! let service = LoggingService::new();
//!
//! // Not initialized yet: silently ignored
//! info!(service, "Server listening on port {}", 8080);
//!
//! fn load(service: &LoggingService) {
//!     // Logged as "[load] reading 3 files"
//!     info_ctx!(service, "reading {} files", 3);
//!
//!     let err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
//!     // Logged as "[<module>::load] open failed - Exception: missing"
//!     log_exception!(service, err, "open failed");
//! }
//! load(&service);
//! ```

/// Full path of the enclosing function, e.g. `my_app::Worker::run`.
#[macro_export]
macro_rules! function_name {
    () => {{
        fn __logger_manager_marker() {}
        fn type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        $crate::location::enclosing_function(type_name_of(__logger_manager_marker))
    }};
}

/// Log a message with automatic formatting.
///
/// # Examples
///
/// ```
/// # use logger_manager::prelude::*;
/// # let service = LoggingService::new();
/// use logger_manager::log;
/// log!(service, LogLevel::Info, "Simple message");
/// log!(service, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($service:expr, $level:expr, $($arg:tt)+) => {
        $service.log($level, format_args!($($arg)+))
    };
}

/// Log a trace-level message.
#[macro_export]
macro_rules! trace {
    ($service:expr, $($arg:tt)+) => {
        $crate::log!($service, $crate::LogLevel::Trace, $($arg)+)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($service:expr, $($arg:tt)+) => {
        $crate::log!($service, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($service:expr, $($arg:tt)+) => {
        $crate::log!($service, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($service:expr, $($arg:tt)+) => {
        $crate::log!($service, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($service:expr, $($arg:tt)+) => {
        $crate::log!($service, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a critical-level message.
#[macro_export]
macro_rules! critical {
    ($service:expr, $($arg:tt)+) => {
        $crate::log!($service, $crate::LogLevel::Critical, $($arg)+)
    };
}

/// Log `[function] message` at `level`, tagged with the enclosing function.
///
/// # Examples
///
/// ```
/// # use logger_manager::prelude::*;
/// # let service = LoggingService::new();
/// use logger_manager::log_ctx;
/// log_ctx!(service, LogLevel::Warn, "retry {} of {}", 1, 3);
/// ```
#[macro_export]
macro_rules! log_ctx {
    ($service:expr, $level:expr, $($arg:tt)+) => {{
        let service = &$service;
        let level = $level;
        if service.should_log(level) {
            service.log_with_context(
                level,
                $crate::location::function_name($crate::function_name!()),
                format_args!($($arg)+),
            );
        }
    }};
}

#[macro_export]
macro_rules! trace_ctx {
    ($service:expr, $($arg:tt)+) => {
        $crate::log_ctx!($service, $crate::LogLevel::Trace, $($arg)+)
    };
}

#[macro_export]
macro_rules! debug_ctx {
    ($service:expr, $($arg:tt)+) => {
        $crate::log_ctx!($service, $crate::LogLevel::Debug, $($arg)+)
    };
}

#[macro_export]
macro_rules! info_ctx {
    ($service:expr, $($arg:tt)+) => {
        $crate::log_ctx!($service, $crate::LogLevel::Info, $($arg)+)
    };
}

#[macro_export]
macro_rules! warn_ctx {
    ($service:expr, $($arg:tt)+) => {
        $crate::log_ctx!($service, $crate::LogLevel::Warn, $($arg)+)
    };
}

#[macro_export]
macro_rules! error_ctx {
    ($service:expr, $($arg:tt)+) => {
        $crate::log_ctx!($service, $crate::LogLevel::Error, $($arg)+)
    };
}

#[macro_export]
macro_rules! critical_ctx {
    ($service:expr, $($arg:tt)+) => {
        $crate::log_ctx!($service, $crate::LogLevel::Critical, $($arg)+)
    };
}

/// Log a caught error as `[Component::function] message - Exception: <err>`.
///
/// The component defaults to the enclosing impl type (or module for free
/// functions); pass `component = "Name"` to set it explicitly.
///
/// # Examples
///
/// ```
/// # use logger_manager::prelude::*;
/// # let service = LoggingService::new();
/// use logger_manager::log_exception;
/// let err = std::fmt::Error;
/// log_exception!(service, err, component = "Worker", "processing item {}", 7);
/// ```
#[macro_export]
macro_rules! log_exception {
    ($service:expr, $err:expr, component = $component:expr, $($arg:tt)+) => {{
        let path = $crate::function_name!();
        $service.log_exception(
            &$err,
            $component,
            $crate::location::function_name(path),
            format_args!($($arg)+),
        )
    }};
    ($service:expr, $err:expr, $($arg:tt)+) => {{
        let path = $crate::function_name!();
        $service.log_exception(
            &$err,
            $crate::location::component_name(path),
            $crate::location::function_name(path),
            format_args!($($arg)+),
        )
    }};
}
