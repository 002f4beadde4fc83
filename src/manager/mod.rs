//! The process-wide logging façade and its configuration

pub mod config;
pub mod factory;
pub mod service;

pub use config::LoggerConfig;
pub use factory::{DefaultSinkFactory, SinkFactory};
pub use service::{InitMode, LoggingService, FALLBACK_LOGGER_NAME, MAIN_LOGGER_NAME};
