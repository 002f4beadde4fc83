//! Basic logging service usage example
//!
//! Demonstrates initialization, leveled and context-tagged logging,
//! exception reporting and shutdown of the process-wide service.
//!
//! Run with: cargo run --example basic_usage

use logger_manager::prelude::*;
use logger_manager::{debug, info, info_ctx, log_exception, warn};

struct Importer<'a> {
    service: &'a LoggingService,
}

impl Importer<'_> {
    fn import(&self, path: &str) {
        info_ctx!(self.service, "importing {}", path);

        if let Err(e) = std::fs::read_to_string(path) {
            // Logged as "[Importer::import] could not read ... - Exception: ..."
            log_exception!(self.service, e, "could not read {}", path);
        }
    }
}

fn main() -> Result<()> {
    println!("=== Logger Manager - Basic Usage Example ===\n");

    let service = LoggingService::global();
    let log_dir = std::env::temp_dir().join("logger_manager_demo");

    println!("1. Initializing with file + console output:");
    if !service.initialize(&log_dir, LogLevel::Debug, true) {
        println!("   File logging unavailable, continuing on the console");
    }

    println!("\n2. Logging at different levels:");
    service.trace(format_args!("Trace message (hidden)"));
    debug!(service, "Debug message");
    info!(service, "Server listening on port {}", 8080);
    warn!(service, "Cache at {}% capacity", 91);
    service.error(format_args!("Error message"));
    service.critical(format_args!("Critical message"));

    println!("\n3. Context tagging:");
    service.info_with_context("startup", format_args!("explicit context"));
    Importer { service }.import("/definitely/missing.csv");

    println!("\n4. Changing the level at runtime:");
    service.set_level(LogLevel::Warn);
    info!(service, "Info message (hidden)");
    warn!(service, "Warning message (visible)");

    service.shutdown();
    println!("\nLog files written to {}", log_dir.display());

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
