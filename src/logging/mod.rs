//! Logging and observability
//!
//! Structured logging through `tracing` with a configurable level and an
//! optional JSON output format for machine consumption.
//!
//! # Example
//!
//! ```no_run
//! use aisler_push::logging::init_logging;
//! use aisler_push::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! init_logging(None, &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

use crate::config::LoggingConfig;
use crate::domain::{PushError, Result};
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Initialize the logging system based on configuration
///
/// The command-line override wins over the configured level; `RUST_LOG`
/// in the environment wins over both. Console output is plain text by
/// default and JSON when the configuration asks for it.
pub fn init_logging(level_override: Option<&str>, config: &LoggingConfig) -> Result<()> {
    let level = parse_log_level(level_override.unwrap_or(&config.level))?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("aisler_push={}", level)));

    let console_layer = if config.json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_filter(env_filter)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_filter(env_filter)
            .boxed()
    };

    tracing_subscriber::registry().with(console_layer).init();

    tracing::debug!(level = %level, json = config.json, "Logging initialized");
    Ok(())
}

/// Parse log level from string
fn parse_log_level(level_str: &str) -> Result<Level> {
    match level_str.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(PushError::Configuration(format!(
            "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
            level_str
        ))),
    }
}
