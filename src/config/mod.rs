//! Configuration management
//!
//! The pipeline takes one explicit [`PushConfig`]: service endpoint and poll
//! interval, layer plan, well-known filenames, and logging. Loaded from TOML
//! with `${VAR}` environment substitution, or constructed in code (tests use
//! fixtures directly).

pub mod loader;
pub mod schema;

pub use loader::load_config;
pub use schema::{ExportConfig, LoggingConfig, PushConfig, ServiceConfig};
