// aisler-push - Board Export and Fabrication Publishing Tool
// Licensed under the MIT License

//! # aisler-push - Board Export and Fabrication Publishing
//!
//! aisler-push exports a circuit-board design into a complete manufacturing
//! package and publishes it to the AISLER fabrication service, or delivers
//! the package to a local path when the design asks for that instead.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Rendering** Gerber plots, Excellon drill files, and the bare-board
//!   netlist for every enabled layer of the plan
//! - **Cataloging** placed components into the JSON list the service ingests
//! - **Packaging** all artifacts into a single ZIP archive
//! - **Publishing** the package and following the remote build to completion
//!
//! ## Architecture
//!
//! The crate follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (export stages, progress delivery)
//! - [`adapters`] - External integrations (board source, AISLER service)
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use aisler_push::adapters::board::BoardSnapshot;
//! use aisler_push::config::PushConfig;
//! use aisler_push::core::export::PushCoordinator;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = PushConfig::from_file("aisler-push.toml")?;
//!     let board = BoardSnapshot::from_json_file("board.json")?;
//!
//!     let (handle, mut progress) = PushCoordinator::spawn(board, config)?;
//!
//!     while let Some(event) = progress.recv().await {
//!         println!("progress: {}", event.as_status());
//!     }
//!
//!     let (_board, outcome) = handle.wait().await;
//!     println!("delivered: {:?}", outcome?.delivery);
//!     Ok(())
//! }
//! ```
//!
//! ## Project Linkage
//!
//! A design is linked to a service project through a designated title-block
//! comment line. The first push of an unlinked design creates a project and
//! writes the link back; later pushes upload new revisions of the same
//! project:
//!
//! ```rust
//! use aisler_push::domain::ProjectId;
//!
//! let id = ProjectId::from_comment("AISLER Project ID: ABCDEFGH").unwrap();
//! assert_eq!(id.as_str(), "ABCDEFGH");
//! assert_eq!(id.to_comment(), "AISLER Project ID: ABCDEFGH");
//! ```
//!
//! ## Error Handling
//!
//! All fallible operations return [`domain::Result`] with the
//! [`domain::PushError`] error type:
//!
//! ```rust,no_run
//! use aisler_push::domain::PushError;
//!
//! fn example() -> Result<(), PushError> {
//!     let config = aisler_push::config::PushConfig::from_file("aisler-push.toml")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Logging
//!
//! Structured logging uses the `tracing` crate:
//!
//! ```rust,no_run
//! use tracing::{info, warn};
//!
//! info!(project_id = "ABCDEFGH", "Package uploaded");
//! warn!("Design has no enabled copper layers");
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
