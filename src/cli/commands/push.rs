//! Push command implementation
//!
//! This module implements the `push` command: load a board snapshot,
//! export the manufacturing package, and deliver it locally or publish it
//! to the fabrication service.

use crate::adapters::board::{BoardSnapshot, BoardSource};
use crate::config::PushConfig;
use crate::core::export::{Delivery, PushCoordinator};
use crate::domain::{ProgressEvent, ProjectId, PushError};
use clap::Args;
use std::path::Path;
use tokio::sync::watch;

/// Arguments for the push command
#[derive(Args, Debug)]
pub struct PushArgs {
    /// Path to the board snapshot JSON file
    pub board: String,

    /// Do not open the project page in a browser after publishing
    #[arg(long)]
    pub no_browser: bool,

    /// Do not write a newly assigned project link back into the snapshot
    #[arg(long)]
    pub no_save: bool,
}

impl PushArgs {
    /// Execute the push command
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        tracing::info!(board = %self.board, "Starting push command");

        // A missing config file means defaults; an unreadable or invalid
        // one is an error.
        let mut config = if Path::new(config_path).exists() {
            match PushConfig::from_file(config_path) {
                Ok(c) => c,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to load configuration");
                    eprintln!("Failed to load configuration: {e}");
                    return Ok(2); // Configuration error exit code
                }
            }
        } else {
            tracing::info!(config_path = %config_path, "No configuration file, using defaults");
            PushConfig::default()
        };

        if self.no_browser {
            config.service.open_redirect = false;
        }

        let board = match BoardSnapshot::from_json_file(&self.board) {
            Ok(b) => b,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load board snapshot");
                eprintln!("Failed to load board snapshot: {e}");
                return Ok(2);
            }
        };

        let was_linked =
            ProjectId::from_comment(&board.comment(config.export.comment_line)).is_some();

        let (handle, mut progress) = PushCoordinator::spawn(board, config)?;

        // Relay Ctrl+C / SIGTERM into a pipeline cancellation
        let canceller = handle.canceller();
        let mut shutdown = shutdown_signal;
        tokio::spawn(async move {
            if shutdown.wait_for(|stop| *stop).await.is_ok() {
                canceller.cancel();
            }
        });

        let printer = tokio::spawn(async move {
            while let Some(event) = progress.recv().await {
                match event {
                    ProgressEvent::Percent(p) => println!("  [{p:>3}%]"),
                    ProgressEvent::Finished => println!("  [done]"),
                }
            }
        });

        let (board, result) = handle.wait().await;
        let _ = printer.await;

        match result {
            Ok(outcome) => {
                match &outcome.delivery {
                    Delivery::Local(path) => {
                        println!("✅ Package exported locally: {}", path.display());
                    }
                    Delivery::Remote { redirect } => {
                        println!("✅ Design published: {redirect}");
                    }
                }
                if let Some(project) = &outcome.project {
                    println!("   Project: {project}");
                    if !was_linked && !self.no_save {
                        board.to_json_file(&self.board)?;
                        tracing::info!(
                            board = %self.board,
                            project_id = %project,
                            "Project link saved to snapshot"
                        );
                    }
                }
                Ok(0)
            }
            Err(PushError::Cancelled) => {
                println!("⚠️  Push cancelled");
                Ok(1)
            }
            Err(e) => {
                tracing::error!(error = %e, "Push failed");
                eprintln!("Push failed: {e}");
                Ok(5) // Fatal error exit code
            }
        }
    }
}
