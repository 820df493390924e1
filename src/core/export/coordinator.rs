//! Push coordinator - main orchestrator for the export-and-publish pipeline
//!
//! Sequences artifact generation, catalog building, package assembly, and
//! the terminal delivery step: either a local filesystem copy or the
//! create/upload/poll/redirect protocol against the AISLER service. The
//! whole pipeline runs on one dedicated worker task per user-initiated
//! export; progress crosses to the caller through the bounded channel and a
//! watch-based cancellation signal can stop the run between stages and
//! inside the poll loop.

use crate::adapters::board::BoardSource;
use crate::adapters::service::AislerClient;
use crate::config::PushConfig;
use crate::core::export::package::ScratchArea;
use crate::core::export::{artifacts::ArtifactGenerator, catalog, router};
use crate::core::progress::{ProgressReporter, DEFAULT_CHANNEL_CAPACITY};
use crate::domain::{ProgressEvent, ProjectId, PushError, Result};
use std::path::{Path, PathBuf};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

/// How the package left the pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// Copied to a local path, remote service untouched
    Local(PathBuf),

    /// Published to the remote service; the user lands on this URL
    Remote { redirect: String },
}

/// Result of one completed push run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushOutcome {
    /// The linked project, if one exists after the run. Always present for
    /// remote delivery; for local delivery it is whatever the title block
    /// already carried.
    pub project: Option<ProjectId>,

    /// Where the package went
    pub delivery: Delivery,
}

/// Handle to a spawned push run
///
/// Dropping the handle detaches the worker; it keeps running but can no
/// longer be cancelled.
pub struct PushHandle<B> {
    cancel: watch::Sender<bool>,
    join: JoinHandle<(B, Result<PushOutcome>)>,
}

impl<B> PushHandle<B> {
    /// Requests cancellation; the run terminates with
    /// [`PushError::Cancelled`] at the next stage boundary or poll tick
    pub fn cancel(&self) {
        let _ = self.cancel.send(true);
    }

    /// A cancellation trigger that outlives borrowing the handle, for
    /// callers that need to cancel from another task while waiting
    pub fn canceller(&self) -> PushCanceller {
        PushCanceller {
            cancel: self.cancel.clone(),
        }
    }

    /// Waits for the run to finish, returning the board together with the
    /// outcome so the caller can persist the annotated title block
    pub async fn wait(self) -> (B, Result<PushOutcome>) {
        match self.join.await {
            Ok(pair) => pair,
            Err(e) => std::panic::resume_unwind(e.into_panic()),
        }
    }
}

/// Detached cancellation trigger for a running push
#[derive(Clone)]
pub struct PushCanceller {
    cancel: watch::Sender<bool>,
}

impl PushCanceller {
    /// Requests cancellation of the associated run
    pub fn cancel(&self) {
        let _ = self.cancel.send(true);
    }
}

/// Orchestrates one export-and-publish run
pub struct PushCoordinator {
    config: PushConfig,
    client: AislerClient,
    reporter: ProgressReporter,
    cancel: watch::Receiver<bool>,
}

impl PushCoordinator {
    /// Creates a coordinator from explicit collaborators
    pub fn new(
        config: PushConfig,
        reporter: ProgressReporter,
        cancel: watch::Receiver<bool>,
    ) -> Result<Self> {
        let client = AislerClient::new(&config.service)?;
        Ok(Self {
            config,
            client,
            reporter,
            cancel,
        })
    }

    /// Spawns a push run on a dedicated worker task
    ///
    /// Returns the handle plus the progress receiver. The caller's context
    /// is never blocked; a second concurrent export of the same design is
    /// unsupported.
    pub fn spawn<B>(
        mut board: B,
        config: PushConfig,
    ) -> Result<(PushHandle<B>, mpsc::Receiver<ProgressEvent>)>
    where
        B: BoardSource + 'static,
    {
        let (reporter, progress_rx) = ProgressReporter::channel(DEFAULT_CHANNEL_CAPACITY);
        let (cancel_tx, cancel_rx) = watch::channel(false);
        let coordinator = Self::new(config, reporter, cancel_rx)?;

        let join = tokio::spawn(async move {
            let result = coordinator.run(&mut board).await;
            if let Err(ref e) = result {
                tracing::error!(error = %e, "Push run failed");
            }
            (board, result)
        });

        Ok((
            PushHandle {
                cancel: cancel_tx,
                join,
            },
            progress_rx,
        ))
    }

    /// Runs the pipeline to completion
    pub async fn run(mut self, board: &mut dyn BoardSource) -> Result<PushOutcome> {
        let comment_line = self.config.export.comment_line;
        let linked = ProjectId::from_comment(&board.comment(comment_line));
        match &linked {
            Some(id) => tracing::info!(project_id = %id, "Design is linked to a project"),
            None => tracing::info!("Design has no linked project"),
        }
        self.reporter.percent(10).await;
        self.ensure_not_cancelled()?;

        let scratch = ScratchArea::new()?;
        ArtifactGenerator::new(&self.config.export, &self.reporter)
            .generate(board, scratch.work_dir())
            .await?;
        self.ensure_not_cancelled()?;

        let catalog_path = scratch
            .work_dir()
            .join(&self.config.export.components_filename);
        let component_count = catalog::write_catalog(board, &catalog_path)?;
        tracing::info!(components = component_count, "Component catalog written");
        self.reporter.percent(30).await;
        self.ensure_not_cancelled()?;

        let archive = scratch.assemble()?;

        if let Some(destination) =
            router::deliver_locally(board, &self.config.export, &archive)?
        {
            self.reporter.finished().await;
            return Ok(PushOutcome {
                project: linked,
                delivery: Delivery::Local(destination),
            });
        }

        self.publish(board, linked, &archive).await
        // Scratch directory and archive are released when `scratch` drops,
        // on success and on failure alike.
    }

    /// The create/upload/poll/redirect protocol against the remote service
    async fn publish(
        &mut self,
        board: &mut dyn BoardSource,
        linked: Option<ProjectId>,
        archive: &Path,
    ) -> Result<PushOutcome> {
        self.reporter.percent(40).await;

        let (project, upload_url) = match linked {
            Some(id) => {
                let url = self.client.upload_url_for(&id);
                (id, url)
            }
            None => {
                let (id, url) = self.client.create_project().await?;
                let line = self.config.export.comment_line;
                if board.comment(line).is_empty() {
                    board.set_comment(line, &id.to_comment());
                }
                (id, url)
            }
        };

        let title = resolve_title(board);
        let session = self
            .client
            .upload_package(&upload_url, archive, &title)
            .await?;
        tracing::info!(project_id = %project, title = %title, "Package uploaded");

        loop {
            tokio::select! {
                _ = tokio::time::sleep(self.config.service.poll_interval()) => {}
                _ = cancel_requested(&mut self.cancel) => {
                    tracing::info!("Cancellation requested during remote build poll");
                    return Err(PushError::Cancelled);
                }
            }

            let polled = self.client.poll_progress(&session.callback).await?;
            tracing::debug!(remote_progress = polled, "Remote build progress");
            self.reporter.percent(scale_remote_progress(polled)).await;
            if polled >= 100 {
                break;
            }
        }

        if self.config.service.open_redirect {
            let _ = open::that(&session.redirect);
        }
        self.reporter.finished().await;

        Ok(PushOutcome {
            project: Some(project),
            delivery: Delivery::Remote {
                redirect: session.redirect,
            },
        })
    }

    fn ensure_not_cancelled(&self) -> Result<()> {
        if *self.cancel.borrow() {
            Err(PushError::Cancelled)
        } else {
            Ok(())
        }
    }
}

/// Design title, falling back to the design file's base name
fn resolve_title(board: &dyn BoardSource) -> String {
    let title = board.title();
    if !title.is_empty() {
        return title;
    }
    board
        .file_path()
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "board".to_string())
}

/// Maps polled remote progress onto the caller-visible scale
///
/// Upload accounts for the 40% baseline; the remote build contributes up to
/// `floor(100 / 1.7) = 58` more, so the scale tops out at 98 until the
/// finish step emits the terminal event. The sub-100 ceiling is the
/// observed behavior of the original exporter and is kept as-is.
fn scale_remote_progress(polled: u8) -> u8 {
    40 + (f64::from(polled.min(100)) / 1.7) as u8
}

/// Resolves once the caller asserts the cancellation signal
///
/// If the cancellation handle is gone nobody can request a stop anymore,
/// so the future never resolves.
async fn cancel_requested(cancel: &mut watch::Receiver<bool>) {
    if cancel.wait_for(|stop| *stop).await.is_err() {
        std::future::pending::<()>().await;
    }
}
