//! Progress delivery to the caller
//!
//! The pipeline runs on its own worker task; progress crosses to the caller
//! through a bounded channel. Single producer, so receipt order matches
//! emission order. Delivery is fire-and-forget: a caller that dropped its
//! receiver never fails the pipeline.

use crate::domain::ProgressEvent;
use tokio::sync::mpsc;

/// Default capacity of the progress channel
pub const DEFAULT_CHANNEL_CAPACITY: usize = 64;

/// Sends progress events into the caller's channel
#[derive(Clone)]
pub struct ProgressReporter {
    tx: mpsc::Sender<ProgressEvent>,
}

impl ProgressReporter {
    /// Creates a reporter and the receiver the caller consumes
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<ProgressEvent>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx }, rx)
    }

    /// Delivers one event; every call is delivered, none are coalesced
    pub async fn report(&self, event: ProgressEvent) {
        if self.tx.send(event).await.is_err() {
            tracing::debug!(?event, "Progress receiver dropped, event discarded");
        }
    }

    /// Reports a percentage in `0..=100`
    pub async fn percent(&self, percent: u8) {
        self.report(ProgressEvent::Percent(percent)).await;
    }

    /// Reports the terminal finished/idle event
    pub async fn finished(&self) {
        self.report(ProgressEvent::Finished).await;
    }
}
