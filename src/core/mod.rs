//! Core pipeline logic
//!
//! Houses the export stages and the progress channel that carries status
//! from the worker task back to the caller.

pub mod export;
pub mod progress;

pub use export::{Delivery, PushCoordinator, PushHandle, PushOutcome};
pub use progress::ProgressReporter;
