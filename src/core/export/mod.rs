//! Export pipeline stages
//!
//! Each stage is its own module: artifact rendering, catalog building,
//! package assembly, local-delivery routing, and the coordinator that
//! sequences them.

pub mod artifacts;
pub mod catalog;
pub mod coordinator;
pub mod package;
pub mod router;

pub use artifacts::ArtifactGenerator;
pub use coordinator::{Delivery, PushCanceller, PushCoordinator, PushHandle, PushOutcome};
pub use package::ScratchArea;
