//! Domain models and types for the push pipeline.
//!
//! This module contains the core domain types and business rules:
//!
//! - **Strongly-typed identity** ([`ProjectId`]): the title-block linkage
//!   pattern is parsed and rendered in exactly one place
//! - **Component catalog types** ([`ComponentRecord`], [`PartAttributes`],
//!   [`MountType`], [`Side`])
//! - **Progress events** ([`ProgressEvent`])
//! - **Error types** ([`PushError`], [`ServiceError`]) and the
//!   [`Result`] alias
//!
//! # Type Safety
//!
//! The project identifier uses the newtype pattern so a raw comment string
//! can never be confused with a validated identity:
//!
//! ```
//! use aisler_push::domain::ProjectId;
//!
//! let id = ProjectId::from_comment("AISLER Project ID: ABCDEFGH");
//! assert!(id.is_some());
//!
//! // Anything else means "no linked project", never an error
//! assert!(ProjectId::from_comment("rev B, do not fab").is_none());
//! ```

pub mod component;
pub mod errors;
pub mod progress;
pub mod project;
pub mod result;

// Re-export commonly used types for convenience
pub use component::{ComponentRecord, MountType, PartAttributes, Side};
pub use errors::{PushError, ServiceError};
pub use progress::ProgressEvent;
pub use project::ProjectId;
pub use result::Result;
