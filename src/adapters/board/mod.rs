//! Board design-source adapters
//!
//! The [`BoardSource`] trait is the boundary to the CAD engine that owns the
//! design. [`BoardSnapshot`] is the built-in implementation for JSON design
//! snapshots.

pub mod snapshot;
pub mod source;

pub use snapshot::BoardSnapshot;
pub use source::{
    BoardSource, DrillOptions, Layer, LayerPlanStep, PlacedPart, PlotOptions,
};
