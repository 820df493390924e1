//! External integrations
//!
//! Adapters isolate the two collaborators the pipeline depends on: the
//! board design source (CAD engine) and the AISLER fabrication service.

pub mod board;
pub mod service;
