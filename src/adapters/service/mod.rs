//! AISLER service adapter
//!
//! HTTP client and wire models for the fabrication service's JSON surface.

pub mod client;
pub mod models;

pub use client::AislerClient;
pub use models::{NewProjectResponse, PollResponse, UploadSession};
