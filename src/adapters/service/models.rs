//! Wire models for the AISLER service
//!
//! JSON shapes of the three endpoints the pipeline touches: project
//! creation, package upload, and build-progress polling.

use serde::Deserialize;

/// Response of `GET {base}/p/new.json?ref=<client-tag>`
#[derive(Debug, Clone, Deserialize)]
pub struct NewProjectResponse {
    /// Freshly assigned project identifier (8 uppercase letters)
    pub project_id: String,

    /// Where to POST the manufacturing package
    pub upload_url: String,
}

/// Response of the multipart package upload
///
/// Exists only for the duration of one remote sync run.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadSession {
    /// URL polled for build progress
    pub callback: String,

    /// URL the user is sent to once the build finishes
    pub redirect: String,
}

/// Response of one progress poll against the callback URL
#[derive(Debug, Clone, Deserialize)]
pub struct PollResponse {
    /// Remote build progress in percent, 0-100
    pub progress: u8,
}
