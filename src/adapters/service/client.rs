//! AISLER service HTTP client
//!
//! Thin client over the service's JSON endpoints. Transport and service
//! failures map into [`ServiceError`] here; callers never see the HTTP
//! client's own error types. No retries: any failure is fatal to the run.

use super::models::{NewProjectResponse, PollResponse, UploadSession};
use crate::config::ServiceConfig;
use crate::domain::{ProjectId, PushError, Result, ServiceError};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, ClientBuilder, Response};
use std::path::Path;
use std::time::Duration;

/// Client for the AISLER fabrication service
pub struct AislerClient {
    /// HTTP client for making requests
    http: Client,

    /// Service base URL, e.g. `https://aisler.net`
    base_url: String,

    /// Client tag sent when requesting a new project
    client_ref: String,
}

impl AislerClient {
    /// Creates a client from the service configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        let http = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| PushError::Configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client_ref: config.client_ref.clone(),
        })
    }

    /// Upload target URL for an already-linked project
    pub fn upload_url_for(&self, project: &ProjectId) -> String {
        format!("{}/p/{}/uploads.json", self.base_url, project)
    }

    /// Requests a new project from the service
    ///
    /// Returns the fresh project identifier together with the upload target
    /// URL the service assigned to it.
    pub async fn create_project(&self) -> Result<(ProjectId, String)> {
        let url = format!("{}/p/new.json", self.base_url);

        tracing::info!(url = %url, client_ref = %self.client_ref, "Requesting new project");

        let response = self
            .http
            .get(&url)
            .query(&[("ref", self.client_ref.as_str())])
            .send()
            .await
            .map_err(|e| ServiceError::ConnectionFailed(e.to_string()))?;

        let response = ensure_success(response).await?;
        let body: NewProjectResponse = response
            .json()
            .await
            .map_err(|e| ServiceError::InvalidResponse(e.to_string()))?;

        let project = ProjectId::new(&body.project_id)
            .map_err(ServiceError::InvalidResponse)
            .map_err(PushError::from)?;

        tracing::info!(project_id = %project, "New project created");
        Ok((project, body.upload_url))
    }

    /// Uploads the manufacturing package under the given title
    ///
    /// Submits the archive and title as a multipart form and parses the
    /// response into an [`UploadSession`].
    pub async fn upload_package(
        &self,
        upload_url: &str,
        archive: &Path,
        title: &str,
    ) -> Result<UploadSession> {
        let bytes = tokio::fs::read(archive).await?;
        let file_name = archive
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "package.zip".to_string());

        tracing::info!(
            upload_url = %upload_url,
            title = %title,
            size_bytes = bytes.len(),
            "Uploading manufacturing package"
        );

        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str("application/zip")
            .map_err(|e| ServiceError::InvalidResponse(e.to_string()))?;
        let form = Form::new()
            .part("upload[file]", part)
            .text("upload[title]", title.to_string());

        let response = self
            .http
            .post(upload_url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| ServiceError::ConnectionFailed(e.to_string()))?;

        let response = ensure_success(response).await?;
        let session: UploadSession = response
            .json()
            .await
            .map_err(|e| ServiceError::InvalidResponse(e.to_string()))?;
        Ok(session)
    }

    /// Fetches the remote build progress from the callback URL
    ///
    /// Returns a percentage clamped to `0..=100`.
    pub async fn poll_progress(&self, callback_url: &str) -> Result<u8> {
        let response = self
            .http
            .get(callback_url)
            .send()
            .await
            .map_err(|e| ServiceError::ConnectionFailed(e.to_string()))?;

        let response = ensure_success(response).await?;
        let body: PollResponse = response
            .json()
            .await
            .map_err(|e| ServiceError::InvalidResponse(e.to_string()))?;
        Ok(body.progress.min(100))
    }
}

/// Splits non-2xx responses into client/server error variants
async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response.text().await.unwrap_or_default();
    let err = if status.is_client_error() {
        ServiceError::ClientError {
            status: status.as_u16(),
            message,
        }
    } else {
        ServiceError::ServerError {
            status: status.as_u16(),
            message,
        }
    };
    Err(err.into())
}
