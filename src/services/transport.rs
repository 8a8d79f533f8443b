use async_trait::async_trait;
use reqwest::header::{HeaderValue, CONTENT_DISPOSITION, CONTENT_TYPE};
use reqwest::{Client, Url};
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::{SelectedFile, UpstreamErrorBody, PDF_MIME_TYPE};

/// Delivers a selected PDF to the analysis service.
#[async_trait]
pub trait UploadTransport: Send + Sync {
    async fn send(&self, file: &SelectedFile) -> AppResult<()>;
}

#[derive(Debug, Clone)]
pub enum Endpoint {
    /// Looked up through `Config::endpoint_url` on every send.
    FromEnv,
    Fixed(Url),
}

/// Raw-body POST over reqwest. No multipart, no base64, no retries.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    endpoint: Endpoint,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            endpoint: Endpoint::FromEnv,
        }
    }

    pub fn with_endpoint(url: Url) -> Self {
        Self {
            client: Client::new(),
            endpoint: Endpoint::Fixed(url),
        }
    }

    fn resolve_endpoint(&self) -> AppResult<Url> {
        match &self.endpoint {
            Endpoint::FromEnv => Config::endpoint_url(),
            Endpoint::Fixed(url) => Ok(url.clone()),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

/// `attachment; filename="<name>"`, with quotes and backslashes escaped so
/// the name stays inside the quoted string.
pub fn content_disposition(file_name: &str) -> AppResult<HeaderValue> {
    let escaped = file_name.replace('\\', "\\\\").replace('"', "\\\"");
    HeaderValue::from_str(&format!("attachment; filename=\"{}\"", escaped))
        .map_err(|e| AppError::invalid_file(format!("File name cannot be sent as a header: {}", e)))
}

#[async_trait]
impl UploadTransport for HttpTransport {
    async fn send(&self, file: &SelectedFile) -> AppResult<()> {
        let start = Instant::now();
        let url = self.resolve_endpoint()?;
        let disposition = content_disposition(file.name())?;

        info!(
            file_name = %file.name(),
            file_size = file.size(),
            endpoint = %url,
            "Uploading CV to analysis service"
        );

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, PDF_MIME_TYPE)
            .header(CONTENT_DISPOSITION, disposition)
            .body(file.content().clone())
            .send()
            .await?;

        let status = response.status();
        debug!(status = %status, elapsed_ms = start.elapsed().as_millis() as u64, "Analysis service responded");

        if !status.is_success() {
            let body = response.bytes().await?;
            let message = UpstreamErrorBody::detail(&body, status.as_u16());
            warn!(status = %status, detail = %message, "Analysis service rejected the upload");
            return Err(AppError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        info!(
            file_name = %file.name(),
            duration_ms = start.elapsed().as_millis() as u64,
            "CV upload accepted"
        );
        Ok(())
    }
}
