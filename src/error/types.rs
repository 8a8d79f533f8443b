use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

/// Shown for every transport or server failure; the detailed cause only goes to the log.
pub const UPLOAD_FAILED_MESSAGE: &str = "Error uploading the file. Please try again.";

/// Problems detected locally, before anything touches the network.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please select a PDF file")]
    NotPdf,

    #[error("Please select a file")]
    NoFile,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Selected file is not a PDF")]
    InvalidFileType,

    #[error("No file selected")]
    MissingFile,

    #[error("A submission is already in progress")]
    SubmissionInProgress,

    #[error("Upload rejected by analysis service (status {status}): {message}")]
    Upstream { status: u16, message: String },

    #[error("Upload transport failed: {message}")]
    Transport { message: String },

    #[error("Invalid upload form: {message}")]
    InvalidFile { message: String },

    #[error("Upload form exceeds the request size limit")]
    PayloadTooLarge,

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Template rendering failed: {message}")]
    Template { message: String },

    #[error("Internal server error: {message}")]
    Internal { message: String },
}

impl AppError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::InvalidFileType => "INVALID_FILE_TYPE",
            AppError::MissingFile => "MISSING_FILE",
            AppError::SubmissionInProgress => "SUBMISSION_IN_PROGRESS",
            AppError::Upstream { .. } => "UPSTREAM_ERROR",
            AppError::Transport { .. } => "TRANSPORT_ERROR",
            AppError::InvalidFile { .. } => "INVALID_FILE",
            AppError::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
            AppError::ConfigError { .. } => "CONFIG_ERROR",
            AppError::Template { .. } => "TEMPLATE_ERROR",
            AppError::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidFileType => StatusCode::BAD_REQUEST,
            AppError::MissingFile => StatusCode::BAD_REQUEST,
            AppError::SubmissionInProgress => StatusCode::CONFLICT,
            AppError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            AppError::Transport { .. } => StatusCode::BAD_GATEWAY,
            AppError::InvalidFile { .. } => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::ConfigError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Template { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-local failures that never reached the network.
    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::InvalidFileType | AppError::MissingFile)
    }

    /// The text a user gets to see. Everything past validation collapses to
    /// one generic message.
    pub fn user_message(&self) -> String {
        match self {
            AppError::InvalidFileType => ValidationError::NotPdf.to_string(),
            AppError::MissingFile => ValidationError::NoFile.to_string(),
            AppError::SubmissionInProgress => "Your CV is already being uploaded".to_string(),
            _ => UPLOAD_FAILED_MESSAGE.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();
        let message = self.to_string();
        let timestamp = chrono::Utc::now().to_rfc3339();

        // Runs inside the request span, which carries the request id.
        tracing::error!(
            error_code = error_code,
            status_code = %status,
            error_message = %message,
            "API error occurred"
        );

        let body = Json(json!({
            "success": false,
            "error": {
                "code": error_code,
                "message": self.user_message(),
                "timestamp": timestamp
            }
        }));

        (status, body).into_response()
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::NotPdf => AppError::InvalidFileType,
            ValidationError::NoFile => AppError::MissingFile,
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Transport {
            message: err.to_string(),
        }
    }
}

impl From<handlebars::RenderError> for AppError {
    fn from(err: handlebars::RenderError) -> Self {
        AppError::Template {
            message: err.to_string(),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal {
            message: err.to_string(),
        }
    }
}

impl AppError {
    pub fn config(message: impl Into<String>) -> Self {
        AppError::ConfigError {
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        AppError::Transport {
            message: message.into(),
        }
    }

    pub fn invalid_file(message: impl Into<String>) -> Self {
        AppError::InvalidFile {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        AppError::Internal {
            message: message.into(),
        }
    }
}
