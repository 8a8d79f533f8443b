//! CV Upload
//!
//! A single-page service where a user uploads a PDF resume. The file is
//! posted as-is to a remote analysis service, which emails the results.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod render;
pub mod services;
pub mod state;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use handlers::create_router;
pub use services::{HttpTransport, UploadForm, UploadTransport};
pub use state::AppState;
