use std::sync::Arc;

use crate::services::{FormSessions, HttpTransport, UploadTransport};

/// Shared across handlers. Each upload request resumes or starts a form
/// session on top of the transport.
#[derive(Clone)]
pub struct AppState {
    pub transport: Arc<dyn UploadTransport>,
    pub sessions: Arc<FormSessions>,
}

impl AppState {
    pub fn new(transport: Arc<dyn UploadTransport>) -> Self {
        Self {
            transport,
            sessions: Arc::new(FormSessions::default()),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Arc::new(HttpTransport::new()))
    }
}
