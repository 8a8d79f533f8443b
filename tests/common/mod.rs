#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use cv_upload::error::{AppError, AppResult};
use cv_upload::models::{PickedFile, SelectedFile};
use cv_upload::UploadTransport;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Notify;

pub fn pdf(name: &str, content: &[u8]) -> PickedFile {
    PickedFile::new(name, content.to_vec()).with_mime_type("application/pdf")
}

#[derive(Debug, Clone, Copy)]
pub enum Reply {
    Accept,
    Reject { status: u16, error: &'static str },
    Unreachable,
}

/// Records every file it is asked to send and answers with the current reply.
pub struct RecordingTransport {
    reply: Mutex<Reply>,
    sent: Mutex<Vec<(String, Bytes)>>,
}

impl RecordingTransport {
    pub fn new(reply: Reply) -> Self {
        Self {
            reply: Mutex::new(reply),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn set_reply(&self, reply: Reply) {
        *self.reply.lock() = reply;
    }

    pub fn sent(&self) -> Vec<(String, Bytes)> {
        self.sent.lock().clone()
    }

    pub fn calls(&self) -> usize {
        self.sent.lock().len()
    }
}

#[async_trait]
impl UploadTransport for RecordingTransport {
    async fn send(&self, file: &SelectedFile) -> AppResult<()> {
        self.sent
            .lock()
            .push((file.name().to_string(), file.content().clone()));

        let reply = *self.reply.lock();
        match reply {
            Reply::Accept => Ok(()),
            Reply::Reject { status, error } => Err(AppError::Upstream {
                status,
                message: error.to_string(),
            }),
            Reply::Unreachable => Err(AppError::transport("connection refused")),
        }
    }
}

/// Holds every send until released, so tests can look at the form while a
/// request is in flight.
#[derive(Default)]
pub struct GatedTransport {
    pub entered: Notify,
    pub release: Notify,
    calls: AtomicUsize,
}

impl GatedTransport {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UploadTransport for GatedTransport {
    async fn send(&self, _file: &SelectedFile) -> AppResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.entered.notify_one();
        self.release.notified().await;
        Ok(())
    }
}
