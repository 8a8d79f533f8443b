use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;
use uuid::Uuid;

use crate::services::{UploadForm, UploadTransport};

pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(30 * 60);

struct Entry {
    form: Arc<UploadForm>,
    touched: Instant,
}

/// Form sessions that still hold a selected file after a failed submit, so
/// the page can resubmit them without the browser sending the file again.
pub struct FormSessions {
    ttl: Duration,
    entries: Mutex<HashMap<Uuid, Entry>>,
}

impl FormSessions {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Looks up the session named by the page, or starts a fresh one when
    /// the id is absent, malformed, unknown or expired.
    pub fn resume(
        &self,
        id: Option<&str>,
        transport: &Arc<dyn UploadTransport>,
    ) -> (Uuid, Arc<UploadForm>) {
        let mut entries = self.entries.lock();
        self.prune(&mut entries);

        if let Some(id) = id.and_then(|raw| Uuid::parse_str(raw.trim()).ok()) {
            if let Some(entry) = entries.get_mut(&id) {
                entry.touched = Instant::now();
                debug!(session_id = %id, "Resuming form session");
                return (id, entry.form.clone());
            }
            debug!(session_id = %id, "Form session unknown or expired");
        }

        (Uuid::new_v4(), Arc::new(UploadForm::new(transport.clone())))
    }

    /// Stores the session while it still has a file to retry, drops it
    /// otherwise. Returns whether it was kept.
    pub fn settle(&self, id: Uuid, form: &Arc<UploadForm>) -> bool {
        let mut entries = self.entries.lock();
        if form.state().selected_file().is_some() {
            entries.insert(
                id,
                Entry {
                    form: form.clone(),
                    touched: Instant::now(),
                },
            );
            true
        } else {
            entries.remove(&id);
            false
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn prune(&self, entries: &mut HashMap<Uuid, Entry>) {
        let ttl = self.ttl;
        entries.retain(|_, entry| entry.touched.elapsed() < ttl);
    }
}

impl Default for FormSessions {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_TTL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AppError, AppResult};
    use crate::models::{PickedFile, SelectedFile};
    use async_trait::async_trait;

    struct Refusing;

    #[async_trait]
    impl UploadTransport for Refusing {
        async fn send(&self, _file: &SelectedFile) -> AppResult<()> {
            Err(AppError::transport("connection refused"))
        }
    }

    fn transport() -> Arc<dyn UploadTransport> {
        Arc::new(Refusing)
    }

    async fn failed_form(sessions: &FormSessions) -> Uuid {
        let (id, form) = sessions.resume(None, &transport());
        form.select_file(Some(
            PickedFile::new("cv.pdf", b"%PDF".to_vec()).with_mime_type("application/pdf"),
        ))
        .unwrap();
        let _ = form.submit().await;
        assert!(sessions.settle(id, &form));
        id
    }

    #[tokio::test]
    async fn test_failed_session_is_resumed() {
        let sessions = FormSessions::default();
        let id = failed_form(&sessions).await;

        let (resumed_id, form) = sessions.resume(Some(&id.to_string()), &transport());

        assert_eq!(resumed_id, id);
        assert_eq!(form.state().selected_file().map(|f| f.name().to_string()).as_deref(), Some("cv.pdf"));
    }

    #[tokio::test]
    async fn test_unknown_id_starts_fresh_session() {
        let sessions = FormSessions::default();
        let id = failed_form(&sessions).await;

        let (fresh_id, form) = sessions.resume(Some("not-a-uuid"), &transport());

        assert_ne!(fresh_id, id);
        assert!(form.state().selected_file().is_none());
    }

    #[tokio::test]
    async fn test_expired_sessions_are_pruned() {
        let sessions = FormSessions::new(Duration::ZERO);
        let id = failed_form(&sessions).await;

        let (fresh_id, _) = sessions.resume(Some(&id.to_string()), &transport());

        assert_ne!(fresh_id, id);
        assert!(sessions.is_empty());
    }

    #[tokio::test]
    async fn test_session_without_file_is_dropped() {
        let sessions = FormSessions::default();
        let id = failed_form(&sessions).await;
        let (_, form) = sessions.resume(Some(&id.to_string()), &transport());

        form.reset();

        assert!(!sessions.settle(id, &form));
        assert!(sessions.is_empty());
    }
}
