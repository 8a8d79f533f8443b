use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::error::{AppError, AppResult, ValidationError};
use crate::models::{FormState, FormView, PickedFile, SelectedFile};
use crate::services::UploadTransport;

struct Session {
    state: FormState,
    // Bumped on every submit and reset; a settling request only applies its
    // outcome if the number it started with is still current.
    generation: u64,
}

/// The CV upload form: file selection, validation, submission and the
/// resulting status, for one form session.
///
/// All transitions happen under one lock, and `submit` moves to
/// `Submitting` before the request goes out, so at most one request is in
/// flight per form no matter how calls interleave.
pub struct UploadForm {
    transport: Arc<dyn UploadTransport>,
    session: Mutex<Session>,
}

impl UploadForm {
    pub fn new(transport: Arc<dyn UploadTransport>) -> Self {
        Self {
            transport,
            session: Mutex::new(Session {
                state: FormState::Idle,
                generation: 0,
            }),
        }
    }

    pub fn state(&self) -> FormState {
        self.session.lock().state.clone()
    }

    pub fn view(&self) -> FormView {
        self.session.lock().state.view()
    }

    /// Handles a file-picker change. `None` means the picker was dismissed
    /// and leaves everything as it was.
    pub fn select_file(&self, picked: Option<PickedFile>) -> AppResult<()> {
        let Some(picked) = picked else {
            debug!("File picker dismissed without a selection");
            return Ok(());
        };

        let mut session = self.session.lock();
        if session.state.is_submitting() {
            warn!(file_name = %picked.name, "Selection ignored while a submission is in flight");
            return Err(AppError::SubmissionInProgress);
        }

        match SelectedFile::try_from(picked) {
            Ok(file) => {
                debug!(file_name = %file.name(), file_size = file.size(), "PDF selected");
                session.state = FormState::Ready(file);
                Ok(())
            }
            Err(err) => {
                info!("Rejected non-PDF selection");
                session.state = FormState::Rejected(err);
                Err(err.into())
            }
        }
    }

    /// Sends the selected file. Validation failures come back as
    /// `InvalidFileType`/`MissingFile` without touching the network; any
    /// other error is the detailed cause behind the generic message now held
    /// in the form state.
    pub async fn submit(&self) -> AppResult<()> {
        let (file, generation) = {
            let mut session = self.session.lock();
            let file = match &session.state {
                FormState::Ready(file) | FormState::Failed { file, .. } => Some(file.clone()),
                FormState::Submitting(_) => {
                    warn!("Submit ignored while a submission is in flight");
                    return Err(AppError::SubmissionInProgress);
                }
                FormState::Idle | FormState::Rejected(_) | FormState::Success => None,
            };
            let Some(file) = file else {
                session.state = FormState::Rejected(ValidationError::NoFile);
                return Err(AppError::MissingFile);
            };

            session.generation += 1;
            session.state = FormState::Submitting(file.clone());
            (file, session.generation)
        };

        let outcome = self.transport.send(&file).await;

        let mut session = self.session.lock();
        if session.generation != generation {
            debug!(generation, "Form was reset while uploading; discarding outcome");
            return outcome;
        }

        session.state = match &outcome {
            Ok(()) => FormState::Success,
            Err(err) => {
                error!(file_name = %file.name(), error = %err, "Upload error");
                FormState::failed(file)
            }
        };
        outcome
    }

    /// Clears the form back to its initial state, as resetting the file
    /// input does.
    pub fn reset(&self) {
        let mut session = self.session.lock();
        session.generation += 1;
        session.state = FormState::Idle;
    }
}
