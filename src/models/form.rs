use serde::Serialize;

use crate::error::{ValidationError, UPLOAD_FAILED_MESSAGE};
use crate::models::SelectedFile;

pub const SUCCESS_MESSAGE: &str =
    "CV uploaded successfully. We will notify you by email once we have reviewed it.";

/// Where a single form session stands. Combinations such as "submitting
/// without a file" or "success with an error" have no variant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormState {
    #[default]
    Idle,
    Rejected(ValidationError),
    Ready(SelectedFile),
    Submitting(SelectedFile),
    Success,
    Failed { file: SelectedFile, message: String },
}

impl FormState {
    pub fn selected_file(&self) -> Option<&SelectedFile> {
        match self {
            FormState::Ready(file) | FormState::Submitting(file) => Some(file),
            FormState::Failed { file, .. } => Some(file),
            FormState::Idle | FormState::Rejected(_) | FormState::Success => None,
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, FormState::Submitting(_))
    }

    pub fn is_success(&self) -> bool {
        matches!(self, FormState::Success)
    }

    pub fn error_message(&self) -> Option<String> {
        match self {
            FormState::Rejected(err) => Some(err.to_string()),
            FormState::Failed { message, .. } => Some(message.clone()),
            _ => None,
        }
    }

    pub(crate) fn failed(file: SelectedFile) -> Self {
        FormState::Failed {
            file,
            message: UPLOAD_FAILED_MESSAGE.to_string(),
        }
    }

    pub fn view(&self) -> FormView {
        let file_name = self.selected_file().map(|f| f.name().to_string());
        let is_submitting = self.is_submitting();

        FormView {
            can_submit: file_name.is_some() && !is_submitting,
            file_name,
            is_submitting,
            is_success: self.is_success(),
            error_message: self.error_message(),
            success_message: self.is_success().then(|| SUCCESS_MESSAGE.to_string()),
        }
    }
}

/// Serializable snapshot handed to the page renderer.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FormView {
    pub file_name: Option<String>,
    pub is_submitting: bool,
    pub is_success: bool,
    pub error_message: Option<String>,
    pub success_message: Option<String>,
    pub can_submit: bool,
}

impl Default for FormView {
    fn default() -> Self {
        FormState::Idle.view()
    }
}
