use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::{HeaderMap, StatusCode},
    response::Html,
};
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult};
use crate::middleware::request_id;
use crate::models::{FormView, PickedFile};
use crate::render::render_page;
use crate::state::AppState;

/// Name of the file input in the page form.
pub const FILE_FIELD: &str = "cv";
/// Hidden field naming a form session kept from a failed submit.
pub const SESSION_FIELD: &str = "session";

/// What the browser posted: maybe a file, maybe a session to resume.
#[derive(Debug, Default)]
struct Submission {
    session: Option<String>,
    file: Option<PickedFile>,
}

/// Form submission: resumes the posted form session (or starts one),
/// selects the posted file, submits, and answers with the page showing the
/// outcome. A session that still holds a file after a failure is kept, so
/// resubmitting the page retries without a new selection.
pub async fn upload_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Html<String>)> {
    let start = Instant::now();
    let request_id = request_id(&headers);

    info!(request_id = %request_id, "Starting CV upload request");

    let submission = match read_submission(&mut multipart).await {
        Ok(submission) => submission,
        Err(e) => {
            warn!(
                request_id = %request_id,
                error_code = e.error_code(),
                error = %e,
                "Upload form could not be read"
            );
            let view = FormView {
                error_message: Some(e.user_message()),
                ..FormView::default()
            };
            return Ok((e.status_code(), Html(render_page(&view, None)?)));
        }
    };

    let (session_id, form) = state
        .sessions
        .resume(submission.session.as_deref(), &state.transport);

    let outcome = match form.select_file(submission.file) {
        Ok(()) => form.submit().await,
        Err(e) => Err(e),
    };

    let status = match &outcome {
        Ok(()) => {
            info!(
                request_id = %request_id,
                total_time_ms = start.elapsed().as_millis() as u64,
                "CV upload completed successfully"
            );
            StatusCode::OK
        }
        Err(e) => {
            warn!(
                request_id = %request_id,
                error_code = e.error_code(),
                error = %e,
                "CV upload did not complete"
            );
            e.status_code()
        }
    };

    let kept = state.sessions.settle(session_id, &form);
    let session = kept.then(|| session_id.to_string());

    Ok((status, Html(render_page(&form.view(), session.as_deref())?)))
}

fn multipart_error(context: &str, err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge
    } else {
        AppError::invalid_file(format!("{}: {}", context, err))
    }
}

/// Reads the form fields. A file input left empty is posted by browsers as
/// a part with no file name and no bytes; that counts as no selection.
async fn read_submission(multipart: &mut Multipart) -> AppResult<Submission> {
    let mut submission = Submission::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error("Failed to read multipart field", e))?
    {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some(SESSION_FIELD) => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| multipart_error("Failed to read session field", e))?;
                submission.session = Some(value).filter(|v| !v.trim().is_empty());
            }
            Some(FILE_FIELD) => {
                let file_name = field.file_name().unwrap_or("").to_string();
                let content_type = field.content_type().map(|ct| ct.to_string());

                let data = field
                    .bytes()
                    .await
                    .map_err(|e| multipart_error("Failed to read file data", e))?;

                if file_name.is_empty() && data.is_empty() {
                    debug!("File field posted without a selection");
                    continue;
                }

                let mut file = PickedFile::new(file_name, data);
                if let Some(mime_type) = content_type {
                    file = file.with_mime_type(mime_type);
                }

                debug!(
                    "Received file: {} ({} bytes, type: {:?})",
                    file.name,
                    file.content.len(),
                    file.mime_type
                );

                submission.file = Some(file);
            }
            _ => continue,
        }
    }

    Ok(submission)
}
