use axum::response::Html;
use tracing::debug;

use crate::error::AppResult;
use crate::models::FormView;
use crate::render::render_page;

/// Page shell with an empty form.
pub async fn page_handler() -> AppResult<Html<String>> {
    debug!("Rendering upload page");
    Ok(Html(render_page(&FormView::default(), None)?))
}
