//! HTML for the single page: a static shell around the upload form.

use handlebars::Handlebars;
use once_cell::sync::Lazy;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::models::FormView;

pub const PAGE_TITLE: &str = "CV Analysis";
pub const PAGE_DESCRIPTION: &str =
    "Upload your CV as a PDF and we will email you a detailed analysis.";

const PAGE: &str = "page";
const PAGE_TEMPLATE: &str = include_str!("../../templates/page.hbs");

static TEMPLATES: Lazy<Result<Handlebars<'static>, String>> = Lazy::new(|| {
    let mut handlebars = Handlebars::new();
    handlebars.set_strict_mode(false);
    handlebars
        .register_template_string(PAGE, PAGE_TEMPLATE)
        .map_err(|e| e.to_string())?;
    Ok(handlebars)
});

#[derive(Debug, Serialize)]
struct PageContext<'a> {
    title: &'a str,
    description: &'a str,
    form: &'a FormView,
    session_id: Option<&'a str>,
}

/// Renders the page shell with the form in the given state. `session_id`
/// names a server-side session holding the selected file, so a resubmit
/// works without the browser sending the file again.
pub fn render_page(form: &FormView, session_id: Option<&str>) -> AppResult<String> {
    let templates = TEMPLATES.as_ref().map_err(|e| AppError::Template {
        message: e.clone(),
    })?;

    let context = PageContext {
        title: PAGE_TITLE,
        description: PAGE_DESCRIPTION,
        form,
        session_id,
    };

    Ok(templates.render(PAGE, &context)?)
}
