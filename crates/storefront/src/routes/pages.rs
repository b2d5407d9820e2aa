//! Markdown informational page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, State};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::AppError;
use crate::filters;
use crate::middleware::RequestLocale;
use crate::routes::{Chrome, cart};
use crate::state::AppState;

/// Page display data for templates.
pub struct PageView {
    pub title: String,
    pub content_html: String,
}

/// Page path parameters.
#[derive(Debug, Deserialize)]
pub struct PageParams {
    pub slug: String,
}

/// Informational page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/show.html")]
pub struct PageShowTemplate {
    pub chrome: Chrome,
    pub page: PageView,
}

/// Display an informational page.
///
/// A page missing from the requested locale falls back to English; a slug
/// missing everywhere is a 404.
#[instrument(skip(state, session))]
pub async fn show(
    RequestLocale(locale): RequestLocale,
    State(state): State<AppState>,
    session: Session,
    Path(params): Path<PageParams>,
) -> Result<PageShowTemplate, AppError> {
    let page = state
        .content()
        .get_page(locale, &params.slug)
        .ok_or_else(|| AppError::NotFound(format!("page {}", params.slug)))?;

    let view = PageView {
        title: page.meta.title.clone(),
        content_html: page.content_html.clone(),
    };

    Ok(PageShowTemplate {
        chrome: Chrome::build(&state, locale, cart::session_count(&session, &state).await),
        page: view,
    })
}
