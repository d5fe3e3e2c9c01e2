// crates/site/src/handlers.rs

//! Request handlers.
//!
//! The omission policy from the content layer carries through here: missing
//! optional content renders as less page, not as an error. Only a routed
//! document that does not exist at all becomes a 404. A `SiteError` escaping
//! a handler means a server fault (template failure), never a content miss.

use crate::error::SiteError;
use crate::state::AppState;
use axum::{
    extract::{Form, Path, State},
    http::{StatusCode, Uri},
    response::{Html, IntoResponse as _, Response},
};
use chrono::{Datelike, Utc};
use render::view::{HomeView, PageView, PostSummary, PostView};
use schema::homepage::HomepageConfig;
use serde::Deserialize;
use serde_json::{json, Value as Json};
use tracing::{info, warn};

type Result<T> = std::result::Result<T, SiteError>;

/// Render a registered template into a full response, with the site metadata
/// and current year folded into the model for the layout.
fn render_page(state: &AppState, template: &str, mut model: Json) -> Result<Response> {
    if let Some(obj) = model.as_object_mut() {
        obj.insert("site".into(), json!(state.site));
        obj.insert("year".into(), json!(Utc::now().year()));
    }

    let html = state.templates.render_to_string(template, &model)?;
    Ok(Html(html).into_response())
}

fn not_found(state: &AppState, path: &str) -> Result<Response> {
    let mut resp = render_page(state, "not_found", json!({ "path": path }))?;
    *resp.status_mut() = StatusCode::NOT_FOUND;
    Ok(resp)
}

#[tracing::instrument(skip_all)]
pub async fn get_home(State(state): State<AppState>) -> Result<Response> {
    // No homepage document means an all-defaults config: every section
    // absent, page still renders.
    let config = state
        .client
        .singleton("homepage")
        .map(|doc| HomepageConfig::from_document(&doc))
        .unwrap_or_default();

    let view = HomeView::build(&state.client, &config);
    render_page(&state, "home", json!({ "home": view }))
}

#[tracing::instrument(skip_all)]
pub async fn get_blog(State(state): State<AppState>) -> Result<Response> {
    let posts: Vec<PostSummary> = state
        .client
        .posts(None)
        .iter()
        .filter_map(PostSummary::from_document)
        .collect();

    render_page(&state, "blog", json!({ "posts": posts }))
}

#[tracing::instrument(skip_all)]
pub async fn get_post(State(state): State<AppState>, Path(slug): Path<String>) -> Result<Response> {
    let Some(doc) = state.client.document("post", &slug) else {
        return not_found(&state, &format!("/blog/{slug}"));
    };

    match PostView::build(&state.client, &doc) {
        Some(view) => render_page(&state, "post", json!({ "post": view })),
        None => {
            warn!("post {slug} is missing required fields");
            not_found(&state, &format!("/blog/{slug}"))
        }
    }
}

fn page_response(state: &AppState, slug: &str) -> Result<Response> {
    let Some(doc) = state.client.document("page", slug) else {
        return not_found(state, &format!("/{slug}"));
    };

    match PageView::from_document(&doc) {
        Some(view) => render_page(state, "page", json!({ "page": view })),
        None => not_found(state, &format!("/{slug}")),
    }
}

#[tracing::instrument(skip_all)]
pub async fn get_projects(State(state): State<AppState>) -> Result<Response> {
    page_response(&state, "projects")
}

/// Fallback: any single-segment path is a candidate `page` slug.
#[tracing::instrument(skip_all)]
pub async fn get_page(State(state): State<AppState>, uri: Uri) -> Result<Response> {
    let path = uri.path();
    let slug = path.trim_matches('/');
    if slug.is_empty() || slug.contains('/') {
        return not_found(&state, path);
    }
    page_response(&state, slug)
}

#[tracing::instrument(skip_all)]
pub async fn get_contact(State(state): State<AppState>) -> Result<Response> {
    render_page(&state, "contact", json!({}))
}

#[derive(Debug, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[tracing::instrument(skip_all)]
pub async fn post_contact(
    State(state): State<AppState>,
    Form(form): Form<ContactForm>,
) -> Result<Response> {
    if form.name.trim().is_empty() || form.email.trim().is_empty() {
        let mut resp = render_page(&state, "contact", json!({}))?;
        *resp.status_mut() = StatusCode::UNPROCESSABLE_ENTITY;
        return Ok(resp);
    }

    // No mail backend; submissions are recorded in the log under an id the
    // operator can search for.
    let id = uuid::Uuid::new_v4();
    tokio::time::sleep(std::time::Duration::from_millis(300)).await;
    info!(
        submission = %id,
        name = %form.name.trim(),
        email = %form.email.trim(),
        chars = form.message.len(),
        "contact form received"
    );

    render_page(&state, "contact_thanks", json!({}))
}
