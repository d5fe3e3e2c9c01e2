// crates/site/src/router.rs

use axum::{routing::get, Router};
use tower_http::services::ServeDir;

use crate::handlers::{
    get_blog, get_contact, get_home, get_page, get_post, get_projects, post_contact,
};
use crate::state::AppState;

#[tracing::instrument(skip_all)]
pub fn build(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/", get(get_home))
        .route("/blog", get(get_blog))
        .route("/blog/{slug}", get(get_post))
        .route("/projects", get(get_projects))
        .route("/contact", get(get_contact).post(post_contact))
        .fallback(get(get_page));

    if let Some(dir) = &state.static_dir {
        router = router.nest_service("/static", ServeDir::new(dir));
    }

    router.with_state(state)
}
