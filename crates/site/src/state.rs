// crates/site/src/state.rs

use crate::settings::SiteSettings;
use render::template::TemplateRegistry;
use schema::registry::SchemaRegistry;
use std::path::PathBuf;
use std::sync::Arc;
use store::client::ContentClient;

/// Shared, read-only per-request state. Everything inside is either cheap to
/// clone or behind an `Arc`; handlers never mutate it.
#[derive(Clone)]
pub struct AppState {
    pub client: ContentClient,
    pub registry: Arc<SchemaRegistry>,
    pub templates: Arc<TemplateRegistry>,
    pub site: SiteSettings,
    /// Theme `static/` directory, when a theme provides one.
    pub static_dir: Option<PathBuf>,
}

impl AppState {
    #[tracing::instrument(skip_all)]
    pub fn new(
        client: ContentClient,
        registry: SchemaRegistry,
        templates: TemplateRegistry,
        site: SiteSettings,
        static_dir: Option<PathBuf>,
    ) -> Self {
        Self {
            client,
            registry: Arc::new(registry),
            templates: Arc::new(templates),
            site,
            static_dir,
        }
    }
}
