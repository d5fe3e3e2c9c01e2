// crates/store/src/client.rs

//! The content client handed to the rendering layer.
//!
//! Explicitly constructed and passed down (never a module-level singleton) so
//! tests can substitute a fixture store. A deployment is identified by an
//! opaque `(project_id, dataset)` pair; the client only reads.

use crate::query::{Filter, FindOptions};
use crate::store::ContentStore;
use schema::doc::ContentDocument;
use serde::Serialize;
use serde_json::{json, Value as Json};
use std::sync::Arc;
use tracing::debug;

#[derive(Clone)]
pub struct ContentClient {
    project_id: String,
    dataset: String,
    store: Arc<dyn ContentStore>,
}

/// Display fields projected from a resolved `author` reference.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthorCard {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl ContentClient {
    pub fn new(
        project_id: impl Into<String>,
        dataset: impl Into<String>,
        store: Arc<dyn ContentStore>,
    ) -> Self {
        Self {
            project_id: project_id.into(),
            dataset: dataset.into(),
            store,
        }
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn dataset(&self) -> &str {
        &self.dataset
    }

    #[tracing::instrument(skip(self))]
    pub fn document(&self, type_name: &str, slug: &str) -> Option<ContentDocument> {
        self.store.document(type_name, slug)
    }

    #[tracing::instrument(skip(self))]
    pub fn singleton(&self, type_name: &str) -> Option<ContentDocument> {
        self.store.singleton(type_name)
    }

    #[tracing::instrument(skip(self, opts))]
    pub fn list(&self, type_name: &str, opts: &FindOptions) -> Vec<ContentDocument> {
        self.store.list(type_name, opts)
    }

    #[tracing::instrument(skip(self, filter, opts))]
    pub fn find(&self, filter: &Filter, opts: &FindOptions) -> Vec<ContentDocument> {
        self.store.find(filter, opts)
    }

    /// Posts newest-first. The store itself mandates no order; this is the
    /// caller-specified convention the blog routes use.
    pub fn posts(&self, limit: Option<usize>) -> Vec<ContentDocument> {
        let mut opts = FindOptions::default().sorted_by("_createdAt", -1);
        opts.limit = limit;
        self.list("post", &opts)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Reference resolution
    // ─────────────────────────────────────────────────────────────────────

    /// Resolve a reference payload (`{ "_ref": "<id>" }`) to its document.
    /// Dangling or malformed references resolve to `None`, mirroring the
    /// omission rule for missing fields.
    pub fn resolve_reference(&self, value: &Json) -> Option<ContentDocument> {
        let id = value.get("_ref").and_then(Json::as_str)?;
        let doc = self.store.get(id);
        if doc.is_none() {
            debug!("dangling reference {id}; treating as absent");
        }
        doc
    }

    /// Resolve an author reference to its display fields.
    pub fn author_card(&self, value: &Json) -> Option<AuthorCard> {
        let doc = self.resolve_reference(value)?;
        if doc.type_name != "author" {
            debug!(
                "reference {} points at {}, not author; treating as absent",
                doc.id, doc.type_name
            );
            return None;
        }

        Some(AuthorCard {
            name: doc.str_field("name")?.to_owned(),
            bio: doc.str_field("bio").map(str::to_owned),
            image: doc.str_field("image").map(str::to_owned),
        })
    }

    /// Convenience for building reference payloads in fixtures and tests.
    pub fn reference(id: &str) -> Json {
        json!({ "_ref": id })
    }
}
