// crates/store/src/store.rs

//! Storage seam for content documents.
//!
//! `ContentStore` is the trait the rendering layer sees, so tests can
//! substitute a fixture store. `MemoryStore` is the production
//! implementation: documents held in insertion order, read-only once loaded.

use crate::query::{eval_filter, exec::apply_find_options, Filter, FindOptions};
use schema::doc::ContentDocument;
use std::collections::HashMap;
use tracing::warn;

pub trait ContentStore: Send + Sync {
    /// Fetch one document by id.
    fn get(&self, id: &str) -> Option<ContentDocument>;

    /// Fetch at most one document by `(type_name, slug)`.
    fn document(&self, type_name: &str, slug: &str) -> Option<ContentDocument>;

    /// Fetch the singleton instance of a type (first in insertion order).
    fn singleton(&self, type_name: &str) -> Option<ContentDocument>;

    /// Fetch zero or more documents of a type, with caller-specified
    /// ordering and pagination.
    fn list(&self, type_name: &str, opts: &FindOptions) -> Vec<ContentDocument>;

    /// Filtered query across all documents.
    fn find(&self, filter: &Filter, opts: &FindOptions) -> Vec<ContentDocument>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    /// Insertion order.
    docs: Vec<ContentDocument>,
    /// id → index into `docs`.
    by_id: HashMap<String, usize>,
    /// (type_name, slug) → index into `docs`.
    by_slug: HashMap<(String, String), usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a document. The first `(type, slug)` or id wins; later
    /// duplicates are dropped with a warning; bad authoring must not take
    /// the site down.
    pub fn insert(&mut self, doc: ContentDocument) {
        if self.by_id.contains_key(&doc.id) {
            warn!("duplicate document id {}; keeping the first", doc.id);
            return;
        }

        if let Some(slug) = &doc.slug {
            let key = (doc.type_name.clone(), slug.clone());
            if self.by_slug.contains_key(&key) {
                warn!(
                    "duplicate slug {}/{}; keeping the first",
                    doc.type_name, slug
                );
                return;
            }
            self.by_slug.insert(key, self.docs.len());
        }

        self.by_id.insert(doc.id.clone(), self.docs.len());
        self.docs.push(doc);
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.docs.iter().map(|d| d.id.as_str())
    }
}

impl ContentStore for MemoryStore {
    fn get(&self, id: &str) -> Option<ContentDocument> {
        self.by_id.get(id).map(|&i| self.docs[i].clone())
    }

    fn document(&self, type_name: &str, slug: &str) -> Option<ContentDocument> {
        self.by_slug
            .get(&(type_name.to_owned(), slug.to_owned()))
            .map(|&i| self.docs[i].clone())
    }

    fn singleton(&self, type_name: &str) -> Option<ContentDocument> {
        let mut matching = self.docs.iter().filter(|d| d.type_name == type_name);
        let first = matching.next()?;
        if matching.next().is_some() {
            warn!(
                "multiple documents of singleton type {}; using the first",
                type_name
            );
        }
        Some(first.clone())
    }

    fn list(&self, type_name: &str, opts: &FindOptions) -> Vec<ContentDocument> {
        let matched: Vec<ContentDocument> = self
            .docs
            .iter()
            .filter(|d| d.type_name == type_name)
            .cloned()
            .collect();
        apply_find_options(matched, opts)
    }

    fn find(&self, filter: &Filter, opts: &FindOptions) -> Vec<ContentDocument> {
        let matched: Vec<ContentDocument> = self
            .docs
            .iter()
            .filter(|d| eval_filter(filter, &d.to_json()))
            .cloned()
            .collect();
        apply_find_options(matched, opts)
    }

    fn len(&self) -> usize {
        self.docs.len()
    }
}
