// crates/schema/src/registry.rs

//! The closed catalog of content types.
//!
//! Registration is idempotent by type name: re-registering a name is a no-op,
//! so a registry can be assembled from overlapping declaration sets without
//! ever holding two schemas for one name. `list_types()` returns declaration
//! order, which drives only CMS menu display.

use crate::content_type::ContentType;
use crate::SchemaError;
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Default)]
pub struct SchemaRegistry {
    /// Declaration order.
    types: Vec<ContentType>,
    /// name → index into `types`.
    by_name: HashMap<String, usize>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a content type. Idempotent by name: the first registration
    /// wins and later ones are ignored.
    ///
    /// Reference fields with an empty target list are rejected; every other
    /// declaration shape is accepted as-is.
    pub fn register(&mut self, content_type: ContentType) -> Result<(), SchemaError> {
        for field in &content_type.fields {
            if let Some(targets) = field.reference_targets() {
                if targets.is_empty() {
                    return Err(SchemaError::EmptyReferenceTargets {
                        type_name: content_type.name.clone(),
                        field: field.name.clone(),
                    });
                }
            }
        }

        if self.by_name.contains_key(&content_type.name) {
            debug!("content type {} already registered; skipping", content_type.name);
            return Ok(());
        }

        self.by_name
            .insert(content_type.name.clone(), self.types.len());
        self.types.push(content_type);
        Ok(())
    }

    /// All registered types in declaration order.
    pub fn list_types(&self) -> &[ContentType] {
        &self.types
    }

    pub fn get(&self, name: &str) -> Option<&ContentType> {
        self.by_name.get(name).map(|&i| &self.types[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Document-kind types only, in declaration order.
    pub fn document_types(&self) -> impl Iterator<Item = &ContentType> {
        self.types.iter().filter(|t| t.is_document())
    }
}
