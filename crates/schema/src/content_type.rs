// crates/schema/src/content_type.rs

use crate::field::FieldDef;
use serde::{Deserialize, Serialize};

/// Whether a content type is independently addressable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeKind {
    /// Independently queryable / listable.
    Document,
    /// Only embeddable inside another document.
    Object,
}

/// A named schema for one category of structured content.
///
/// Field order is the declaration order and drives editing-UI layout; it has
/// no query-correctness meaning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentType {
    pub name: String,
    pub kind: TypeKind,
    pub fields: Vec<FieldDef>,
}

impl ContentType {
    pub fn document(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: TypeKind::Document,
            fields: Vec::new(),
        }
    }

    pub fn object(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: TypeKind::Object,
            fields: Vec::new(),
        }
    }

    pub fn with_field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }

    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn is_document(&self) -> bool {
        self.kind == TypeKind::Document
    }
}
