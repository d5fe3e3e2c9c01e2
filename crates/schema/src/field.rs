// crates/schema/src/field.rs

use serde::{Deserialize, Serialize};
use serde_json::Value as Json;

// ─────────────────────────────────────────────────────────────────────────────
// Field value types
// ─────────────────────────────────────────────────────────────────────────────

/// The value type a field may hold.
///
/// `Reference` carries the names of the content types it may point to; a
/// reference with no targets is rejected at catalog-construction time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldType {
    /// Short single-line string.
    String,
    /// Long-form text.
    Text,
    Number,
    Boolean,
    Image,
    Url,
    Slug,
    Reference { to: Vec<String> },
    /// Ordered array of rich-text / page-builder blocks.
    BlockArray,
    /// A single inline object of one named object type. Authored and stored
    /// as a bare JSON object, never wrapped in an array.
    Object { of: String },
    /// Ordered array of one named object type.
    ObjectArray { of: String },
}

// ─────────────────────────────────────────────────────────────────────────────
// Constraints
// ─────────────────────────────────────────────────────────────────────────────

/// Editing-time validation constraints declared on a field.
///
/// The CMS host enforces these; this crate only declares them so the editing
/// UI can be generated from the schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Constraints {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub max_length: Option<usize>,
    /// Enumerated allowed values for select-style fields.
    pub allowed: Vec<Json>,
}

impl Constraints {
    pub fn is_empty(&self) -> bool {
        self.min.is_none() && self.max.is_none() && self.max_length.is_none() && self.allowed.is_empty()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Field definition
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    pub field_type: FieldType,
    pub required: bool,
    /// Type-matched default, if any.
    pub default_value: Option<Json>,
    pub constraints: Constraints,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            required: false,
            default_value: None,
            constraints: Constraints::default(),
        }
    }

    // ───────────────────────────────
    // Builder-style setters
    // ───────────────────────────────

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_default(mut self, value: Json) -> Self {
        self.default_value = Some(value);
        self
    }

    pub fn with_min(mut self, min: f64) -> Self {
        self.constraints.min = Some(min);
        self
    }

    pub fn with_max(mut self, max: f64) -> Self {
        self.constraints.max = Some(max);
        self
    }

    pub fn with_max_length(mut self, len: usize) -> Self {
        self.constraints.max_length = Some(len);
        self
    }

    pub fn with_allowed(mut self, values: Vec<Json>) -> Self {
        self.constraints.allowed = values;
        self
    }

    /// Target type names, when this is a reference field.
    pub fn reference_targets(&self) -> Option<&[String]> {
        match &self.field_type {
            FieldType::Reference { to } => Some(to),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builder_setters_accumulate() {
        let f = FieldDef::new("postLimit", FieldType::Number)
            .with_default(json!(6))
            .with_min(1.0)
            .with_max(12.0);

        assert_eq!(f.name, "postLimit");
        assert!(!f.required);
        assert_eq!(f.default_value, Some(json!(6)));
        assert_eq!(f.constraints.min, Some(1.0));
        assert_eq!(f.constraints.max, Some(12.0));
        assert!(f.constraints.allowed.is_empty());
    }

    #[test]
    fn reference_targets_only_for_reference_fields() {
        let r = FieldDef::new("author", FieldType::Reference { to: vec!["author".into()] });
        assert_eq!(r.reference_targets(), Some(&["author".to_string()][..]));

        let s = FieldDef::new("title", FieldType::String).required();
        assert!(s.reference_targets().is_none());
        assert!(s.required);
    }

    #[test]
    fn empty_constraints_report_empty() {
        let f = FieldDef::new("name", FieldType::String);
        assert!(f.constraints.is_empty());

        let g = f.with_allowed(vec![json!("default"), json!("warning")]);
        assert!(!g.constraints.is_empty());
    }
}
