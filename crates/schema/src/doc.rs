// crates/schema/src/doc.rs

//! Concrete content instances.
//!
//! A `ContentDocument` is the editor-owned record the rendering layer
//! projects: a type name, an id, an optional slug, and an untyped field map.
//! Field access always returns `Option`: an absent field is an omission,
//! never an error.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map as JsonMap, Value as Json};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentDocument {
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(rename = "_type")]
    pub type_name: String,

    /// Present for `post` / `page`; unique within its type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,

    #[serde(rename = "_createdAt", default = "Utc::now")]
    pub created_at: DateTime<Utc>,

    #[serde(rename = "_updatedAt", default = "Utc::now")]
    pub updated_at: DateTime<Utc>,

    /// Everything else the editor authored, keyed by field name.
    #[serde(flatten)]
    pub fields: JsonMap<String, Json>,
}

impl ContentDocument {
    pub fn new(id: impl Into<String>, type_name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            type_name: type_name.into(),
            slug: None,
            created_at: now,
            updated_at: now,
            fields: JsonMap::new(),
        }
    }

    // ───────────────────────────────
    // Builder-style setters
    // ───────────────────────────────

    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    pub fn with_field(mut self, name: impl Into<String>, value: Json) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    pub fn with_created_at(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = at;
        self
    }

    // ───────────────────────────────
    // Projection accessors
    // ───────────────────────────────

    pub fn field(&self, name: &str) -> Option<&Json> {
        self.fields.get(name)
    }

    /// Resolve a dotted path (e.g. `"aboutSection.author._ref"`) into a
    /// nested field value. Returns `None` if any segment is missing.
    pub fn field_path(&self, path: &str) -> Option<&Json> {
        let mut parts = path.split('.');
        let mut current = self.fields.get(parts.next()?)?;
        for part in parts {
            current = current.get(part)?;
        }
        Some(current)
    }

    pub fn str_field(&self, name: &str) -> Option<&str> {
        self.field(name).and_then(Json::as_str)
    }

    pub fn bool_field(&self, name: &str) -> Option<bool> {
        self.field(name).and_then(Json::as_bool)
    }

    pub fn number_field(&self, name: &str) -> Option<f64> {
        self.field(name).and_then(Json::as_f64)
    }

    pub fn array_field(&self, name: &str) -> Option<&Vec<Json>> {
        self.field(name).and_then(Json::as_array)
    }

    /// The full document as one JSON object, with `_id`, `_type`, and `slug`
    /// visible next to the authored fields. Used by the query evaluator.
    pub fn to_json(&self) -> Json {
        let mut obj = JsonMap::new();
        obj.insert("_id".into(), Json::String(self.id.clone()));
        obj.insert("_type".into(), Json::String(self.type_name.clone()));
        if let Some(slug) = &self.slug {
            obj.insert("slug".into(), Json::String(slug.clone()));
        }
        obj.insert(
            "_createdAt".into(),
            Json::String(self.created_at.to_rfc3339()),
        );
        obj.insert(
            "_updatedAt".into(),
            Json::String(self.updated_at.to_rfc3339()),
        );
        for (k, v) in &self.fields {
            obj.insert(k.clone(), v.clone());
        }
        Json::Object(obj)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> ContentDocument {
        ContentDocument::new("post-1", "post")
            .with_slug("hello-world")
            .with_field("title", json!("Hello, world"))
            .with_field("featured", json!(true))
            .with_field("seo", json!({ "metaTitle": "Hello" }))
    }

    #[test]
    fn accessors_project_fields() {
        let doc = sample();
        assert_eq!(doc.str_field("title"), Some("Hello, world"));
        assert_eq!(doc.bool_field("featured"), Some(true));
        assert_eq!(doc.field_path("seo.metaTitle"), Some(&json!("Hello")));
    }

    #[test]
    fn absent_fields_are_none_not_error() {
        let doc = sample();
        assert!(doc.field("coverImage").is_none());
        assert!(doc.str_field("excerpt").is_none());
        assert!(doc.field_path("seo.ogImage").is_none());
        assert!(doc.field_path("missing.deeply.nested").is_none());
    }

    #[test]
    fn serde_round_trip_preserves_identity_and_fields() {
        let doc = sample();
        let s = serde_json::to_string(&doc).unwrap();
        let back: ContentDocument = serde_json::from_str(&s).unwrap();

        assert_eq!(back.id, "post-1");
        assert_eq!(back.type_name, "post");
        assert_eq!(back.slug.as_deref(), Some("hello-world"));
        assert_eq!(back.fields, doc.fields);
    }

    #[test]
    fn deserializes_sanity_export_shape() {
        let raw = json!({
            "_id": "a1",
            "_type": "author",
            "name": "Robin",
            "bio": "Writes about type systems."
        });

        let doc: ContentDocument = serde_json::from_value(raw).unwrap();
        assert_eq!(doc.type_name, "author");
        assert!(doc.slug.is_none());
        assert_eq!(doc.str_field("name"), Some("Robin"));
    }

    #[test]
    fn to_json_exposes_metadata_alongside_fields() {
        let doc = sample();
        let j = doc.to_json();
        assert_eq!(j.get("_type"), Some(&json!("post")));
        assert_eq!(j.get("slug"), Some(&json!("hello-world")));
        assert_eq!(j.get("title"), Some(&json!("Hello, world")));
    }
}
