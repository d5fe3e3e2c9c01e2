// crates/schema/src/catalog.rs

//! The fixed vellum content catalog.
//!
//! Four document types (`post`, `author`, `page`, `homepage`) plus the shared
//! object types used inside block arrays and the homepage sections. The CMS
//! editing UI is generated from these declarations; the rendering layer only
//! ever projects them.

use crate::content_type::ContentType;
use crate::field::{FieldDef, FieldType};
use crate::registry::SchemaRegistry;
use crate::SchemaError;
use serde_json::json;

/// Names of the callout variants, in the order the editor offers them.
pub const CALLOUT_VARIANTS: [&str; 4] = ["default", "warning", "info", "success"];

fn post() -> ContentType {
    ContentType::document("post")
        .with_field(FieldDef::new("title", FieldType::String).required().with_max_length(120))
        .with_field(FieldDef::new("slug", FieldType::Slug).required())
        .with_field(FieldDef::new("excerpt", FieldType::Text).with_max_length(300))
        .with_field(FieldDef::new("coverImage", FieldType::Image))
        .with_field(FieldDef::new("author", FieldType::Reference { to: vec!["author".into()] }))
        .with_field(FieldDef::new("categories", FieldType::ObjectArray { of: "category".into() }))
        .with_field(FieldDef::new("body", FieldType::BlockArray).required())
        .with_field(FieldDef::new("featured", FieldType::Boolean).with_default(json!(false)))
}

fn author() -> ContentType {
    ContentType::document("author")
        .with_field(FieldDef::new("name", FieldType::String).required().with_max_length(80))
        .with_field(FieldDef::new("bio", FieldType::Text))
        .with_field(FieldDef::new("image", FieldType::Image))
        .with_field(FieldDef::new("website", FieldType::Url))
}

fn category() -> ContentType {
    ContentType::object("category")
        .with_field(FieldDef::new("title", FieldType::String).required().with_max_length(40))
}

fn page() -> ContentType {
    ContentType::document("page")
        .with_field(FieldDef::new("title", FieldType::String).required())
        .with_field(FieldDef::new("slug", FieldType::Slug).required())
        .with_field(FieldDef::new("pageBuilder", FieldType::BlockArray))
        .with_field(FieldDef::new("seo", FieldType::Object { of: "seo".into() }))
}

// Each section slot holds exactly one object; only socialLinks is a list.
fn homepage() -> ContentType {
    ContentType::document("homepage")
        .with_field(FieldDef::new("hero", FieldType::Object { of: "heroSection".into() }))
        .with_field(FieldDef::new("featuredSection", FieldType::Object { of: "featuredSection".into() }))
        .with_field(FieldDef::new("aboutSection", FieldType::Object { of: "aboutSection".into() }))
        .with_field(FieldDef::new("categoriesSection", FieldType::Object { of: "categoriesSection".into() }))
        .with_field(FieldDef::new("newsletterSection", FieldType::Object { of: "newsletterSection".into() }))
        .with_field(FieldDef::new("socialLinks", FieldType::ObjectArray { of: "socialLink".into() }))
        .with_field(FieldDef::new("seo", FieldType::Object { of: "seo".into() }))
}

// ─────────────────────────────────────────────────────────────────────────────
// Block object types
// ─────────────────────────────────────────────────────────────────────────────

fn callout() -> ContentType {
    ContentType::object("callout")
        .with_field(FieldDef::new("emoji", FieldType::String).with_max_length(8))
        .with_field(FieldDef::new("title", FieldType::String))
        .with_field(
            FieldDef::new("variant", FieldType::String)
                .with_default(json!("default"))
                .with_allowed(CALLOUT_VARIANTS.iter().map(|v| json!(v)).collect()),
        )
        .with_field(FieldDef::new("content", FieldType::BlockArray))
}

fn quote() -> ContentType {
    ContentType::object("quote")
        .with_field(FieldDef::new("text", FieldType::Text).required())
        .with_field(FieldDef::new("attribution", FieldType::String))
}

fn code() -> ContentType {
    ContentType::object("code")
        .with_field(FieldDef::new("language", FieldType::String))
        .with_field(FieldDef::new("code", FieldType::Text).required())
}

fn toggle() -> ContentType {
    ContentType::object("toggle")
        .with_field(FieldDef::new("title", FieldType::String).required())
        .with_field(FieldDef::new("content", FieldType::BlockArray))
}

fn todo() -> ContentType {
    ContentType::object("todo")
        .with_field(FieldDef::new("text", FieldType::String).required())
        .with_field(FieldDef::new("checked", FieldType::Boolean).with_default(json!(false)))
}

// ─────────────────────────────────────────────────────────────────────────────
// Page-builder section types
// ─────────────────────────────────────────────────────────────────────────────

fn hero() -> ContentType {
    ContentType::object("hero")
        .with_field(FieldDef::new("heading", FieldType::String).required())
        .with_field(FieldDef::new("tagline", FieldType::Text))
        .with_field(FieldDef::new("image", FieldType::Image))
}

fn call_to_action() -> ContentType {
    ContentType::object("callToAction")
        .with_field(FieldDef::new("heading", FieldType::String).required())
        .with_field(FieldDef::new("buttonText", FieldType::String))
        .with_field(FieldDef::new("buttonUrl", FieldType::Url))
}

fn content_section() -> ContentType {
    ContentType::object("content")
        .with_field(FieldDef::new("heading", FieldType::String))
        .with_field(FieldDef::new("body", FieldType::BlockArray))
}

// ─────────────────────────────────────────────────────────────────────────────
// Homepage section types
// ─────────────────────────────────────────────────────────────────────────────

fn hero_section() -> ContentType {
    ContentType::object("heroSection")
        .with_field(FieldDef::new("enabled", FieldType::Boolean).with_default(json!(true)))
        .with_field(FieldDef::new("heading", FieldType::String))
        .with_field(FieldDef::new("tagline", FieldType::Text))
        .with_field(FieldDef::new("image", FieldType::Image))
}

fn featured_section() -> ContentType {
    ContentType::object("featuredSection")
        .with_field(FieldDef::new("enabled", FieldType::Boolean).with_default(json!(true)))
        .with_field(FieldDef::new("title", FieldType::String))
        .with_field(
            FieldDef::new("postLimit", FieldType::Number)
                .with_default(json!(3))
                .with_min(1.0)
                .with_max(12.0),
        )
}

fn about_section() -> ContentType {
    ContentType::object("aboutSection")
        .with_field(FieldDef::new("enabled", FieldType::Boolean).with_default(json!(true)))
        .with_field(FieldDef::new("title", FieldType::String))
        .with_field(FieldDef::new("body", FieldType::Text))
        .with_field(FieldDef::new("author", FieldType::Reference { to: vec!["author".into()] }))
}

fn categories_section() -> ContentType {
    ContentType::object("categoriesSection")
        .with_field(FieldDef::new("enabled", FieldType::Boolean).with_default(json!(true)))
        .with_field(FieldDef::new("title", FieldType::String))
}

fn newsletter_section() -> ContentType {
    ContentType::object("newsletterSection")
        .with_field(FieldDef::new("enabled", FieldType::Boolean).with_default(json!(true)))
        .with_field(FieldDef::new("title", FieldType::String))
        .with_field(FieldDef::new("blurb", FieldType::Text))
}

fn social_link() -> ContentType {
    ContentType::object("socialLink")
        .with_field(FieldDef::new("label", FieldType::String).required())
        .with_field(FieldDef::new("url", FieldType::Url).required())
}

fn seo() -> ContentType {
    ContentType::object("seo")
        .with_field(FieldDef::new("metaTitle", FieldType::String).with_max_length(70))
        .with_field(FieldDef::new("metaDescription", FieldType::Text).with_max_length(160))
        .with_field(FieldDef::new("ogImage", FieldType::Image))
}

/// Build the full vellum registry.
pub fn default_registry() -> Result<SchemaRegistry, SchemaError> {
    let mut reg = SchemaRegistry::new();

    // Document types first so CMS menus lead with them.
    reg.register(homepage())?;
    reg.register(post())?;
    reg.register(page())?;
    reg.register(author())?;

    reg.register(category())?;
    reg.register(callout())?;
    reg.register(quote())?;
    reg.register(code())?;
    reg.register(toggle())?;
    reg.register(todo())?;

    reg.register(hero())?;
    reg.register(call_to_action())?;
    reg.register(content_section())?;

    reg.register(hero_section())?;
    reg.register(featured_section())?;
    reg.register(about_section())?;
    reg.register(categories_section())?;
    reg.register(newsletter_section())?;
    reg.register(social_link())?;
    reg.register(seo())?;

    Ok(reg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content_type::TypeKind;

    #[test]
    fn catalog_has_the_four_document_types() {
        let reg = default_registry().unwrap();
        let docs: Vec<&str> = reg.document_types().map(|t| t.name.as_str()).collect();
        assert_eq!(docs, vec!["homepage", "post", "page", "author"]);
    }

    #[test]
    fn catalog_names_are_unique() {
        let reg = default_registry().unwrap();
        for t in reg.list_types() {
            assert_eq!(
                reg.list_types().iter().filter(|u| u.name == t.name).count(),
                1
            );
        }
    }

    #[test]
    fn block_object_types_are_objects() {
        let reg = default_registry().unwrap();
        for name in ["callout", "quote", "code", "toggle", "todo", "hero", "callToAction", "content"] {
            let t = reg.get(name).unwrap_or_else(|| panic!("missing type {name}"));
            assert_eq!(t.kind, TypeKind::Object, "{name} must be an object type");
        }
    }

    #[test]
    fn references_declare_targets() {
        let reg = default_registry().unwrap();
        let about = reg.get("aboutSection").unwrap();
        let author_field = about.field("author").unwrap();
        assert_eq!(author_field.reference_targets(), Some(&["author".to_string()][..]));

        let post = reg.get("post").unwrap();
        assert_eq!(
            post.field("author").unwrap().reference_targets(),
            Some(&["author".to_string()][..])
        );
    }

    #[test]
    fn homepage_section_slots_are_single_objects() {
        let reg = default_registry().unwrap();
        let home = reg.get("homepage").unwrap();
        for name in ["hero", "featuredSection", "aboutSection", "categoriesSection", "newsletterSection", "seo"] {
            let field = home.field(name).unwrap_or_else(|| panic!("missing field {name}"));
            assert!(
                matches!(field.field_type, FieldType::Object { .. }),
                "{name} must hold a single object"
            );
        }
        assert!(matches!(
            home.field("socialLinks").unwrap().field_type,
            FieldType::ObjectArray { .. }
        ));
        assert!(matches!(
            reg.get("page").unwrap().field("seo").unwrap().field_type,
            FieldType::Object { .. }
        ));
    }

    #[test]
    fn callout_variant_constraint_enumerates_all_variants() {
        let reg = default_registry().unwrap();
        let callout = reg.get("callout").unwrap();
        let variant = callout.field("variant").unwrap();
        assert_eq!(variant.constraints.allowed.len(), CALLOUT_VARIANTS.len());
        assert_eq!(variant.default_value, Some(serde_json::json!("default")));
    }

    #[test]
    fn required_fields_match_authoring_contract() {
        let reg = default_registry().unwrap();
        let post = reg.get("post").unwrap();
        assert!(post.field("title").unwrap().required);
        assert!(post.field("slug").unwrap().required);
        assert!(!post.field("excerpt").unwrap().required);
    }
}
