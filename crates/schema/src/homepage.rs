// crates/schema/src/homepage.rs

//! Typed projection of the singleton `homepage` document.
//!
//! Each section carries an `enabled` gate. A section that is absent,
//! malformed, or disabled projects to `None`. Suppression is a content-level
//! contract, not a styling concern, so disabled sections never reach a view
//! model at all.

use crate::doc::ContentDocument;
use serde::{Deserialize, Serialize};
use serde_json::Value as Json;

/// Reference payload as authored: `{ "_ref": "<document id>" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    #[serde(rename = "_ref")]
    pub id: String,
}

impl Reference {
    pub fn from_json(value: &Json) -> Option<Self> {
        value
            .get("_ref")
            .and_then(Json::as_str)
            .map(|id| Reference { id: id.to_owned() })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroSection {
    pub heading: Option<String>,
    pub tagline: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeaturedSection {
    pub title: Option<String>,
    pub post_limit: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AboutSection {
    pub title: Option<String>,
    pub body: Option<String>,
    /// Resolved lazily by the caller; dangling targets project to nothing.
    pub author: Option<Reference>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoriesSection {
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsletterSection {
    pub title: Option<String>,
    pub blurb: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seo {
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub og_image: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HomepageConfig {
    pub hero: Option<HeroSection>,
    pub featured: Option<FeaturedSection>,
    pub about: Option<AboutSection>,
    pub categories: Option<CategoriesSection>,
    pub newsletter: Option<NewsletterSection>,
    pub social_links: Vec<SocialLink>,
    pub seo: Option<Seo>,
}

const DEFAULT_POST_LIMIT: usize = 3;

fn opt_str(node: &Json, key: &str) -> Option<String> {
    node.get(key).and_then(Json::as_str).map(str::to_owned)
}

/// A section object is live when present and not explicitly disabled.
/// Missing `enabled` means enabled.
fn enabled_section<'a>(doc: &'a ContentDocument, name: &str) -> Option<&'a Json> {
    let node = doc.field(name)?;
    if !node.is_object() {
        return None;
    }
    match node.get("enabled").and_then(Json::as_bool) {
        Some(false) => None,
        _ => Some(node),
    }
}

impl HomepageConfig {
    /// Project a `homepage` document. Never fails: every unreadable part is
    /// simply absent from the result.
    pub fn from_document(doc: &ContentDocument) -> Self {
        let hero = enabled_section(doc, "hero").map(|node| HeroSection {
            heading: opt_str(node, "heading"),
            tagline: opt_str(node, "tagline"),
            image: opt_str(node, "image"),
        });

        let featured = enabled_section(doc, "featuredSection").map(|node| FeaturedSection {
            title: opt_str(node, "title"),
            post_limit: node
                .get("postLimit")
                .and_then(Json::as_u64)
                .map(|n| n as usize)
                .unwrap_or(DEFAULT_POST_LIMIT),
        });

        let about = enabled_section(doc, "aboutSection").map(|node| AboutSection {
            title: opt_str(node, "title"),
            body: opt_str(node, "body"),
            author: node.get("author").and_then(Reference::from_json),
        });

        let categories = enabled_section(doc, "categoriesSection").map(|node| CategoriesSection {
            title: opt_str(node, "title"),
        });

        let newsletter = enabled_section(doc, "newsletterSection").map(|node| NewsletterSection {
            title: opt_str(node, "title"),
            blurb: opt_str(node, "blurb"),
        });

        let social_links = doc
            .array_field("socialLinks")
            .map(|arr| {
                arr.iter()
                    .filter_map(|node| {
                        Some(SocialLink {
                            label: opt_str(node, "label")?,
                            url: opt_str(node, "url")?,
                        })
                    })
                    .collect()
            })
            .unwrap_or_default();

        let seo = doc.field("seo").filter(|n| n.is_object()).map(|node| Seo {
            meta_title: opt_str(node, "metaTitle"),
            meta_description: opt_str(node, "metaDescription"),
            og_image: opt_str(node, "ogImage"),
        });

        Self {
            hero,
            featured,
            about,
            categories,
            newsletter,
            social_links,
            seo,
        }
    }
}
