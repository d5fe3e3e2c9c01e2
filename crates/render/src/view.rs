// crates/render/src/view.rs

//! Serializable view models handed to templates.
//!
//! Views are the only shape templates ever see: documents projected through
//! the schema types, with the omission policy already applied (absent or
//! disabled content simply is not there).

use crate::blocks::render_blocks_html;
use schema::block::Block;
use schema::doc::ContentDocument;
use schema::homepage::{HeroSection, HomepageConfig, NewsletterSection, Seo, SocialLink};
use serde::Serialize;
use store::client::{AuthorCard, ContentClient};

// ─────────────────────────────────────────────────────────────────────────────
// Posts
// ─────────────────────────────────────────────────────────────────────────────

/// Listing-card projection of a post.
#[derive(Debug, Clone, Serialize)]
pub struct PostSummary {
    pub title: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    pub published_at: String,
}

impl PostSummary {
    /// `None` when the document lacks the fields a card needs (title + slug);
    /// a broken post drops out of listings instead of breaking them.
    pub fn from_document(doc: &ContentDocument) -> Option<Self> {
        Some(Self {
            title: doc.str_field("title")?.to_owned(),
            slug: doc.slug.clone()?,
            excerpt: doc.str_field("excerpt").map(str::to_owned),
            cover_image: doc.str_field("coverImage").map(str::to_owned),
            published_at: doc.created_at.format("%Y-%m-%d").to_string(),
        })
    }
}

/// Full post page projection.
#[derive(Debug, Clone, Serialize)]
pub struct PostView {
    pub title: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    pub published_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<AuthorCard>,
    pub categories: Vec<String>,
    pub body_html: String,
}

impl PostView {
    pub fn build(client: &ContentClient, doc: &ContentDocument) -> Option<Self> {
        let body = doc
            .field("body")
            .map(Block::parse_array)
            .unwrap_or_default();

        let categories = doc
            .array_field("categories")
            .map(|arr| {
                arr.iter()
                    .filter_map(|c| c.get("title").and_then(|t| t.as_str()))
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default();

        Some(Self {
            title: doc.str_field("title")?.to_owned(),
            slug: doc.slug.clone()?,
            excerpt: doc.str_field("excerpt").map(str::to_owned),
            cover_image: doc.str_field("coverImage").map(str::to_owned),
            published_at: doc.created_at.format("%Y-%m-%d").to_string(),
            author: doc.field("author").and_then(|r| client.author_card(r)),
            categories,
            body_html: render_blocks_html(&body),
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// CMS-authored pages
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct PageView {
    pub title: String,
    pub slug: String,
    pub body_html: String,
}

impl PageView {
    pub fn from_document(doc: &ContentDocument) -> Option<Self> {
        let blocks = doc
            .field("pageBuilder")
            .map(Block::parse_array)
            .unwrap_or_default();

        Some(Self {
            title: doc.str_field("title")?.to_owned(),
            slug: doc.slug.clone()?,
            body_html: render_blocks_html(&blocks),
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Homepage
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct FeaturedView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub posts: Vec<PostSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AboutView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Absent when the author reference dangles; the rest of the section
    /// still renders.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<AuthorCard>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoriesView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub categories: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct HomeView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero: Option<HeroSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<FeaturedView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub about: Option<AboutView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<CategoriesView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub newsletter: Option<NewsletterSection>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub social_links: Vec<SocialLink>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seo: Option<Seo>,
}

/// Distinct category titles across all posts, in first-seen order.
fn collect_categories(client: &ContentClient) -> Vec<String> {
    let mut seen = Vec::new();
    for post in client.posts(None) {
        if let Some(arr) = post.array_field("categories") {
            for c in arr {
                if let Some(title) = c.get("title").and_then(|t| t.as_str()) {
                    if !seen.iter().any(|s| s == title) {
                        seen.push(title.to_owned());
                    }
                }
            }
        }
    }
    seen
}

impl HomeView {
    /// Build the homepage view. Sections disabled or absent in the config are
    /// absent here too; the template never sees them.
    pub fn build(client: &ContentClient, config: &HomepageConfig) -> Self {
        let featured = config.featured.as_ref().map(|section| FeaturedView {
            title: section.title.clone(),
            posts: client
                .posts(Some(section.post_limit))
                .iter()
                .filter_map(PostSummary::from_document)
                .collect(),
        });

        let about = config.about.as_ref().map(|section| AboutView {
            title: section.title.clone(),
            body: section.body.clone(),
            author: section
                .author
                .as_ref()
                .and_then(|r| client.author_card(&ContentClient::reference(&r.id))),
        });

        let categories = config.categories.as_ref().map(|section| CategoriesView {
            title: section.title.clone(),
            categories: collect_categories(client),
        });

        Self {
            hero: config.hero.clone(),
            featured,
            about,
            categories,
            newsletter: config.newsletter.clone(),
            social_links: config.social_links.clone(),
            seo: config.seo.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use serde_json::json;
    use std::sync::Arc;
    use store::store::MemoryStore;

    fn fixture_client(post_count: usize, with_author: bool) -> ContentClient {
        let mut store = MemoryStore::new();
        let base = Utc::now();

        if with_author {
            store.insert(
                schema::doc::ContentDocument::new("a1", "author")
                    .with_field("name", json!("Robin"))
                    .with_field("bio", json!("Bio text")),
            );
        }

        for n in 0..post_count {
            store.insert(
                schema::doc::ContentDocument::new(format!("p{n}"), "post")
                    .with_slug(format!("post-{n}"))
                    .with_field("title", json!(format!("Post {n}")))
                    .with_field("categories", json!([{ "title": "rust" }]))
                    .with_field(
                        "body",
                        json!([{ "_type": "block", "children": [{ "text": "hello" }] }]),
                    )
                    .with_created_at(base + Duration::minutes(n as i64)),
            );
        }

        ContentClient::new("test", "fixture", Arc::new(store))
    }

    fn homepage_config(about_ref: &str) -> HomepageConfig {
        let doc = schema::doc::ContentDocument::new("home", "homepage")
            .with_field("hero", json!({ "enabled": true, "heading": "Hi" }))
            .with_field(
                "featuredSection",
                json!({ "enabled": true, "title": "Featured", "postLimit": 6 }),
            )
            .with_field(
                "aboutSection",
                json!({ "enabled": true, "title": "About", "author": { "_ref": about_ref } }),
            )
            .with_field("categoriesSection", json!({ "enabled": false }));
        HomepageConfig::from_document(&doc)
    }

    #[test]
    fn featured_posts_truncate_to_post_limit() {
        let client = fixture_client(10, true);
        let view = HomeView::build(&client, &homepage_config("a1"));
        let featured = view.featured.unwrap();
        assert_eq!(featured.posts.len(), 6);
        // Newest first.
        assert_eq!(featured.posts[0].title, "Post 9");
    }

    #[test]
    fn disabled_section_never_reaches_the_view() {
        let client = fixture_client(2, true);
        let view = HomeView::build(&client, &homepage_config("a1"));
        assert!(view.categories.is_none());

        let serialized = serde_json::to_value(&view).unwrap();
        assert!(serialized.get("categories").is_none());
    }

    #[test]
    fn dangling_about_author_renders_section_without_author() {
        let client = fixture_client(2, false);
        let view = HomeView::build(&client, &homepage_config("a1"));

        let about = view.about.expect("section itself still renders");
        assert_eq!(about.title.as_deref(), Some("About"));
        assert!(about.author.is_none(), "dangling author must be absent");
    }

    #[test]
    fn resolved_about_author_carries_display_fields() {
        let client = fixture_client(1, true);
        let view = HomeView::build(&client, &homepage_config("a1"));
        let author = view.about.unwrap().author.unwrap();
        assert_eq!(author.name, "Robin");
    }

    #[test]
    fn post_view_builds_body_html_and_categories() {
        let client = fixture_client(1, true);
        let doc = client.document("post", "post-0").unwrap();
        let view = PostView::build(&client, &doc).unwrap();

        assert_eq!(view.title, "Post 0");
        assert!(view.body_html.contains("<p>hello</p>"));
        assert_eq!(view.categories, vec!["rust"]);
        assert!(view.author.is_none());
    }

    #[test]
    fn post_summary_requires_title_and_slug() {
        let no_title = schema::doc::ContentDocument::new("x", "post").with_slug("s");
        assert!(PostSummary::from_document(&no_title).is_none());

        let no_slug =
            schema::doc::ContentDocument::new("x", "post").with_field("title", json!("T"));
        assert!(PostSummary::from_document(&no_slug).is_none());
    }

    #[test]
    fn page_view_renders_page_builder_blocks() {
        let doc = schema::doc::ContentDocument::new("pg", "page")
            .with_slug("projects")
            .with_field("title", json!("Projects"))
            .with_field(
                "pageBuilder",
                json!([
                    { "_type": "hero", "heading": "Things I built" },
                    { "_type": "unknownSection" }
                ]),
            );

        let view = PageView::from_document(&doc).unwrap();
        assert!(view.body_html.contains("Things I built"));
        assert!(!view.body_html.contains("unknownSection"));
    }

    #[test]
    fn categories_collects_distinct_titles() {
        let client = fixture_client(3, false);
        let titles = collect_categories(&client);
        assert_eq!(titles, vec!["rust"]);
    }
}
