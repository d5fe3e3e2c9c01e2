// crates/store/src/dataset.rs

//! Content dataset ingestion.
//!
//! A dataset is a directory tree of authored documents:
//!   - `*.json`: one document object, or an array of them (export shape:
//!     `_id`, `_type`, optional `slug`, authored fields inline)
//!   - `*.ndjson`: one document object per line
//!   - `*.md`: front matter (YAML `---`, TOML `+++`, or a leading JSON
//!     object) that must carry `_type`; the markdown body becomes paragraph
//!     rich-text blocks under `body`
//!
//! Ingestion is tolerant: unreadable or malformed files are collected as
//! per-file errors and skipped, never fatal to the whole load. Skipping is
//! whole-file: a file that fails anywhere contributes no documents at all.

use crate::store::{ContentStore, MemoryStore};
use crate::StoreError;
use schema::doc::ContentDocument;
use serde_json::{json, Value as Json};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Load every recognized content file under `root` into a `MemoryStore`.
pub fn load_dataset(root: &Path) -> Result<(MemoryStore, Vec<(PathBuf, StoreError)>), StoreError> {
    let mut store = MemoryStore::new();
    let mut errors = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!("skipping unreadable dataset entry: {}", e);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .map(str::to_ascii_lowercase);

        let result = match ext.as_deref() {
            Some("json") => ingest_json_file(path, &mut store),
            Some("ndjson") => ingest_ndjson_file(path, &mut store),
            Some("md") | Some("markdown") => ingest_markdown_file(path, &mut store),
            _ => continue,
        };

        if let Err(err) = result {
            warn!("failed to ingest {}: {}", path.display(), err);
            errors.push((path.to_owned(), err));
        }
    }

    debug!(
        "dataset loaded from {}: {} documents, {} errors",
        root.display(),
        store.len(),
        errors.len()
    );
    Ok((store, errors))
}

fn insert_value(value: Json, store: &mut MemoryStore) -> Result<(), StoreError> {
    let doc: ContentDocument = serde_json::from_value(value)?;
    debug!("ingesting {} document {}", doc.type_name, doc.id);
    store.insert(doc);
    Ok(())
}

// Every document in the file must deserialize before any of them is
// inserted. A bad element anywhere leaves the store untouched by that file.
fn insert_all(docs: Vec<ContentDocument>, store: &mut MemoryStore) {
    for doc in docs {
        debug!("ingesting {} document {}", doc.type_name, doc.id);
        store.insert(doc);
    }
}

fn ingest_json_file(path: &Path, store: &mut MemoryStore) -> Result<(), StoreError> {
    let text = std::fs::read_to_string(path)?;
    match serde_json::from_str::<Json>(&text)? {
        Json::Array(values) => {
            let docs = values
                .into_iter()
                .map(serde_json::from_value::<ContentDocument>)
                .collect::<Result<Vec<_>, _>>()?;
            insert_all(docs, store);
            Ok(())
        }
        doc => insert_value(doc, store),
    }
}

fn ingest_ndjson_file(path: &Path, store: &mut MemoryStore) -> Result<(), StoreError> {
    let text = std::fs::read_to_string(path)?;
    let docs = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(serde_json::from_str::<ContentDocument>)
        .collect::<Result<Vec<_>, _>>()?;
    insert_all(docs, store);
    Ok(())
}

// ---------------------------------------------------------------------------
// Front-matter markdown
// ---------------------------------------------------------------------------

/// Parse front matter out of a markdown file: YAML first, then TOML `+++`,
/// then a bare leading JSON object. Returns `(front_matter, body)`.
fn split_front_matter(full: &str) -> Result<(Option<Json>, String), StoreError> {
    use gray_matter::engine::YAML;
    use gray_matter::Matter;

    // YAML `---` fences.
    let matter: Matter<YAML> = Matter::new();
    if let Ok(parsed) = matter.parse::<Json>(full) {
        if let Some(data) = parsed.data {
            return Ok((Some(data), parsed.content));
        }
    }

    // TOML `+++` fences.
    let trimmed = full.trim_start_matches('\u{feff}');
    if trimmed.starts_with("+++") {
        let after = trimmed.trim_start_matches('+').trim_start_matches('\n');
        if let Some(end_idx) = after.find("\n+++") {
            let fm_src = &after[..end_idx];
            let toml_val = toml::from_str::<toml::Value>(fm_src)
                .map_err(|e| StoreError::FrontMatter(e.to_string()))?;
            let data = serde_json::to_value(toml_val)?;
            return Ok((Some(data), after[end_idx + 4..].trim_start().to_owned()));
        }
    }

    // Whole-file JSON object.
    let trimmed = full.trim();
    if trimmed.starts_with('{') {
        let data = serde_json::from_str::<Json>(trimmed)
            .map_err(|e| StoreError::FrontMatter(e.to_string()))?;
        return Ok((Some(data), String::new()));
    }

    Ok((None, full.to_owned()))
}

/// Split a markdown body into paragraph rich-text blocks: one block per
/// blank-line-separated chunk, a single unmarked span each.
fn body_to_blocks(body: &str) -> Vec<Json> {
    body.split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| {
            json!({
                "_type": "block",
                "style": "normal",
                "children": [{ "text": p }]
            })
        })
        .collect()
}

fn ingest_markdown_file(path: &Path, store: &mut MemoryStore) -> Result<(), StoreError> {
    let text = std::fs::read_to_string(path)?;
    let (fm, body) = split_front_matter(&text)?;

    let mut fm = match fm {
        Some(Json::Object(map)) => map,
        _ => {
            return Err(StoreError::FrontMatter(format!(
                "{} has no usable front matter",
                path.display()
            )))
        }
    };

    if !fm.contains_key("_type") {
        return Err(StoreError::FrontMatter(format!(
            "{} front matter lacks _type",
            path.display()
        )));
    }

    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("untitled")
        .to_owned();

    fm.entry("_id".to_owned())
        .or_insert_with(|| Json::String(stem.clone()));
    fm.entry("slug".to_owned())
        .or_insert_with(|| Json::String(stem));

    let blocks = body_to_blocks(&body);
    if !blocks.is_empty() {
        fm.entry("body".to_owned()).or_insert(Json::Array(blocks));
    }

    insert_value(Json::Object(fm), store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::FindOptions;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, contents: &str) {
        fs::write(dir.path().join(name), contents).unwrap();
    }

    #[test]
    fn loads_json_documents_single_and_array() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            "homepage.json",
            r#"{ "_id": "home", "_type": "homepage", "hero": { "heading": "Hi" } }"#,
        );
        write(
            &dir,
            "posts.json",
            r#"[
                { "_id": "p1", "_type": "post", "slug": "one", "title": "One" },
                { "_id": "p2", "_type": "post", "slug": "two", "title": "Two" }
            ]"#,
        );

        let (store, errors) = load_dataset(dir.path()).unwrap();
        assert!(errors.is_empty());
        assert_eq!(store.len(), 3);
        assert_eq!(store.document("post", "one").unwrap().id, "p1");
        assert!(store.singleton("homepage").is_some());
    }

    #[test]
    fn loads_ndjson_one_document_per_line() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            "authors.ndjson",
            "{\"_id\":\"a1\",\"_type\":\"author\",\"name\":\"Robin\"}\n\n{\"_id\":\"a2\",\"_type\":\"author\",\"name\":\"Sam\"}\n",
        );

        let (store, errors) = load_dataset(dir.path()).unwrap();
        assert!(errors.is_empty());
        assert_eq!(store.list("author", &FindOptions::default()).len(), 2);
    }

    #[test]
    fn loads_markdown_with_yaml_front_matter() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            "hello.md",
            "---\n_type: post\ntitle: Hello\n---\nFirst paragraph.\n\nSecond paragraph.\n",
        );

        let (store, errors) = load_dataset(dir.path()).unwrap();
        assert!(errors.is_empty());

        let doc = store.document("post", "hello").unwrap();
        assert_eq!(doc.str_field("title"), Some("Hello"));
        let body = doc.array_field("body").unwrap();
        assert_eq!(body.len(), 2);
        assert_eq!(body[0]["_type"], "block");
        assert_eq!(body[0]["children"][0]["text"], "First paragraph.");
    }

    #[test]
    fn loads_markdown_with_toml_front_matter() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            "notes.md",
            "+++\n_type = \"page\"\ntitle = \"Notes\"\n+++\nBody here.\n",
        );

        let (store, errors) = load_dataset(dir.path()).unwrap();
        assert!(errors.is_empty());
        let doc = store.document("page", "notes").unwrap();
        assert_eq!(doc.str_field("title"), Some("Notes"));
    }

    #[test]
    fn malformed_file_is_skipped_not_fatal() {
        let dir = TempDir::new().unwrap();
        write(&dir, "bad.json", "{ not json");
        write(
            &dir,
            "good.json",
            r#"{ "_id": "p1", "_type": "post", "slug": "ok", "title": "Ok" }"#,
        );
        write(&dir, "no-type.md", "---\ntitle: Missing type\n---\nBody.\n");

        let (store, errors) = load_dataset(dir.path()).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(errors.len(), 2);
        assert!(store.document("post", "ok").is_some());
    }

    #[test]
    fn bad_element_in_json_array_rejects_the_whole_file() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            "posts.json",
            r#"[
                { "_id": "p1", "_type": "post", "slug": "ok", "title": "Ok" },
                { "title": "no id or type" },
                { "_id": "p2", "_type": "post", "slug": "also-ok", "title": "Also" }
            ]"#,
        );
        write(
            &dir,
            "solo.json",
            r#"{ "_id": "p3", "_type": "post", "slug": "solo", "title": "Solo" }"#,
        );

        let (store, errors) = load_dataset(dir.path()).unwrap();
        assert_eq!(errors.len(), 1);
        // Neither neighbor of the bad element lands; the other file still does.
        assert!(store.document("post", "ok").is_none());
        assert!(store.document("post", "also-ok").is_none());
        assert!(store.document("post", "solo").is_some());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn bad_line_in_ndjson_rejects_the_whole_file() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            "authors.ndjson",
            "{\"_id\":\"a1\",\"_type\":\"author\",\"name\":\"Robin\"}\nnot json at all\n{\"_id\":\"a2\",\"_type\":\"author\",\"name\":\"Sam\"}\n",
        );

        let (store, errors) = load_dataset(dir.path()).unwrap();
        assert_eq!(errors.len(), 1);
        assert!(store.is_empty());
    }

    #[test]
    fn unrecognized_extensions_are_ignored() {
        let dir = TempDir::new().unwrap();
        write(&dir, "style.css", "body { color: red }");
        write(&dir, "readme.txt", "nothing to see");

        let (store, errors) = load_dataset(dir.path()).unwrap();
        assert!(store.is_empty());
        assert!(errors.is_empty());
    }

    #[test]
    fn front_matter_slug_wins_over_file_stem() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            "draft-7.md",
            "---\n_type: post\nslug: final-title\ntitle: T\n---\nBody.\n",
        );

        let (store, _) = load_dataset(dir.path()).unwrap();
        assert!(store.document("post", "final-title").is_some());
        assert!(store.document("post", "draft-7").is_none());
    }
}
