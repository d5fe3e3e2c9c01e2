// crates/schema/src/block.rs

//! Polymorphic rich-text / page-builder blocks.
//!
//! Every block node carries a `_type` discriminant. `Block::from_json` is
//! total: a node with a missing, non-string, or unrecognized discriminant
//! becomes `Block::Unknown`, never an error. The renderer skips those, so a
//! schema addition in the CMS cannot break an older front end.

use serde::{Deserialize, Serialize};
use serde_json::Value as Json;

// ─────────────────────────────────────────────────────────────────────────────
// Rich-text spans
// ─────────────────────────────────────────────────────────────────────────────

/// One run of text with optional decoration marks
/// (`strong`, `em`, `code`, `underline`, `strike`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub marks: Vec<String>,
}

impl Span {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            marks: Vec::new(),
        }
    }

    fn from_json(node: &Json) -> Option<Self> {
        let text = node.get("text")?.as_str()?.to_owned();
        let marks = node
            .get("marks")
            .and_then(Json::as_array)
            .map(|arr| {
                arr.iter()
                    .filter_map(Json::as_str)
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default();
        Some(Self { text, marks })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Callout variants
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalloutVariant {
    Default,
    Warning,
    Info,
    Success,
}

impl CalloutVariant {
    /// Icon used when the author set no emoji.
    pub fn default_icon(self) -> &'static str {
        match self {
            CalloutVariant::Default => "\u{1f4a1}", // 💡
            CalloutVariant::Warning => "\u{26a0}\u{fe0f}", // ⚠️
            CalloutVariant::Info => "\u{2139}\u{fe0f}",    // ℹ️
            CalloutVariant::Success => "\u{2705}", // ✅
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CalloutVariant::Default => "default",
            CalloutVariant::Warning => "warning",
            CalloutVariant::Info => "info",
            CalloutVariant::Success => "success",
        }
    }

    /// Unrecognized variant strings fall back to `Default`.
    pub fn parse(s: &str) -> Self {
        match s {
            "warning" => CalloutVariant::Warning,
            "info" => CalloutVariant::Info,
            "success" => CalloutVariant::Success,
            _ => CalloutVariant::Default,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Block union
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Block {
    /// Plain rich-text node: a paragraph/heading style plus ordered spans.
    RichText {
        /// "normal", "h2", "h3", "blockquote", ...; absent means "normal".
        style: String,
        spans: Vec<Span>,
    },
    Callout {
        emoji: Option<String>,
        title: Option<String>,
        variant: CalloutVariant,
        content: Vec<Block>,
    },
    Quote {
        text: String,
        attribution: Option<String>,
    },
    Code {
        language: Option<String>,
        code: String,
    },
    Toggle {
        title: String,
        content: Vec<Block>,
    },
    Todo {
        text: String,
        checked: bool,
    },
    // Page-builder sections.
    Hero {
        heading: String,
        tagline: Option<String>,
        image: Option<String>,
    },
    CallToAction {
        heading: String,
        button_text: Option<String>,
        button_url: Option<String>,
    },
    Content {
        heading: Option<String>,
        body: Vec<Block>,
    },
    /// Forward-compatible fallback; the renderer emits a no-op for these.
    Unknown { type_name: String },
}

fn opt_str(node: &Json, key: &str) -> Option<String> {
    node.get(key).and_then(Json::as_str).map(str::to_owned)
}

fn nested_blocks(node: &Json, key: &str) -> Vec<Block> {
    node.get(key)
        .and_then(Json::as_array)
        .map(|arr| arr.iter().map(Block::from_json).collect())
        .unwrap_or_default()
}

impl Block {
    /// Total constructor: never fails, unrecognized or malformed nodes become
    /// `Unknown`.
    pub fn from_json(node: &Json) -> Block {
        let type_name = match node.get("_type").and_then(Json::as_str) {
            Some(t) => t,
            None => {
                return Block::Unknown {
                    type_name: String::new(),
                }
            }
        };

        let parsed = match type_name {
            "block" | "richText" => Self::rich_text_from(node),
            "callout" => Self::callout_from(node),
            "quote" => Self::quote_from(node),
            "code" => Self::code_from(node),
            "toggle" => Self::toggle_from(node),
            "todo" => Self::todo_from(node),
            "hero" => Self::hero_from(node),
            "callToAction" => Self::call_to_action_from(node),
            "content" => Self::content_from(node),
            _ => None,
        };

        parsed.unwrap_or_else(|| Block::Unknown {
            type_name: type_name.to_owned(),
        })
    }

    /// Parse an array-of-block field value. Non-array input yields an empty
    /// sequence; each element maps to exactly one block, in order.
    pub fn parse_array(value: &Json) -> Vec<Block> {
        value
            .as_array()
            .map(|arr| arr.iter().map(Block::from_json).collect())
            .unwrap_or_default()
    }

    pub fn type_name(&self) -> &str {
        match self {
            Block::RichText { .. } => "block",
            Block::Callout { .. } => "callout",
            Block::Quote { .. } => "quote",
            Block::Code { .. } => "code",
            Block::Toggle { .. } => "toggle",
            Block::Todo { .. } => "todo",
            Block::Hero { .. } => "hero",
            Block::CallToAction { .. } => "callToAction",
            Block::Content { .. } => "content",
            Block::Unknown { type_name } => type_name,
        }
    }

    fn rich_text_from(node: &Json) -> Option<Block> {
        let style = opt_str(node, "style").unwrap_or_else(|| "normal".to_owned());
        let spans = node
            .get("children")
            .or_else(|| node.get("spans"))
            .and_then(Json::as_array)
            .map(|arr| arr.iter().filter_map(Span::from_json).collect())
            .unwrap_or_default();
        Some(Block::RichText { style, spans })
    }

    fn callout_from(node: &Json) -> Option<Block> {
        let variant = opt_str(node, "variant")
            .map(|v| CalloutVariant::parse(&v))
            .unwrap_or(CalloutVariant::Default);
        Some(Block::Callout {
            emoji: opt_str(node, "emoji"),
            title: opt_str(node, "title"),
            variant,
            content: nested_blocks(node, "content"),
        })
    }

    fn quote_from(node: &Json) -> Option<Block> {
        Some(Block::Quote {
            text: opt_str(node, "text")?,
            attribution: opt_str(node, "attribution"),
        })
    }

    fn code_from(node: &Json) -> Option<Block> {
        Some(Block::Code {
            language: opt_str(node, "language"),
            code: opt_str(node, "code")?,
        })
    }

    fn toggle_from(node: &Json) -> Option<Block> {
        Some(Block::Toggle {
            title: opt_str(node, "title")?,
            content: nested_blocks(node, "content"),
        })
    }

    fn todo_from(node: &Json) -> Option<Block> {
        Some(Block::Todo {
            text: opt_str(node, "text")?,
            checked: node
                .get("checked")
                .and_then(Json::as_bool)
                .unwrap_or(false),
        })
    }

    fn hero_from(node: &Json) -> Option<Block> {
        Some(Block::Hero {
            heading: opt_str(node, "heading")?,
            tagline: opt_str(node, "tagline"),
            image: opt_str(node, "image"),
        })
    }

    fn call_to_action_from(node: &Json) -> Option<Block> {
        Some(Block::CallToAction {
            heading: opt_str(node, "heading")?,
            button_text: opt_str(node, "buttonText"),
            button_url: opt_str(node, "buttonUrl"),
        })
    }

    fn content_from(node: &Json) -> Option<Block> {
        Some(Block::Content {
            heading: opt_str(node, "heading"),
            body: nested_blocks(node, "body"),
        })
    }
}
