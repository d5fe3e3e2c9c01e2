// crates/render/src/blocks.rs

//! Block → HTML dispatch.
//!
//! `render_blocks` is pure, total, and order-preserving: exactly one output
//! fragment per input block, in input order. Unknown discriminants produce an
//! empty fragment rather than an error, so a newer CMS schema cannot break an
//! older site build. All authored text is HTML-escaped.

use html_escape::encode_text;
use schema::block::{Block, Span};
use std::borrow::Cow;

/// Render an ordered block sequence. `out.len() == blocks.len()` always;
/// no-op positions hold the empty string.
pub fn render_blocks(blocks: &[Block]) -> Vec<String> {
    blocks.iter().map(render_block).collect()
}

/// Convenience: the joined non-empty fragments.
pub fn render_blocks_html(blocks: &[Block]) -> String {
    render_blocks(blocks)
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn esc(text: &str) -> Cow<'_, str> {
    encode_text(text)
}

fn render_spans(spans: &[Span]) -> String {
    let mut out = String::new();
    for span in spans {
        let mut html = esc(&span.text).into_owned();
        for mark in &span.marks {
            html = match mark.as_str() {
                "strong" => format!("<strong>{html}</strong>"),
                "em" => format!("<em>{html}</em>"),
                "code" => format!("<code>{html}</code>"),
                "underline" => format!("<u>{html}</u>"),
                "strike" => format!("<s>{html}</s>"),
                // Unrecognized marks are dropped, the text survives.
                _ => html,
            };
        }
        out.push_str(&html);
    }
    out
}

fn render_rich_text(style: &str, spans: &[Span]) -> String {
    let inner = render_spans(spans);
    match style {
        "h1" | "h2" | "h3" | "h4" => format!("<{style}>{inner}</{style}>"),
        "blockquote" => format!("<blockquote>{inner}</blockquote>"),
        _ => format!("<p>{inner}</p>"),
    }
}

fn render_block(block: &Block) -> String {
    match block {
        Block::RichText { style, spans } => render_rich_text(style, spans),

        Block::Callout {
            emoji,
            title,
            variant,
            content,
        } => {
            let icon = emoji
                .as_deref()
                .map(|e| esc(e).into_owned())
                .unwrap_or_else(|| variant.default_icon().to_owned());

            let mut html = format!(
                "<aside class=\"callout callout-{}\"><span class=\"callout-icon\">{}</span>",
                variant.as_str(),
                icon
            );
            // No title authored → no title line at all.
            if let Some(title) = title {
                html.push_str(&format!(
                    "<p class=\"callout-title\">{}</p>",
                    esc(title)
                ));
            }
            html.push_str("<div class=\"callout-body\">");
            html.push_str(&render_blocks_html(content));
            html.push_str("</div></aside>");
            html
        }

        Block::Quote { text, attribution } => {
            let mut html = format!("<figure class=\"quote\"><blockquote>{}</blockquote>", esc(text));
            if let Some(by) = attribution {
                html.push_str(&format!("<figcaption>{}</figcaption>", esc(by)));
            }
            html.push_str("</figure>");
            html
        }

        Block::Code { language, code } => {
            let class = language
                .as_deref()
                .map(|l| format!(" class=\"language-{}\"", esc(l)))
                .unwrap_or_default();
            format!("<pre><code{class}>{}</code></pre>", esc(code))
        }

        Block::Toggle { title, content } => format!(
            "<details class=\"toggle\"><summary>{}</summary>{}</details>",
            esc(title),
            render_blocks_html(content)
        ),

        Block::Todo { text, checked } => {
            let checked_attr = if *checked { " checked" } else { "" };
            format!(
                "<label class=\"todo\"><input type=\"checkbox\" disabled{checked_attr}> {}</label>",
                esc(text)
            )
        }

        Block::Hero {
            heading,
            tagline,
            image,
        } => {
            let mut html = format!("<section class=\"hero\"><h1>{}</h1>", esc(heading));
            if let Some(tagline) = tagline {
                html.push_str(&format!("<p class=\"tagline\">{}</p>", esc(tagline)));
            }
            if let Some(image) = image {
                html.push_str(&format!(
                    "<img src=\"{}\" alt=\"\">",
                    html_escape::encode_double_quoted_attribute(image)
                ));
            }
            html.push_str("</section>");
            html
        }

        Block::CallToAction {
            heading,
            button_text,
            button_url,
        } => {
            let mut html = format!("<section class=\"cta\"><h2>{}</h2>", esc(heading));
            if let (Some(text), Some(url)) = (button_text, button_url) {
                html.push_str(&format!(
                    "<a class=\"button\" href=\"{}\">{}</a>",
                    html_escape::encode_double_quoted_attribute(url),
                    esc(text)
                ));
            }
            html.push_str("</section>");
            html
        }

        Block::Content { heading, body } => {
            let mut html = String::from("<section class=\"content\">");
            if let Some(heading) = heading {
                html.push_str(&format!("<h2>{}</h2>", esc(heading)));
            }
            html.push_str(&render_blocks_html(body));
            html.push_str("</section>");
            html
        }

        // Forward-compatibility: unrecognized block types render as no-ops.
        Block::Unknown { .. } => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schema::block::CalloutVariant;
    use serde_json::json;

    fn blocks_from(value: serde_json::Value) -> Vec<Block> {
        Block::parse_array(&value)
    }

    #[test]
    fn output_length_and_order_match_input() {
        let blocks = blocks_from(json!([
            { "_type": "code", "code": "a" },
            { "_type": "futureWidget" },
            { "_type": "todo", "text": "b" }
        ]));

        let out = render_blocks(&blocks);
        assert_eq!(out.len(), blocks.len());
        assert!(out[0].contains("<pre>"));
        assert!(out[1].is_empty(), "unknown block must be a no-op placeholder");
        assert!(out[2].contains("checkbox"));
    }

    #[test]
    fn unknown_discriminant_renders_noop_without_panicking() {
        let blocks = vec![Block::Unknown {
            type_name: "embeddedTweet".into(),
        }];
        assert_eq!(render_blocks(&blocks), vec![String::new()]);
    }

    #[test]
    fn callout_warning_without_emoji_or_title() {
        let blocks = blocks_from(json!([
            { "_type": "callout", "variant": "warning" }
        ]));

        let html = &render_blocks(&blocks)[0];
        assert!(html.contains("callout-warning"));
        assert!(
            html.contains(CalloutVariant::Warning.default_icon()),
            "missing emoji must fall back to the variant icon"
        );
        assert!(
            !html.contains("callout-title"),
            "missing title must omit the title line, not render it blank"
        );
    }

    #[test]
    fn callout_authored_emoji_and_title_win() {
        let blocks = blocks_from(json!([
            { "_type": "callout", "emoji": "🚀", "title": "Launch", "variant": "success" }
        ]));

        let html = &render_blocks(&blocks)[0];
        assert!(html.contains("🚀"));
        assert!(!html.contains(CalloutVariant::Success.default_icon()));
        assert!(html.contains("<p class=\"callout-title\">Launch</p>"));
    }

    #[test]
    fn rich_text_styles_and_marks() {
        let blocks = blocks_from(json!([
            { "_type": "block", "style": "h2", "children": [{ "text": "Heading" }] },
            { "_type": "block", "children": [
                { "text": "plain " },
                { "text": "bold-italic", "marks": ["strong", "em"] }
            ] }
        ]));

        let out = render_blocks(&blocks);
        assert_eq!(out[0], "<h2>Heading</h2>");
        assert!(out[1].starts_with("<p>plain "));
        assert!(out[1].contains("<em><strong>bold-italic</strong></em>"));
    }

    #[test]
    fn authored_text_is_html_escaped() {
        let blocks = blocks_from(json!([
            { "_type": "block", "children": [{ "text": "<script>alert(1)</script>" }] },
            { "_type": "code", "code": "if a < b { }" }
        ]));

        let out = render_blocks(&blocks);
        assert!(!out[0].contains("<script>"));
        assert!(out[0].contains("&lt;script&gt;"));
        assert!(out[1].contains("if a &lt; b { }"));
    }

    #[test]
    fn toggle_nests_content_recursively() {
        let blocks = blocks_from(json!([
            { "_type": "toggle", "title": "More", "content": [
                { "_type": "todo", "text": "inner", "checked": true }
            ] }
        ]));

        let html = &render_blocks(&blocks)[0];
        assert!(html.starts_with("<details"));
        assert!(html.contains("<summary>More</summary>"));
        assert!(html.contains("checked"));
    }

    #[test]
    fn code_language_class_only_when_present() {
        let with = blocks_from(json!([{ "_type": "code", "language": "rust", "code": "x" }]));
        assert!(render_blocks(&with)[0].contains("language-rust"));

        let without = blocks_from(json!([{ "_type": "code", "code": "x" }]));
        assert!(!render_blocks(&without)[0].contains("language-"));
    }

    #[test]
    fn page_builder_sections_render() {
        let blocks = blocks_from(json!([
            { "_type": "hero", "heading": "Hi", "tagline": "There" },
            { "_type": "callToAction", "heading": "Subscribe", "buttonText": "Go", "buttonUrl": "/x" },
            { "_type": "content", "heading": "About", "body": [
                { "_type": "block", "children": [{ "text": "words" }] }
            ] }
        ]));

        let out = render_blocks(&blocks);
        assert!(out[0].contains("<h1>Hi</h1>"));
        assert!(out[1].contains("href=\"/x\""));
        assert!(out[2].contains("<h2>About</h2>"));
        assert!(out[2].contains("<p>words</p>"));
    }

    #[test]
    fn joined_html_drops_noop_fragments() {
        let blocks = blocks_from(json!([
            { "_type": "quote", "text": "q" },
            { "_type": "mystery" }
        ]));

        let html = render_blocks_html(&blocks);
        assert!(html.contains("<blockquote>q</blockquote>"));
        assert!(!html.ends_with('\n'));
    }
}
