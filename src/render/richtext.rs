//! Structured rich text to HTML conversion.
//!
//! Trust boundary: all text and URLs arriving here come from the content
//! API and are treated as untrusted. Text nodes go through maud's
//! auto-escaping and hyperlink/image URLs are scheme-checked before use.

use maud::{Markup, PreEscaped, html};

use crate::cms::document::{RichTextBlock, Span};
use crate::render::components::is_safe_url;

/// Convert a sequence of rich text blocks into HTML.
///
/// Consecutive list-item blocks are grouped into a single `<ul>` or `<ol>`.
pub fn render_blocks(blocks: &[RichTextBlock]) -> Markup {
    let mut out = String::new();
    let mut i = 0;
    while i < blocks.len() {
        let block = &blocks[i];
        match block.kind.as_str() {
            "list-item" | "o-list-item" => {
                let tag = if block.kind == "list-item" { "ul" } else { "ol" };
                let kind = block.kind.clone();
                out.push_str(&format!("<{tag}>"));
                while i < blocks.len() && blocks[i].kind == kind {
                    out.push_str("<li>");
                    out.push_str(&render_spans(&blocks[i].text, &blocks[i].spans).0);
                    out.push_str("</li>");
                    i += 1;
                }
                out.push_str(&format!("</{tag}>"));
            }
            _ => {
                out.push_str(&render_block(block).0);
                i += 1;
            }
        }
    }
    PreEscaped(out)
}

fn render_block(block: &RichTextBlock) -> Markup {
    match block.kind.as_str() {
        "heading1" => html! { h1 { (render_spans(&block.text, &block.spans)) } },
        "heading2" => html! { h2 { (render_spans(&block.text, &block.spans)) } },
        "heading3" => html! { h3 { (render_spans(&block.text, &block.spans)) } },
        "heading4" => html! { h4 { (render_spans(&block.text, &block.spans)) } },
        "heading5" => html! { h5 { (render_spans(&block.text, &block.spans)) } },
        "heading6" => html! { h6 { (render_spans(&block.text, &block.spans)) } },
        "preformatted" => html! { pre { (block.text) } },
        "image" => match block.url.as_deref() {
            Some(url) if is_safe_url(url) => html! {
                img src=(url) alt=(block.alt.as_deref().unwrap_or("")) loading="lazy";
            },
            _ => html! {},
        },
        // "paragraph" and anything unrecognized
        _ => html! { p { (render_spans(&block.text, &block.spans)) } },
    }
}

/// Apply formatting spans to a text node.
///
/// Span offsets are in characters with an exclusive end. Spans that are
/// out of range, inverted, or overlap an earlier span are skipped rather
/// than producing malformed markup.
fn render_spans(text: &str, spans: &[Span]) -> Markup {
    if spans.is_empty() {
        return html! { (text) };
    }

    // Char offset -> byte offset lookup, one extra entry for the end.
    let mut byte_at: Vec<usize> = text.char_indices().map(|(b, _)| b).collect();
    byte_at.push(text.len());
    let n_chars = byte_at.len() - 1;

    let mut valid: Vec<&Span> = spans
        .iter()
        .filter(|s| s.start < s.end && s.end <= n_chars)
        .collect();
    valid.sort_by_key(|s| (s.start, s.end));

    let mut out = String::new();
    let mut cursor = 0usize;
    for span in valid {
        if span.start < cursor {
            // Overlaps a span already emitted.
            continue;
        }
        out.push_str(&html! { (&text[byte_at[cursor]..byte_at[span.start]]) }.0);
        let inner = &text[byte_at[span.start]..byte_at[span.end]];
        out.push_str(&render_span(inner, span).0);
        cursor = span.end;
    }
    out.push_str(&html! { (&text[byte_at[cursor]..]) }.0);
    PreEscaped(out)
}

fn render_span(inner: &str, span: &Span) -> Markup {
    match span.kind.as_str() {
        "strong" => html! { strong { (inner) } },
        "em" => html! { em { (inner) } },
        "hyperlink" => {
            let url = span.data.as_ref().and_then(|d| d.url.as_deref());
            match url {
                Some(url) if is_safe_url(url) => html! {
                    a href=(url) rel="noopener noreferrer" { (inner) }
                },
                _ => html! { (inner) },
            }
        }
        _ => html! { (inner) },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cms::document::SpanData;

    fn block(kind: &str, text: &str) -> RichTextBlock {
        RichTextBlock {
            kind: kind.to_string(),
            text: text.to_string(),
            spans: Vec::new(),
            url: None,
            alt: None,
        }
    }

    fn span(start: usize, end: usize, kind: &str) -> Span {
        Span {
            start,
            end,
            kind: kind.to_string(),
            data: None,
        }
    }

    #[test]
    fn paragraph_text_is_escaped() {
        let html = render_blocks(&[block("paragraph", "<script>alert(1)</script>")]).into_string();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn strong_and_em_spans() {
        let mut b = block("paragraph", "hello brave world");
        b.spans = vec![span(0, 5, "strong"), span(6, 11, "em")];
        let html = render_blocks(&[b]).into_string();
        assert_eq!(
            html,
            "<p><strong>hello</strong> <em>brave</em> world</p>"
        );
    }

    #[test]
    fn hyperlink_span_with_safe_url() {
        let mut b = block("paragraph", "see docs");
        b.spans = vec![Span {
            start: 4,
            end: 8,
            kind: "hyperlink".to_string(),
            data: Some(SpanData {
                url: Some("https://example.com/docs".to_string()),
            }),
        }];
        let html = render_blocks(&[b]).into_string();
        assert!(html.contains(r#"<a href="https://example.com/docs" rel="noopener noreferrer">docs</a>"#));
    }

    #[test]
    fn hyperlink_with_unsafe_url_renders_plain_text() {
        let mut b = block("paragraph", "click me");
        b.spans = vec![Span {
            start: 0,
            end: 5,
            kind: "hyperlink".to_string(),
            data: Some(SpanData {
                url: Some("javascript:alert(1)".to_string()),
            }),
        }];
        let html = render_blocks(&[b]).into_string();
        assert!(!html.contains("javascript:"));
        assert!(html.contains("click"));
    }

    #[test]
    fn consecutive_list_items_grouped() {
        let html = render_blocks(&[
            block("list-item", "one"),
            block("list-item", "two"),
            block("paragraph", "after"),
        ])
        .into_string();
        assert_eq!(html, "<ul><li>one</li><li>two</li></ul><p>after</p>");
    }

    #[test]
    fn ordered_list_uses_ol() {
        let html =
            render_blocks(&[block("o-list-item", "first"), block("o-list-item", "second")])
                .into_string();
        assert_eq!(html, "<ol><li>first</li><li>second</li></ol>");
    }

    #[test]
    fn heading_levels() {
        let html = render_blocks(&[block("heading2", "Section"), block("heading3", "Sub")])
            .into_string();
        assert_eq!(html, "<h2>Section</h2><h3>Sub</h3>");
    }

    #[test]
    fn preformatted_block() {
        let html = render_blocks(&[block("preformatted", "let x = <T>;")]).into_string();
        assert_eq!(html, "<pre>let x = &lt;T&gt;;</pre>");
    }

    #[test]
    fn image_block_with_unsafe_url_dropped() {
        let mut b = block("image", "");
        b.url = Some("javascript:x".to_string());
        assert_eq!(render_blocks(&[b]).into_string(), "");
    }

    #[test]
    fn image_block_rendered_lazy() {
        let mut b = block("image", "");
        b.url = Some("https://images.example.com/a.png".to_string());
        b.alt = Some("a pic".to_string());
        let html = render_blocks(&[b]).into_string();
        assert!(html.contains(r#"src="https://images.example.com/a.png""#));
        assert!(html.contains(r#"loading="lazy""#));
        assert!(html.contains(r#"alt="a pic""#));
    }

    #[test]
    fn overlapping_spans_first_wins() {
        let mut b = block("paragraph", "abcdef");
        b.spans = vec![span(0, 4, "strong"), span(2, 6, "em")];
        let html = render_blocks(&[b]).into_string();
        assert_eq!(html, "<p><strong>abcd</strong>ef</p>");
    }

    #[test]
    fn out_of_range_span_skipped() {
        let mut b = block("paragraph", "short");
        b.spans = vec![span(0, 99, "strong")];
        let html = render_blocks(&[b]).into_string();
        assert_eq!(html, "<p>short</p>");
    }

    #[test]
    fn span_offsets_are_character_based() {
        // "águas" -- 'á' is two bytes, offsets must still be chars.
        let mut b = block("paragraph", "águas de março");
        b.spans = vec![span(0, 5, "strong")];
        let html = render_blocks(&[b]).into_string();
        assert_eq!(html, "<p><strong>águas</strong> de março</p>");
    }
}
