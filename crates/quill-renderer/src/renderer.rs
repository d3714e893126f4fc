//! Generic block renderer with pluggable backend.

use std::marker::PhantomData;

use serde_json::{Map, Value};

use crate::backend::RenderBackend;
use crate::block::IntermediateBlock;
use crate::state::TocEntry;

/// Result of rendering a block list.
#[derive(Clone, Debug)]
pub struct RenderResult {
    /// Rendered markup.
    pub html: String,
    /// One entry per heading, in document order.
    pub toc: Vec<TocEntry>,
}

/// Generic block renderer with pluggable backend.
///
/// Uses the [`RenderBackend`] trait for element markup and handles the
/// recursive structure (lists, blockquotes) and outline collection itself.
pub struct BlockRenderer<B: RenderBackend> {
    output: String,
    toc: Vec<TocEntry>,
    _backend: PhantomData<B>,
}

impl<B: RenderBackend> BlockRenderer<B> {
    /// Create a new renderer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            output: String::with_capacity(4096),
            toc: Vec::new(),
            _backend: PhantomData,
        }
    }

    /// Render blocks and return the result.
    ///
    /// The renderer is reset afterwards and can be reused.
    pub fn render(&mut self, blocks: &[IntermediateBlock]) -> RenderResult {
        self.render_blocks(blocks);
        RenderResult {
            html: std::mem::take(&mut self.output),
            toc: std::mem::take(&mut self.toc),
        }
    }

    fn render_blocks(&mut self, blocks: &[IntermediateBlock]) {
        for block in blocks {
            self.render_block(block);
        }
    }

    fn render_block(&mut self, block: &IntermediateBlock) {
        match block {
            IntermediateBlock::Paragraph { html, alignment } => {
                B::paragraph(html, *alignment, &mut self.output);
            }
            IntermediateBlock::Heading {
                html,
                level,
                anchor_id,
                alignment,
                ..
            } => {
                B::heading(*level, anchor_id, html, *alignment, &mut self.output);
                self.toc.push(TocEntry {
                    level: *level,
                    title: block.text().unwrap_or_default().trim().to_owned(),
                    id: anchor_id.clone(),
                });
            }
            IntermediateBlock::Image { attrs } => {
                let src = attr(attrs, "src").or_else(|| attr(attrs, "url")).unwrap_or_default();
                let alt = attr(attrs, "alt").unwrap_or_default();
                let caption = attr(attrs, "caption").unwrap_or_default();
                B::image(src, alt, caption, &mut self.output);
            }
            IntermediateBlock::Divider { attrs } => {
                B::divider(attr(attrs, "type"), &mut self.output);
            }
            IntermediateBlock::Warning { html, .. } => {
                B::warning(html, &mut self.output);
            }
            IntermediateBlock::CodeBlock { html, attrs } => {
                let lang = attr(attrs, "language").filter(|lang| !lang.is_empty());
                B::code_block(lang, html, &mut self.output);
            }
            IntermediateBlock::OrderedList { items } => self.render_list(true, items),
            IntermediateBlock::BulletList { items } => self.render_list(false, items),
            IntermediateBlock::Blockquote { content } => {
                B::blockquote_start(&mut self.output);
                self.render_blocks(content);
                B::blockquote_end(&mut self.output);
            }
        }
    }

    fn render_list(&mut self, ordered: bool, items: &[Vec<IntermediateBlock>]) {
        B::list_start(ordered, &mut self.output);
        for item in items {
            B::item_start(&mut self.output);
            self.render_blocks(item);
            B::item_end(&mut self.output);
        }
        B::list_end(ordered, &mut self.output);
    }
}

impl<B: RenderBackend> Default for BlockRenderer<B> {
    fn default() -> Self {
        Self::new()
    }
}

fn attr<'a>(attrs: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    attrs.get(key).and_then(Value::as_str)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::model::RichTextNode;
    use crate::parser::BlockParser;
    use crate::HtmlBackend;

    fn render_json(json: serde_json::Value) -> RenderResult {
        let doc: RichTextNode = serde_json::from_value(json).unwrap();
        let blocks = BlockParser::new("Section5").parse(&doc);
        BlockRenderer::<HtmlBackend>::new().render(&blocks)
    }

    #[test]
    fn test_paragraph() {
        let result = render_json(json!({"type": "doc", "content": [
            {"type": "paragraph", "content": [{"type": "text", "text": "Hello, world!"}]}
        ]}));
        assert_eq!(result.html, "<p>Hello, world!</p>");
        assert!(result.toc.is_empty());
    }

    #[test]
    fn test_heading_anchor_and_toc() {
        let result = render_json(json!({"type": "doc", "content": [
            {"type": "heading", "attrs": {"level": 2},
             "content": [{"type": "text", "text": "Key "}, {"type": "text", "text": "Findings", "marks": [{"type": "italic"}]}]}
        ]}));
        assert_eq!(
            result.html,
            r#"<h2 id="Section5-Key-Findings">Key <em>Findings</em></h2>"#
        );
        assert_eq!(
            result.toc,
            vec![TocEntry {
                level: 2,
                title: "Key Findings".to_owned(),
                id: "Section5-Key-Findings".to_owned(),
            }]
        );
    }

    #[test]
    fn test_heading_id_escaped_once() {
        let result = render_json(json!({"type": "doc", "content": [
            {"type": "heading", "attrs": {"level": 3},
             "content": [{"type": "text", "text": "Q&A"}]}
        ]}));
        assert_eq!(result.html, r#"<h3 id="Section5-Q&amp;A">Q&amp;A</h3>"#);
        assert_eq!(result.toc[0].id, "Section5-Q&A");
        assert_eq!(result.toc[0].title, "Q&A");
    }

    #[test]
    fn test_nested_lists() {
        let result = render_json(json!({"type": "doc", "content": [
            {"type": "orderedList", "content": [
                {"type": "listItem", "content": [
                    {"type": "paragraph", "content": [{"type": "text", "text": "one"}]},
                    {"type": "bulletList", "content": [
                        {"type": "listItem", "content": [
                            {"type": "paragraph", "content": [{"type": "text", "text": "inner"}]}
                        ]}
                    ]}
                ]},
                {"type": "listItem", "content": [
                    {"type": "paragraph", "content": [{"type": "text", "text": "two"}]}
                ]}
            ]}
        ]}));
        assert_eq!(
            result.html,
            "<ol><li><p>one</p><ul><li><p>inner</p></li></ul></li><li><p>two</p></li></ol>"
        );
    }

    #[test]
    fn test_blockquote_and_code() {
        let result = render_json(json!({"type": "doc", "content": [
            {"type": "blockquote", "content": [
                {"type": "paragraph", "content": [{"type": "text", "text": "quote"}]}
            ]},
            {"type": "codeBlock", "attrs": {"language": "js"},
             "content": [{"type": "text", "text": "a < b"}]}
        ]}));
        assert_eq!(
            result.html,
            r#"<blockquote><p>quote</p></blockquote><pre><code class="language-js">a &lt; b</code></pre>"#
        );
    }

    #[test]
    fn test_void_blocks() {
        let result = render_json(json!({"type": "doc", "content": [
            {"type": "ImageBlock", "attrs": {"src": "/img/a.png", "alt": "A"}},
            {"type": "DividerBlock", "attrs": {"type": "line"}}
        ]}));
        assert_eq!(
            result.html,
            r#"<img src="/img/a.png" alt="A"><hr class="divider divider-line">"#
        );
    }

    #[test]
    fn test_warning_block() {
        let result = render_json(json!({"type": "doc", "content": [
            {"type": "WarningBlock", "content": [{"type": "text", "text": "Mind the gap"}]}
        ]}));
        assert!(result.html.contains("alert-warning"));
        assert!(result.html.contains("Mind the gap"));
    }

    #[test]
    fn test_renderer_reusable() {
        let blocks = vec![IntermediateBlock::Paragraph {
            html: "x".to_owned(),
            alignment: None,
        }];
        let mut renderer = BlockRenderer::<HtmlBackend>::default();
        let first = renderer.render(&blocks);
        let second = renderer.render(&blocks);
        assert_eq!(first.html, second.html);
    }
}
