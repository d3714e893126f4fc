//! Block tree normalizer.
//!
//! Converts a [`RichTextNode`] tree into an ordered list of
//! [`IntermediateBlock`]s. Nodes that cannot be normalized are skipped so one
//! bad node never prevents its siblings from rendering.

use crate::block::{Alignment, IntermediateBlock};
use crate::inline::render_runs;
use crate::model::{NodeType, RichTextNode};
use crate::state::anchor_slug;

/// Largest heading level emitted.
const MAX_HEADING_LEVEL: u8 = 6;

/// Normalizes a document tree for one content block.
///
/// The block id feeds heading anchors (`{block_id}-{slug}`), so the same
/// heading text in two blocks gets two distinct navigation targets.
#[derive(Clone, Debug)]
pub struct BlockParser {
    block_id: String,
}

impl BlockParser {
    /// Create a parser for the content block identified by `block_id`.
    #[must_use]
    pub fn new(block_id: impl Into<String>) -> Self {
        Self {
            block_id: block_id.into(),
        }
    }

    /// Block id used for heading anchors.
    #[must_use]
    pub fn block_id(&self) -> &str {
        &self.block_id
    }

    /// Normalize the children of `root` (usually a `doc` node).
    #[must_use]
    pub fn parse(&self, root: &RichTextNode) -> Vec<IntermediateBlock> {
        self.parse_nodes(root.children())
    }

    /// Normalize a sequence of sibling block nodes.
    #[must_use]
    pub fn parse_nodes(&self, nodes: &[RichTextNode]) -> Vec<IntermediateBlock> {
        nodes.iter().filter_map(|node| self.parse_node(node)).collect()
    }

    /// Normalize a single block node, or `None` if it produces no output.
    #[must_use]
    pub fn parse_node(&self, node: &RichTextNode) -> Option<IntermediateBlock> {
        match &node.node_type {
            NodeType::Paragraph => {
                // Empty paragraph (no content at all) is skipped; whitespace-only is kept
                node.content.as_ref()?;
                Some(IntermediateBlock::Paragraph {
                    html: render_runs(&node.text_runs()),
                    alignment: alignment(node),
                })
            }
            NodeType::Heading => Some(self.heading(node)),
            NodeType::Blockquote => Some(IntermediateBlock::Blockquote {
                content: self.parse_nodes(node.children()),
            }),
            NodeType::OrderedList => Some(IntermediateBlock::OrderedList {
                items: self.list_items(node),
            }),
            NodeType::BulletList => Some(IntermediateBlock::BulletList {
                items: self.list_items(node),
            }),
            NodeType::CodeBlock => Some(IntermediateBlock::CodeBlock {
                html: render_runs(&node.text_runs()),
                attrs: node.attrs.clone(),
            }),
            NodeType::Warning => Some(IntermediateBlock::Warning {
                html: render_runs(&node.text_runs()),
                attrs: node.attrs.clone(),
            }),
            NodeType::Image => Some(IntermediateBlock::Image {
                attrs: node.attrs.clone(),
            }),
            NodeType::Divider => Some(IntermediateBlock::Divider {
                attrs: node.attrs.clone(),
            }),
            NodeType::CitationBlock => {
                tracing::debug!(block_id = %self.block_id, "citation block left to citation pipeline");
                None
            }
            other => {
                tracing::debug!(block_id = %self.block_id, node_type = other.as_str(), "skipping unsupported node");
                None
            }
        }
    }

    fn heading(&self, node: &RichTextNode) -> IntermediateBlock {
        let level = node.attr_u64("level").map_or_else(
            || {
                tracing::debug!(block_id = %self.block_id, "heading without level, using 1");
                1
            },
            |level| u8::try_from(level.clamp(1, u64::from(MAX_HEADING_LEVEL))).unwrap_or(1),
        );
        let html = render_runs(&node.text_runs());
        let anchor_id = format!("{}-{}", self.block_id, anchor_slug(&html));

        IntermediateBlock::Heading {
            html,
            level,
            id: node.attr_string("id"),
            anchor_id,
            alignment: alignment(node),
        }
    }

    fn list_items(&self, list: &RichTextNode) -> Vec<Vec<IntermediateBlock>> {
        list.children()
            .iter()
            .map(|item| self.parse_nodes(item.children()))
            .collect()
    }
}

fn alignment(node: &RichTextNode) -> Option<Alignment> {
    node.attr_str("textAlign").and_then(Alignment::from_attr)
}

/// Normalization into [`IntermediateBlock`]s.
///
/// Implemented for source trees and for already-normalized blocks; the
/// latter is the identity, which makes normalization idempotent.
pub trait Normalize {
    /// Produce the normalized block list.
    fn normalize(&self, parser: &BlockParser) -> Vec<IntermediateBlock>;
}

impl Normalize for RichTextNode {
    fn normalize(&self, parser: &BlockParser) -> Vec<IntermediateBlock> {
        if self.node_type == NodeType::Doc {
            parser.parse(self)
        } else {
            parser.parse_node(self).into_iter().collect()
        }
    }
}

impl Normalize for IntermediateBlock {
    fn normalize(&self, parser: &BlockParser) -> Vec<IntermediateBlock> {
        let block = match self {
            Self::OrderedList { items } => Self::OrderedList {
                items: items.iter().map(|item| item.normalize(parser)).collect(),
            },
            Self::BulletList { items } => Self::BulletList {
                items: items.iter().map(|item| item.normalize(parser)).collect(),
            },
            Self::Blockquote { content } => Self::Blockquote {
                content: content.normalize(parser),
            },
            other => other.clone(),
        };
        vec![block]
    }
}

impl<T: Normalize> Normalize for [T] {
    fn normalize(&self, parser: &BlockParser) -> Vec<IntermediateBlock> {
        self.iter().flat_map(|node| node.normalize(parser)).collect()
    }
}

impl<T: Normalize> Normalize for Vec<T> {
    fn normalize(&self, parser: &BlockParser) -> Vec<IntermediateBlock> {
        self.as_slice().normalize(parser)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::model::{Mark, RichTextNode};

    fn doc(json: serde_json::Value) -> RichTextNode {
        serde_json::from_value(json).unwrap()
    }

    fn parse(json: serde_json::Value) -> Vec<IntermediateBlock> {
        BlockParser::new("Section1").parse(&doc(json))
    }

    #[test]
    fn test_empty_paragraph_skipped() {
        let blocks = parse(json!({"type": "doc", "content": [{"type": "paragraph"}]}));
        assert!(blocks.is_empty());
    }

    #[test]
    fn test_paragraph_with_empty_run_kept() {
        let blocks = parse(json!({"type": "doc", "content": [
            {"type": "paragraph", "content": [{"type": "text", "text": ""}]}
        ]}));
        assert_eq!(
            blocks,
            vec![IntermediateBlock::Paragraph {
                html: String::new(),
                alignment: None
            }]
        );
    }

    #[test]
    fn test_whitespace_paragraph_kept() {
        let blocks = parse(json!({"type": "doc", "content": [
            {"type": "paragraph", "content": [{"type": "text", "text": " "}]}
        ]}));
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].html(), Some(" "));
    }

    #[test]
    fn test_unknown_type_skipped() {
        let blocks = parse(json!({"type": "doc", "content": [
            {"type": "foo", "content": [{"type": "text", "text": "x"}]},
            {"type": "paragraph", "content": [{"type": "text", "text": "kept"}]}
        ]}));
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].html(), Some("kept"));
    }

    #[test]
    fn test_heading() {
        let blocks = parse(json!({"type": "doc", "content": [
            {"type": "heading", "attrs": {"level": 2, "id": "h-1", "textAlign": "center"},
             "content": [{"type": "text", "text": "Getting Started"}]}
        ]}));
        assert_eq!(
            blocks,
            vec![IntermediateBlock::Heading {
                html: "Getting Started".to_owned(),
                level: 2,
                id: Some("h-1".to_owned()),
                anchor_id: "Section1-Getting-Started".to_owned(),
                alignment: Some(Alignment::Center),
            }]
        );
    }

    #[test]
    fn test_heading_anchor_uses_unescaped_text() {
        let blocks = parse(json!({"type": "doc", "content": [
            {"type": "heading", "attrs": {"level": 2},
             "content": [{"type": "text", "text": "Q&A <intro>"}]}
        ]}));
        let IntermediateBlock::Heading { html, anchor_id, .. } = &blocks[0] else {
            panic!("expected heading, got {blocks:?}");
        };
        assert_eq!(html, "Q&amp;A &lt;intro&gt;");
        assert_eq!(anchor_id, "Section1-Q&A-<intro>");
    }

    #[test]
    fn test_heading_level_defaults_and_clamps() {
        let blocks = parse(json!({"type": "doc", "content": [
            {"type": "heading", "content": [{"type": "text", "text": "A"}]},
            {"type": "heading", "attrs": {"level": 9}, "content": [{"type": "text", "text": "B"}]}
        ]}));
        assert!(matches!(blocks[0], IntermediateBlock::Heading { level: 1, .. }));
        assert!(matches!(blocks[1], IntermediateBlock::Heading { level: 6, .. }));
    }

    #[test]
    fn test_lists_recurse_per_item() {
        let blocks = parse(json!({"type": "doc", "content": [
            {"type": "bulletList", "content": [
                {"type": "listItem", "content": [
                    {"type": "paragraph", "content": [{"type": "text", "text": "one"}]}
                ]},
                {"type": "listItem", "content": [
                    {"type": "paragraph", "content": [{"type": "text", "text": "two"}]},
                    {"type": "orderedList", "content": [
                        {"type": "listItem", "content": [
                            {"type": "paragraph", "content": [{"type": "text", "text": "nested"}]}
                        ]}
                    ]}
                ]}
            ]}
        ]}));
        let IntermediateBlock::BulletList { items } = &blocks[0] else {
            panic!("expected bullet list");
        };
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].len(), 1);
        assert_eq!(items[1].len(), 2);
        assert!(matches!(items[1][1], IntermediateBlock::OrderedList { .. }));
    }

    #[test]
    fn test_blockquote_recurses() {
        let blocks = parse(json!({"type": "doc", "content": [
            {"type": "blockquote", "content": [
                {"type": "paragraph", "content": [{"type": "text", "text": "quoted"}]},
                {"type": "paragraph"}
            ]}
        ]}));
        let IntermediateBlock::Blockquote { content } = &blocks[0] else {
            panic!("expected blockquote");
        };
        assert_eq!(content.len(), 1);
    }

    #[test]
    fn test_code_and_warning_renamed() {
        let blocks = parse(json!({"type": "doc", "content": [
            {"type": "codeBlock", "attrs": {"language": "rust"},
             "content": [{"type": "text", "text": "fn main() {}"}]},
            {"type": "WarningBlock", "attrs": {"level": "high"},
             "content": [{"type": "text", "text": "Careful", "marks": [{"type": "bold"}]}]}
        ]}));
        assert_eq!(blocks[0].kind(), "codeBlock");
        assert_eq!(blocks[0].attrs().unwrap()["language"], "rust");
        assert_eq!(blocks[1].kind(), "warning");
        assert_eq!(blocks[1].html(), Some("<strong>Careful</strong>"));
        assert_eq!(blocks[1].attrs().unwrap()["level"], "high");
    }

    #[test]
    fn test_void_blocks_keep_attrs() {
        let blocks = parse(json!({"type": "doc", "content": [
            {"type": "ImageBlock", "attrs": {"src": "a.png", "alt": "A", "extra": {"x": 1}}},
            {"type": "DividerBlock", "attrs": {"type": "dotted"}}
        ]}));
        assert_eq!(blocks[0].kind(), "image");
        assert_eq!(blocks[0].attrs().unwrap()["extra"]["x"], 1);
        assert_eq!(blocks[1].attrs().unwrap()["type"], "dotted");
    }

    #[test]
    fn test_citation_block_left_out() {
        let blocks = parse(json!({"type": "doc", "content": [
            {"type": "citationBlock", "content": [{"type": "text", "text": "<u-cite>[]</u-cite>"}]}
        ]}));
        assert!(blocks.is_empty());
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let tree = doc(json!({"type": "doc", "content": [
            {"type": "heading", "attrs": {"level": 1}, "content": [{"type": "text", "text": "T"}]},
            {"type": "paragraph", "content": [
                {"type": "text", "text": "x", "marks": [{"type": "link", "attrs": {"href": "/x"}}]}
            ]},
            {"type": "orderedList", "content": [
                {"type": "listItem", "content": [
                    {"type": "blockquote", "content": [
                        {"type": "paragraph", "content": [{"type": "text", "text": "q"}]}
                    ]}
                ]}
            ]},
            {"type": "DividerBlock"}
        ]}));
        let parser = BlockParser::new("S");
        let once = tree.normalize(&parser);
        let twice = once.normalize(&parser);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_normalize_single_node() {
        let node = RichTextNode::new(NodeType::Paragraph)
            .with_content(vec![RichTextNode::text("hi").with_mark(Mark::new("italic"))]);
        let blocks = node.normalize(&BlockParser::new("S"));
        assert_eq!(blocks[0].html(), Some("<em>hi</em>"));
    }
}
