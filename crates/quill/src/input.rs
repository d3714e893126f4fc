//! Loading rich-text documents from JSON files.

use std::path::Path;

use quill_citations::marker_html_from_node;
use quill_export::{ContentBlock, FormattingMode};
use quill_renderer::{NodeType, RichTextNode};
use serde::Deserialize;

use crate::error::CliError;

/// One entry of a block list file.
#[derive(Debug, Deserialize)]
struct BlockEntry {
    id: u64,
    #[serde(default)]
    formatting: Option<FormattingMode>,
    #[serde(alias = "content")]
    document: RichTextNode,
}

/// Input file shape: a list of blocks, or a single document.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InputFile {
    Blocks(Vec<BlockEntry>),
    Document(RichTextNode),
}

/// Read content blocks from `path`.
///
/// A bare document becomes one block with `block_id`. Blocks without a
/// formatting mode get `formatting`.
pub(crate) fn load_blocks(
    path: &Path,
    block_id: u64,
    formatting: FormattingMode,
) -> Result<Vec<ContentBlock>, CliError> {
    let content = std::fs::read_to_string(path)?;
    parse_blocks(&content, block_id, formatting)
}

fn parse_blocks(
    content: &str,
    block_id: u64,
    formatting: FormattingMode,
) -> Result<Vec<ContentBlock>, CliError> {
    let blocks = match serde_json::from_str(content)? {
        InputFile::Blocks(entries) => entries
            .into_iter()
            .map(|entry| {
                ContentBlock::new(entry.id, entry.document)
                    .with_formatting(entry.formatting.unwrap_or(formatting))
            })
            .collect(),
        InputFile::Document(document) => {
            vec![ContentBlock::new(block_id, document).with_formatting(formatting)]
        }
    };
    tracing::info!(blocks = blocks.len(), "Loaded content blocks");
    Ok(blocks)
}

/// Read citation marker markup from `path`.
///
/// JSON files are read as rich-text documents and the marker is taken from
/// the first citation block; anything else is read as HTML.
pub(crate) fn load_citation_markup(path: &Path) -> Result<String, CliError> {
    let content = std::fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if !is_json {
        return Ok(content);
    }

    let document: RichTextNode = serde_json::from_str(&content)?;
    Ok(citation_markup(&document).unwrap_or_else(|| {
        tracing::info!(path = %path.display(), "Document has no citation block");
        String::new()
    }))
}

fn citation_markup(node: &RichTextNode) -> Option<String> {
    if node.node_type == NodeType::CitationBlock {
        return Some(marker_html_from_node(node));
    }
    node.children().iter().find_map(citation_markup)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_single_document() {
        let blocks = parse_blocks(
            r#"{"type": "doc", "content": []}"#,
            7,
            FormattingMode::OrderedList,
        )
        .unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].id, 7);
        assert_eq!(blocks[0].formatting, FormattingMode::OrderedList);
    }

    #[test]
    fn test_block_list() {
        let json = r#"[
            {"id": 1, "formatting": "group-items", "document": {"type": "doc"}},
            {"id": 2, "content": {"type": "doc"}}
        ]"#;
        let blocks = parse_blocks(json, 0, FormattingMode::LeftIndentation).unwrap();
        let summary: Vec<_> = blocks.iter().map(|b| (b.id, b.formatting)).collect();
        assert_eq!(
            summary,
            vec![
                (1, FormattingMode::GroupItems),
                (2, FormattingMode::LeftIndentation)
            ]
        );
    }

    #[test]
    fn test_invalid_json() {
        let err = parse_blocks("{not json", 1, FormattingMode::None).unwrap_err();
        assert!(err.to_string().starts_with("Invalid document"));
    }

    #[test]
    fn test_citation_markup_from_nested_block() {
        let document: RichTextNode = serde_json::from_str(
            r#"{"type": "doc", "content": [
                {"type": "paragraph", "content": [{"type": "text", "text": "Intro"}]},
                {"type": "blockquote", "content": [
                    {"type": "citationBlock", "content": [
                        {"type": "paragraph", "content": [
                            {"type": "text", "text": "<u-cite>[{\"id\": \"a\"}]</u-cite>"}
                        ]}
                    ]}
                ]}
            ]}"#,
        )
        .unwrap();
        assert_eq!(
            citation_markup(&document).as_deref(),
            Some(r#"<u-cite>[{"id": "a"}]</u-cite>"#)
        );
    }

    #[test]
    fn test_load_citation_markup_json_and_html() {
        let dir = tempfile::tempdir().unwrap();

        let json = dir.path().join("page.json");
        std::fs::write(
            &json,
            r#"{"type": "doc", "content": [{"type": "citationBlock", "attrs": {"html": "<u-cite>[]</u-cite>"}}]}"#,
        )
        .unwrap();
        assert_eq!(load_citation_markup(&json).unwrap(), "<u-cite>[]</u-cite>");

        let html = dir.path().join("page.html");
        std::fs::write(&html, "<p>No marker</p>").unwrap();
        assert_eq!(load_citation_markup(&html).unwrap(), "<p>No marker</p>");

        let empty = dir.path().join("empty.json");
        std::fs::write(&empty, r#"{"type": "doc", "content": []}"#).unwrap();
        assert_eq!(load_citation_markup(&empty).unwrap(), "");
    }
}
