//! Export-paragraph renderer.

use quill_citations::CitationList;
use quill_renderer::{IntermediateBlock, unescape_html};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::ExportError;
use crate::format::{FormattingMode, ItemLayout, ItemSource};
use crate::inline::html_to_runs;
use crate::paragraph::{ExportParagraph, NumberingInstance, Run};
use crate::section::SectionContent;
use crate::style::{self, StyleSheet};

/// Largest heading level with a style of its own.
const MAX_HEADING_LEVEL: u8 = 4;

/// Export output of one content block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSection {
    pub block_id: u64,
    pub paragraphs: Vec<ExportParagraph>,
}

/// Renders normalized blocks into styled export paragraphs.
///
/// Every style and numbering reference emitted must exist in the style sheet.
pub struct ExportRenderer<'a> {
    styles: &'a StyleSheet,
}

impl<'a> ExportRenderer<'a> {
    #[must_use]
    pub fn new(styles: &'a StyleSheet) -> Self {
        Self { styles }
    }

    #[must_use]
    pub fn styles(&self) -> &StyleSheet {
        self.styles
    }

    /// Render the blocks of a section using `mode`.
    ///
    /// Items are separated by one empty line; nothing follows the last item.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::UnknownStyle`] or [`ExportError::UnknownNumbering`]
    /// when the layout needs something the style sheet lacks.
    pub fn render_section(
        &self,
        block_id: u64,
        blocks: &[IntermediateBlock],
        mode: FormattingMode,
    ) -> Result<ExportSection, ExportError> {
        let content = SectionContent::from_blocks(blocks.to_vec());
        let layout = mode.layout();
        let mut writer = SectionWriter::new(self.styles, block_id);

        if layout.group_title {
            if let Some(title) = content.title_html() {
                writer.push(ExportParagraph::new(html_to_runs(title)).with_style(style::GROUP_TITLE))?;
            }
        } else {
            writer.generic(&content.main)?;
        }

        let count = content.items.len();
        for (index, item) in content.items.iter().enumerate() {
            writer.item(item, layout)?;
            if index + 1 < count {
                writer.push(ExportParagraph::empty_line())?;
            }
        }

        tracing::debug!(
            block_id,
            formatting = %mode,
            items = count,
            paragraphs = writer.paragraphs.len(),
            "Rendered export section"
        );
        Ok(writer.finish())
    }

    /// Render a numbered bibliography.
    ///
    /// The title becomes a fourth-level heading. Ascending lists share one
    /// decimal numbering instance keyed by the block id; reversed lists carry
    /// their numbers as text in the reversed-list style.
    ///
    /// # Errors
    ///
    /// Returns an error when the style sheet lacks the numbering or style.
    pub fn render_citations(
        &self,
        block_id: u64,
        list: &CitationList,
    ) -> Result<ExportSection, ExportError> {
        let mut writer = SectionWriter::new(self.styles, block_id);

        if let Some(title) = &list.title {
            writer.push(ExportParagraph::new(vec![Run::text(title.as_str())]).with_heading(4))?;
        }

        for entry in &list.entries {
            let runs = html_to_runs(&entry.html);
            let paragraph = if list.reversed {
                let mut numbered = vec![Run::text(format!("{}.", entry.number)), Run::Tab];
                numbered.extend(runs);
                ExportParagraph::new(numbered).with_style(style::REVERSED_LIST)
            } else {
                ExportParagraph::new(runs)
                    .with_numbering(style::NUMBERING, NumberingInstance::section(block_id))
            };
            writer.push(paragraph)?;
        }

        Ok(writer.finish())
    }
}

struct SectionWriter<'a> {
    styles: &'a StyleSheet,
    block_id: u64,
    paragraphs: Vec<ExportParagraph>,
    /// Nested lists seen so far, used to give each its own numbering instance.
    lists: u64,
}

impl<'a> SectionWriter<'a> {
    fn new(styles: &'a StyleSheet, block_id: u64) -> Self {
        Self {
            styles,
            block_id,
            paragraphs: Vec::new(),
            lists: 0,
        }
    }

    fn finish(self) -> ExportSection {
        ExportSection {
            block_id: self.block_id,
            paragraphs: self.paragraphs,
        }
    }

    fn push(&mut self, paragraph: ExportParagraph) -> Result<(), ExportError> {
        if let Some(id) = &paragraph.style
            && self.styles.paragraph_style(id).is_none()
        {
            return Err(ExportError::UnknownStyle(id.clone()));
        }
        if let Some(numbering) = &paragraph.numbering {
            self.check_numbering(&numbering.reference)?;
        }
        self.paragraphs.push(paragraph);
        Ok(())
    }

    fn check_numbering(&self, reference: &str) -> Result<(), ExportError> {
        if self.styles.numbering(reference).is_none() {
            return Err(ExportError::UnknownNumbering(reference.to_owned()));
        }
        Ok(())
    }

    fn item(&mut self, item: &[IntermediateBlock], layout: &ItemLayout) -> Result<(), ExportError> {
        match layout.source {
            ItemSource::AllLists => {
                for list in item.iter().filter(|block| block.is_list()) {
                    let paragraph = self.styled(merge_list(list), layout);
                    if !paragraph.text().trim().is_empty() {
                        self.push(paragraph)?;
                    }
                }
                self.generic_without_lists(item)
            }
            ItemSource::FirstList => {
                if let Some(list) = item.iter().find(|block| block.is_list()) {
                    let paragraph = self.styled(merge_list(list), layout);
                    self.push(paragraph)?;
                }
                self.generic_without_lists(item)
            }
            ItemSource::Paragraphs => {
                for block in item {
                    if let IntermediateBlock::Paragraph { html, alignment } = block {
                        let mut paragraph = self.styled(html_to_runs(html), layout);
                        paragraph.alignment = layout.alignment.or(*alignment);
                        self.push(paragraph)?;
                    }
                }
                Ok(())
            }
            ItemSource::Generic => self.generic(item),
        }
    }

    fn styled(&self, runs: Vec<Run>, layout: &ItemLayout) -> ExportParagraph {
        let mut paragraph = ExportParagraph::new(runs).with_alignment(layout.alignment);
        paragraph.style = layout.style.map(str::to_owned);
        if let Some(reference) = layout.numbering {
            paragraph =
                paragraph.with_numbering(reference, NumberingInstance::section(self.block_id));
        }
        paragraph
    }

    fn generic_without_lists(&mut self, item: &[IntermediateBlock]) -> Result<(), ExportError> {
        let rest: Vec<IntermediateBlock> = item.iter().filter(|block| !block.is_list()).cloned().collect();
        self.generic(&rest)
    }

    /// Render blocks in document order with default styles.
    fn generic(&mut self, blocks: &[IntermediateBlock]) -> Result<(), ExportError> {
        for block in blocks {
            self.block(block)?;
        }
        Ok(())
    }

    fn block(&mut self, block: &IntermediateBlock) -> Result<(), ExportError> {
        match block {
            IntermediateBlock::Paragraph { html, alignment } => {
                self.push(ExportParagraph::new(html_to_runs(html)).with_alignment(*alignment))
            }
            IntermediateBlock::Heading {
                html,
                level,
                alignment,
                ..
            } => self.push(
                ExportParagraph::new(html_to_runs(html))
                    .with_heading((*level).clamp(1, MAX_HEADING_LEVEL))
                    .with_alignment(*alignment),
            ),
            IntermediateBlock::Image { attrs } => self.image(attrs),
            IntermediateBlock::Warning { html, .. } => {
                self.push(ExportParagraph::new(html_to_runs(html)))
            }
            IntermediateBlock::CodeBlock { html, .. } => {
                self.push(ExportParagraph::new(code_runs(html)))
            }
            IntermediateBlock::OrderedList { items } => self.list(style::NUMBERING, items),
            IntermediateBlock::BulletList { items } => self.list(style::EN_DASH, items),
            IntermediateBlock::Blockquote { content } => {
                let start = self.paragraphs.len();
                self.generic(content)?;
                for paragraph in &mut self.paragraphs[start..] {
                    if paragraph.style.is_none() && paragraph.numbering.is_none() {
                        paragraph.style = Some(style::LEFT_INDENTATION.to_owned());
                    }
                }
                self.check_style(style::LEFT_INDENTATION)
            }
            IntermediateBlock::Divider { .. } => Ok(()),
        }
    }

    fn check_style(&self, id: &str) -> Result<(), ExportError> {
        if self.styles.paragraph_style(id).is_none() {
            return Err(ExportError::UnknownStyle(id.to_owned()));
        }
        Ok(())
    }

    fn image(&mut self, attrs: &Map<String, Value>) -> Result<(), ExportError> {
        let src = [attr(attrs, "src"), attr(attrs, "url")]
            .into_iter()
            .find(|src| !src.is_empty());
        let Some(src) = src else {
            tracing::debug!("Image without source skipped");
            return Ok(());
        };

        self.push(ExportParagraph::new(vec![Run::Image {
            src: src.to_owned(),
            alt: attr(attrs, "alt").to_owned(),
        }]))?;
        let caption = attr(attrs, "caption");
        if !caption.is_empty() {
            self.push(ExportParagraph::new(vec![Run::text(caption)]))?;
        }
        Ok(())
    }

    /// Each list gets its own numbering instance so numbering restarts.
    fn list(&mut self, reference: &str, items: &[Vec<IntermediateBlock>]) -> Result<(), ExportError> {
        self.check_numbering(reference)?;
        self.lists += 1;
        let instance = NumberingInstance::nested(self.block_id, self.lists);

        for item in items {
            let start = self.paragraphs.len();
            self.generic(item)?;
            if let Some(first) = self.paragraphs.get_mut(start)
                && first.numbering.is_none()
            {
                *first = std::mem::take(first).with_numbering(reference, instance);
            }
        }
        Ok(())
    }
}

/// String attribute, empty when absent.
fn attr<'a>(attrs: &'a Map<String, Value>, key: &str) -> &'a str {
    attrs.get(key).and_then(Value::as_str).unwrap_or_default()
}

/// Merge every paragraph of a list into one, items separated by tabs.
fn merge_list(list: &IntermediateBlock) -> Vec<Run> {
    let mut runs = Vec::new();
    collect_list_runs(list, &mut runs);
    runs
}

fn collect_list_runs(block: &IntermediateBlock, runs: &mut Vec<Run>) {
    match block {
        IntermediateBlock::OrderedList { items } | IntermediateBlock::BulletList { items } => {
            for block in items.iter().flatten() {
                collect_list_runs(block, runs);
            }
        }
        other => {
            if let Some(html) = other.html() {
                if !runs.is_empty() {
                    runs.push(Run::Tab);
                }
                runs.extend(html_to_runs(html));
            }
        }
    }
}

/// Code text with line breaks as break runs.
fn code_runs(html: &str) -> Vec<Run> {
    let text = unescape_html(html);
    let mut runs = Vec::new();
    for (index, line) in text.split('\n').enumerate() {
        if index > 0 {
            runs.push(Run::Break);
        }
        if !line.is_empty() {
            runs.push(Run::text(line));
        }
    }
    runs
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use quill_citations::SortOrder;
    use quill_renderer::{BlockParser, RichTextNode};
    use serde_json::json;

    use super::*;
    use crate::paragraph::NumberingRef;

    fn blocks(json: Value) -> Vec<IntermediateBlock> {
        let doc: RichTextNode = serde_json::from_value(json).unwrap();
        BlockParser::new("7").parse(&doc)
    }

    fn paragraph(text: &str) -> Value {
        json!({"type": "paragraph", "content": [{"type": "text", "text": text}]})
    }

    fn divider() -> Value {
        json!({"type": "DividerBlock"})
    }

    fn bullet_list(texts: &[&str]) -> Value {
        let items: Vec<Value> = texts
            .iter()
            .map(|text| json!({"type": "listItem", "content": [paragraph(text)]}))
            .collect();
        json!({"type": "bulletList", "content": items})
    }

    fn render(json: Value, mode: FormattingMode) -> ExportSection {
        let styles = StyleSheet::default();
        ExportRenderer::new(&styles)
            .render_section(7, &blocks(json), mode)
            .unwrap()
    }

    #[test]
    fn test_ordered_list_items() {
        let section = render(
            json!({"type": "doc", "content": [
                {"type": "heading", "attrs": {"level": 2}, "content": [{"type": "text", "text": "Degrees"}]},
                divider(), paragraph("PhD"),
                divider(), paragraph("MSc"),
                divider(), paragraph("BSc"),
            ]}),
            FormattingMode::OrderedList,
        );
        let paragraphs = &section.paragraphs;
        assert_eq!(paragraphs[0].heading, Some(2));

        let numbered: Vec<_> = paragraphs.iter().filter(|p| p.numbering.is_some()).collect();
        assert_eq!(numbered.len(), 3);
        for paragraph in &numbered {
            assert_eq!(
                paragraph.numbering,
                Some(NumberingRef {
                    reference: "numbering".to_owned(),
                    level: 0,
                    instance: NumberingInstance::section(7),
                })
            );
        }
        let separators = paragraphs.iter().filter(|p| p.is_empty_line()).count();
        assert_eq!(separators, 2);
        assert!(!paragraphs.last().unwrap().is_empty_line());
        assert_eq!(paragraphs.len(), 1 + 3 + 2);
    }

    #[test]
    fn test_unordered_list_uses_en_dash() {
        let section = render(
            json!({"type": "doc", "content": [divider(), paragraph("a")]}),
            FormattingMode::UnorderedList,
        );
        assert_eq!(
            section.paragraphs[0].numbering.as_ref().map(|n| n.reference.as_str()),
            Some("en-dash")
        );
    }

    #[test]
    fn test_two_column_layout_merges_first_list() {
        let section = render(
            json!({"type": "doc", "content": [
                divider(),
                bullet_list(&["2019", "Award"]),
                bullet_list(&["ignored"]),
                paragraph("note"),
            ]}),
            FormattingMode::TwoColumnLayoutJustified,
        );
        assert_eq!(section.paragraphs.len(), 2);
        assert_eq!(section.paragraphs[0].text(), "2019\tAward");
        assert_eq!(section.paragraphs[0].style.as_deref(), Some("twoColumnLayout"));
        assert_eq!(
            section.paragraphs[0].alignment,
            Some(quill_renderer::Alignment::Justify)
        );
        assert_eq!(section.paragraphs[1].text(), "note");
        assert_eq!(section.paragraphs[1].style, None);
    }

    #[test]
    fn test_two_level_indentation_merges_every_list() {
        let section = render(
            json!({"type": "doc", "content": [
                divider(),
                bullet_list(&["a", "b"]),
                bullet_list(&["c"]),
                bullet_list(&[""]),
            ]}),
            FormattingMode::TwoLevelIndentation,
        );
        let texts: Vec<String> = section.paragraphs.iter().map(ExportParagraph::text).collect();
        assert_eq!(texts, ["a\tb", "c"]);
        assert!(section
            .paragraphs
            .iter()
            .all(|p| p.style.as_deref() == Some("twoLevelIndentation")));
    }

    #[test]
    fn test_group_items() {
        let section = render(
            json!({"type": "doc", "content": [
                {"type": "heading", "attrs": {"level": 3}, "content": [{"type": "text", "text": "Committees"}]},
                paragraph("dropped intro"),
                divider(), paragraph("one"),
                divider(), paragraph("two"),
            ]}),
            FormattingMode::GroupItems,
        );
        let styles: Vec<_> = section
            .paragraphs
            .iter()
            .map(|p| (p.text(), p.style.clone()))
            .collect();
        assert_eq!(
            styles,
            vec![
                ("Committees".to_owned(), Some("groupTitle".to_owned())),
                ("one".to_owned(), Some("groupItems".to_owned())),
                (String::new(), None),
                ("two".to_owned(), Some("groupItems".to_owned())),
            ]
        );
    }

    #[test]
    fn test_generic_nested_lists_restart_numbering() {
        let section = render(
            json!({"type": "doc", "content": [
                bullet_list(&["a", "b"]),
                {"type": "orderedList", "content": [{"type": "listItem", "content": [paragraph("c")]}]},
            ]}),
            FormattingMode::None,
        );
        let instances: Vec<NumberingInstance> = section
            .paragraphs
            .iter()
            .filter_map(|p| p.numbering.as_ref().map(|n| n.instance))
            .collect();
        assert_eq!(
            instances,
            [
                NumberingInstance::nested(7, 1),
                NumberingInstance::nested(7, 1),
                NumberingInstance::nested(7, 2),
            ]
        );
    }

    #[test]
    fn test_nested_list_instances_distinct_from_other_blocks() {
        let styles = StyleSheet::default();
        let renderer = ExportRenderer::new(&styles);
        let instances = |block_id: u64, json: Value, mode: FormattingMode| -> Vec<NumberingInstance> {
            renderer
                .render_section(block_id, &blocks(json), mode)
                .unwrap()
                .paragraphs
                .iter()
                .filter_map(|p| p.numbering.as_ref().map(|n| n.instance))
                .collect()
        };

        let nested = instances(
            0,
            json!({"type": "doc", "content": [bullet_list(&["a"])]}),
            FormattingMode::None,
        );
        let ordered = instances(
            1,
            json!({"type": "doc", "content": [divider(), paragraph("b")]}),
            FormattingMode::OrderedList,
        );
        let large = instances(
            u64::MAX,
            json!({"type": "doc", "content": [bullet_list(&["c"])]}),
            FormattingMode::None,
        );

        assert_eq!(nested, [NumberingInstance::nested(0, 1)]);
        assert_eq!(ordered, [NumberingInstance::section(1)]);
        assert_eq!(large, [NumberingInstance::nested(u64::MAX, 1)]);
        assert_ne!(nested[0], ordered[0]);
    }

    #[test]
    fn test_code_and_blockquote() {
        let section = render(
            json!({"type": "doc", "content": [
                {"type": "codeBlock", "content": [{"type": "text", "text": "a < b\nc"}]},
                {"type": "blockquote", "content": [paragraph("quoted")]},
            ]}),
            FormattingMode::None,
        );
        assert_eq!(
            section.paragraphs[0].runs,
            vec![Run::text("a < b"), Run::Break, Run::text("c")]
        );
        assert_eq!(section.paragraphs[1].style.as_deref(), Some("leftIndentation"));
    }

    #[test]
    fn test_unknown_style_rejected() {
        let mut styles = StyleSheet::default();
        styles.paragraph_styles.retain(|s| s.id != "leftIndentation");
        let renderer = ExportRenderer::new(&styles);
        let result = renderer.render_section(
            1,
            &blocks(json!({"type": "doc", "content": [divider(), paragraph("x")]})),
            FormattingMode::LeftIndentation,
        );
        assert!(matches!(result, Err(ExportError::UnknownStyle(id)) if id == "leftIndentation"));
    }

    #[test]
    fn test_render_citations_ascending() {
        let styles = StyleSheet::default();
        let list = CitationList::new(
            Some("Publications".to_owned()),
            vec!["<em>A</em>".to_owned(), "B".to_owned()],
            SortOrder::Date,
        );
        let section = ExportRenderer::new(&styles).render_citations(12, &list).unwrap();
        assert_eq!(section.paragraphs.len(), 3);
        assert_eq!(section.paragraphs[0].heading, Some(4));
        assert_eq!(
            section.paragraphs[1].numbering.as_ref().map(|n| n.instance),
            Some(NumberingInstance::section(12))
        );
        assert_eq!(
            section.paragraphs[1].runs,
            vec![Run::Text {
                text: "A".to_owned(),
                bold: false,
                italic: true,
                link: None,
            }]
        );
    }

    #[test]
    fn test_render_citations_reversed() {
        let styles = StyleSheet::default();
        let list = CitationList::new(
            None,
            vec!["new".to_owned(), "old".to_owned()],
            SortOrder::DateReverse,
        );
        let section = ExportRenderer::new(&styles).render_citations(12, &list).unwrap();
        let texts: Vec<String> = section.paragraphs.iter().map(ExportParagraph::text).collect();
        assert_eq!(texts, ["2.\tnew", "1.\told"]);
        assert!(section
            .paragraphs
            .iter()
            .all(|p| p.style.as_deref() == Some("reversedList") && p.numbering.is_none()));
    }
}
