//! Content blocks and report assembly.

use quill_renderer::{BlockParser, BlockRenderer, HtmlBackend, IntermediateBlock, RenderResult, RichTextNode};
use serde::Serialize;

use crate::error::ExportError;
use crate::format::FormattingMode;
use crate::paragraph::ExportParagraph;
use crate::renderer::{ExportRenderer, ExportSection};
use crate::style::StyleSheet;

/// One content block of a page or report.
#[derive(Clone, Debug, PartialEq)]
pub struct ContentBlock {
    pub id: u64,
    pub formatting: FormattingMode,
    pub document: RichTextNode,
}

impl ContentBlock {
    #[must_use]
    pub fn new(id: u64, document: RichTextNode) -> Self {
        Self {
            id,
            formatting: FormattingMode::None,
            document,
        }
    }

    #[must_use]
    pub fn with_formatting(mut self, formatting: FormattingMode) -> Self {
        self.formatting = formatting;
        self
    }

    /// Normalized blocks, heading anchors prefixed with `{prefix}{id}`.
    #[must_use]
    pub fn blocks(&self, prefix: &str) -> Vec<IntermediateBlock> {
        BlockParser::new(format!("{prefix}{}", self.id)).parse(&self.document)
    }

    /// Render the block for on-screen display.
    #[must_use]
    pub fn render_html(&self, prefix: &str) -> RenderResult {
        BlockRenderer::<HtmlBackend>::new().render(&self.blocks(prefix))
    }

    /// Render the block for document export using its formatting mode.
    ///
    /// # Errors
    ///
    /// Propagates [`ExportRenderer::render_section`] errors.
    pub fn render_export(&self, renderer: &ExportRenderer<'_>) -> Result<ExportSection, ExportError> {
        renderer.render_section(self.id, &self.blocks(""), self.formatting)
    }
}

/// Export payload for a whole report: the style sheet plus sections in
/// block order.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Report {
    pub styles: StyleSheet,
    pub sections: Vec<ExportSection>,
}

impl Report {
    #[must_use]
    pub fn new(styles: StyleSheet) -> Self {
        Self {
            styles,
            sections: Vec::new(),
        }
    }

    /// Append a section followed by the empty line that separates sections.
    pub fn push(&mut self, mut section: ExportSection) {
        section.paragraphs.push(ExportParagraph::empty_line());
        self.sections.push(section);
    }

    /// All paragraphs in document order.
    pub fn paragraphs(&self) -> impl Iterator<Item = &ExportParagraph> {
        self.sections.iter().flat_map(|section| &section.paragraphs)
    }
}
