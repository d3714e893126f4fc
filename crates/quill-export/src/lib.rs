//! Styled paragraph export.
//!
//! Turns normalized blocks into the paragraph and run sequence a
//! word-processor serializer consumes, together with the [`StyleSheet`] the
//! paragraphs reference. Section layout is selected per block with a
//! [`FormattingMode`]; bibliographies are exported from a
//! [`CitationList`](quill_citations::CitationList).
//!
//! # Example
//!
//! ```
//! use quill_export::{ContentBlock, ExportRenderer, FormattingMode, Report, StyleSheet};
//! use quill_renderer::RichTextNode;
//!
//! let doc: RichTextNode = serde_json::from_str(r#"{"type": "doc", "content": [
//!     {"type": "DividerBlock"},
//!     {"type": "paragraph", "content": [{"type": "text", "text": "First"}]},
//!     {"type": "DividerBlock"},
//!     {"type": "paragraph", "content": [{"type": "text", "text": "Second"}]}
//! ]}"#).unwrap();
//!
//! let styles = StyleSheet::default();
//! let renderer = ExportRenderer::new(&styles);
//! let block = ContentBlock::new(3, doc).with_formatting(FormattingMode::OrderedList);
//! let section = block.render_export(&renderer).unwrap();
//!
//! // Two numbered paragraphs and one separator between them.
//! assert_eq!(section.paragraphs.len(), 3);
//! assert_eq!(section.paragraphs[0].numbering.as_ref().unwrap().instance.block_id, 3);
//!
//! let mut report = Report::new(styles.clone());
//! report.push(section);
//! ```

mod error;
mod format;
mod inline;
mod paragraph;
mod renderer;
mod report;
mod section;
pub mod style;

pub use error::ExportError;
pub use format::{FormattingMode, ItemLayout, ItemSource, LAYOUTS};
pub use inline::html_to_runs;
pub use paragraph::{ExportParagraph, NumberingInstance, NumberingRef, Run};
pub use renderer::{ExportRenderer, ExportSection};
pub use report::{ContentBlock, Report};
pub use section::SectionContent;
pub use style::StyleSheet;
