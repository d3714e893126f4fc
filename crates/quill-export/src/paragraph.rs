//! Export paragraphs and runs.

use quill_renderer::Alignment;
use serde::Serialize;

/// Inline unit of an exported paragraph.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Run {
    Text {
        text: String,
        #[serde(skip_serializing_if = "std::ops::Not::not")]
        bold: bool,
        #[serde(skip_serializing_if = "std::ops::Not::not")]
        italic: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        link: Option<String>,
    },
    Tab,
    Break,
    Image {
        src: String,
        #[serde(skip_serializing_if = "String::is_empty")]
        alt: String,
    },
}

impl Run {
    /// Unstyled text.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text {
            text: text.into(),
            bold: false,
            italic: false,
            link: None,
        }
    }

    /// Text content, empty for non-text runs.
    #[must_use]
    pub fn as_text(&self) -> &str {
        match self {
            Self::Text { text, .. } => text,
            _ => "",
        }
    }
}

/// Numbering sequence a paragraph belongs to.
///
/// `list` is 0 for the section-level sequence of a block and `n` for the
/// n-th nested list in it, so sequences of different blocks or lists never
/// share an instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberingInstance {
    pub block_id: u64,
    pub list: u64,
}

impl NumberingInstance {
    /// Section-level sequence of `block_id`.
    #[must_use]
    pub fn section(block_id: u64) -> Self {
        Self { block_id, list: 0 }
    }

    /// Sequence of the `list`-th nested list (1-based) of `block_id`.
    #[must_use]
    pub fn nested(block_id: u64, list: u64) -> Self {
        Self { block_id, list }
    }
}

/// Reference to a numbering definition of the style sheet.
///
/// Paragraphs sharing reference and instance continue one sequence.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NumberingRef {
    pub reference: String,
    pub level: u8,
    pub instance: NumberingInstance,
}

/// One paragraph of an exported section.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ExportParagraph {
    pub runs: Vec<Run>,
    /// Paragraph style id from the style sheet.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    /// Heading level (1-4) when the paragraph uses a heading style.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numbering: Option<NumberingRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,
}

impl ExportParagraph {
    #[must_use]
    pub fn new(runs: Vec<Run>) -> Self {
        Self {
            runs,
            ..Self::default()
        }
    }

    /// Blank separator paragraph.
    #[must_use]
    pub fn empty_line() -> Self {
        Self::new(vec![Run::text("")])
    }

    #[must_use]
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    #[must_use]
    pub fn with_heading(mut self, level: u8) -> Self {
        self.heading = Some(level);
        self
    }

    #[must_use]
    pub fn with_numbering(
        mut self,
        reference: impl Into<String>,
        instance: NumberingInstance,
    ) -> Self {
        self.numbering = Some(NumberingRef {
            reference: reference.into(),
            level: 0,
            instance,
        });
        self
    }

    #[must_use]
    pub fn with_alignment(mut self, alignment: Option<Alignment>) -> Self {
        self.alignment = alignment;
        self
    }

    /// Concatenated text of all runs; tabs and breaks become `\t` and `\n`.
    #[must_use]
    pub fn text(&self) -> String {
        self.runs
            .iter()
            .map(|run| match run {
                Run::Tab => "\t",
                Run::Break => "\n",
                other => other.as_text(),
            })
            .collect()
    }

    /// Whether this is a separator with no visible content.
    #[must_use]
    pub fn is_empty_line(&self) -> bool {
        self.numbering.is_none()
            && self
                .runs
                .iter()
                .all(|run| matches!(run, Run::Text { text, .. } if text.is_empty()))
    }
}
