//! Normalized, renderer-agnostic blocks.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::state::{strip_tags, unescape_html};

/// Text alignment of a paragraph or heading.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    Center,
    Right,
    Justify,
}

impl Alignment {
    /// Parse a `textAlign` attribute value. Unknown values yield `None`.
    #[must_use]
    pub fn from_attr(value: &str) -> Option<Self> {
        match value {
            "left" | "start" => Some(Self::Left),
            "center" => Some(Self::Center),
            "right" | "end" => Some(Self::Right),
            "justify" | "both" => Some(Self::Justify),
            _ => None,
        }
    }

    /// CSS `text-align` keyword.
    #[must_use]
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
            Self::Justify => "justify",
        }
    }
}

/// A normalized block.
///
/// Text-bearing variants hold pre-escaped inline markup in `html`. Lists hold
/// one block list per item; blockquotes hold their nested blocks.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum IntermediateBlock {
    Paragraph {
        html: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        alignment: Option<Alignment>,
    },
    Heading {
        html: String,
        level: u8,
        /// Heading id supplied by the content source.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<String>,
        /// In-page navigation target, `{block_id}-{slug}`.
        #[serde(rename = "anchorId")]
        anchor_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        alignment: Option<Alignment>,
    },
    Image {
        #[serde(default)]
        attrs: Map<String, Value>,
    },
    Divider {
        #[serde(default)]
        attrs: Map<String, Value>,
    },
    Warning {
        html: String,
        #[serde(default)]
        attrs: Map<String, Value>,
    },
    CodeBlock {
        html: String,
        #[serde(default)]
        attrs: Map<String, Value>,
    },
    OrderedList {
        items: Vec<Vec<IntermediateBlock>>,
    },
    BulletList {
        items: Vec<Vec<IntermediateBlock>>,
    },
    Blockquote {
        content: Vec<IntermediateBlock>,
    },
}

impl IntermediateBlock {
    /// Block type name.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Paragraph { .. } => "paragraph",
            Self::Heading { .. } => "heading",
            Self::Image { .. } => "image",
            Self::Divider { .. } => "divider",
            Self::Warning { .. } => "warning",
            Self::CodeBlock { .. } => "codeBlock",
            Self::OrderedList { .. } => "orderedList",
            Self::BulletList { .. } => "bulletList",
            Self::Blockquote { .. } => "blockquote",
        }
    }

    /// Inline markup of text-bearing blocks.
    #[must_use]
    pub fn html(&self) -> Option<&str> {
        match self {
            Self::Paragraph { html, .. }
            | Self::Heading { html, .. }
            | Self::Warning { html, .. }
            | Self::CodeBlock { html, .. } => Some(html),
            _ => None,
        }
    }

    /// Plain text of a text-bearing block (tags stripped, entities decoded).
    #[must_use]
    pub fn text(&self) -> Option<String> {
        self.html().map(|html| unescape_html(&strip_tags(html)))
    }

    /// Attributes of void and attribute-carrying blocks.
    #[must_use]
    pub fn attrs(&self) -> Option<&Map<String, Value>> {
        match self {
            Self::Image { attrs }
            | Self::Divider { attrs }
            | Self::Warning { attrs, .. }
            | Self::CodeBlock { attrs, .. } => Some(attrs),
            _ => None,
        }
    }

    /// Whether this is a list block.
    #[must_use]
    pub fn is_list(&self) -> bool {
        matches!(self, Self::OrderedList { .. } | Self::BulletList { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alignment_from_attr() {
        assert_eq!(Alignment::from_attr("center"), Some(Alignment::Center));
        assert_eq!(Alignment::from_attr("both"), Some(Alignment::Justify));
        assert_eq!(Alignment::from_attr("diagonal"), None);
    }

    #[test]
    fn test_serialize_heading() {
        let block = IntermediateBlock::Heading {
            html: "Intro".to_owned(),
            level: 2,
            id: None,
            anchor_id: "7-Intro".to_owned(),
            alignment: None,
        };
        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["type"], "heading");
        assert_eq!(json["anchorId"], "7-Intro");
        assert!(json.get("alignment").is_none());
    }

    #[test]
    fn test_deserialize_roundtrip_list() {
        let json = r#"{"type":"bulletList","items":[[{"type":"paragraph","html":"a"}]]}"#;
        let block: IntermediateBlock = serde_json::from_str(json).unwrap();
        assert!(block.is_list());
        assert_eq!(serde_json::to_string(&block).unwrap(), json);
    }

    #[test]
    fn test_text_decodes_markup() {
        let block = IntermediateBlock::Paragraph {
            html: "<strong>a &amp; b</strong>".to_owned(),
            alignment: None,
        };
        assert_eq!(block.text().as_deref(), Some("a & b"));
        assert_eq!(block.kind(), "paragraph");
    }
}
