//! Source document model.
//!
//! Mirrors the JSON tree produced by the content source: every node has a
//! `type`, optional `content` children, an open `attrs` map, and for inline
//! text nodes a `text` string with `marks`.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Node type of a [`RichTextNode`].
///
/// Type names coming from the content source are matched exactly. Both the
/// CMS-specific block names (`ImageBlock`, `DividerBlock`, `WarningBlock`) and
/// their lowercase forms are accepted. Anything else is kept as
/// [`NodeType::Unknown`] so the tree still deserializes.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeType {
    Doc,
    Paragraph,
    Heading,
    Blockquote,
    OrderedList,
    BulletList,
    ListItem,
    CodeBlock,
    Image,
    Divider,
    Warning,
    CitationBlock,
    Text,
    HardBreak,
    Unknown(String),
}

impl NodeType {
    /// Type name as written by the content source.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Doc => "doc",
            Self::Paragraph => "paragraph",
            Self::Heading => "heading",
            Self::Blockquote => "blockquote",
            Self::OrderedList => "orderedList",
            Self::BulletList => "bulletList",
            Self::ListItem => "listItem",
            Self::CodeBlock => "codeBlock",
            Self::Image => "ImageBlock",
            Self::Divider => "DividerBlock",
            Self::Warning => "WarningBlock",
            Self::CitationBlock => "citationBlock",
            Self::Text => "text",
            Self::HardBreak => "hardBreak",
            Self::Unknown(name) => name,
        }
    }

    /// Whether nodes of this type never carry `content`.
    #[must_use]
    pub fn is_void(&self) -> bool {
        matches!(self, Self::Image | Self::Divider | Self::HardBreak)
    }
}

impl From<String> for NodeType {
    fn from(name: String) -> Self {
        match name.as_str() {
            "doc" => Self::Doc,
            "paragraph" => Self::Paragraph,
            "heading" => Self::Heading,
            "blockquote" => Self::Blockquote,
            "orderedList" => Self::OrderedList,
            "bulletList" => Self::BulletList,
            "listItem" => Self::ListItem,
            "codeBlock" => Self::CodeBlock,
            "ImageBlock" | "image" => Self::Image,
            "DividerBlock" | "divider" => Self::Divider,
            "WarningBlock" | "warning" => Self::Warning,
            "citationBlock" => Self::CitationBlock,
            "text" => Self::Text,
            "hardBreak" => Self::HardBreak,
            _ => Self::Unknown(name),
        }
    }
}

impl From<&str> for NodeType {
    fn from(name: &str) -> Self {
        Self::from(name.to_owned())
    }
}

impl From<NodeType> for String {
    fn from(node_type: NodeType) -> Self {
        match node_type {
            NodeType::Unknown(name) => name,
            known => known.as_str().to_owned(),
        }
    }
}

/// Inline mark attached to a text node (`bold`, `italic`, `link`, ...).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Mark {
    #[serde(rename = "type")]
    pub mark_type: String,
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Map::is_empty"
    )]
    pub attrs: Map<String, Value>,
}

impl Mark {
    /// Create a mark without attributes.
    #[must_use]
    pub fn new(mark_type: impl Into<String>) -> Self {
        Self {
            mark_type: mark_type.into(),
            attrs: Map::new(),
        }
    }

    /// Create a link mark pointing at `href`.
    #[must_use]
    pub fn link(href: impl Into<String>) -> Self {
        let mut attrs = Map::new();
        attrs.insert("href".to_owned(), Value::String(href.into()));
        Self {
            mark_type: "link".to_owned(),
            attrs,
        }
    }

    /// Link target, if this is a link mark with an `href`.
    #[must_use]
    pub fn href(&self) -> Option<&str> {
        if self.mark_type == "link" {
            self.attrs.get("href").and_then(Value::as_str)
        } else {
            None
        }
    }
}

/// A node of the source document tree.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RichTextNode {
    #[serde(rename = "type")]
    pub node_type: NodeType,
    /// Child nodes. `None` and `Some(vec![])` are distinct: an empty paragraph
    /// has no content at all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Vec<RichTextNode>>,
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Map::is_empty"
    )]
    pub attrs: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub marks: Vec<Mark>,
}

impl RichTextNode {
    /// Create an element node with no content and no attributes.
    #[must_use]
    pub fn new(node_type: impl Into<NodeType>) -> Self {
        Self {
            node_type: node_type.into(),
            content: None,
            attrs: Map::new(),
            text: None,
            marks: Vec::new(),
        }
    }

    /// Create an inline text node.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::new(NodeType::Text)
        }
    }

    /// Set child nodes.
    #[must_use]
    pub fn with_content(mut self, content: Vec<RichTextNode>) -> Self {
        self.content = Some(content);
        self
    }

    /// Set a single attribute.
    #[must_use]
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    /// Add an inline mark.
    #[must_use]
    pub fn with_mark(mut self, mark: Mark) -> Self {
        self.marks.push(mark);
        self
    }

    /// Child nodes, or an empty slice when `content` is absent.
    #[must_use]
    pub fn children(&self) -> &[RichTextNode] {
        self.content.as_deref().unwrap_or_default()
    }

    /// String attribute value.
    #[must_use]
    pub fn attr_str(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).and_then(Value::as_str)
    }

    /// Integer attribute value. Accepts numbers and numeric strings.
    #[must_use]
    pub fn attr_u64(&self, key: &str) -> Option<u64> {
        match self.attrs.get(key)? {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Attribute value rendered as a string, for ids that may be numeric.
    #[must_use]
    pub fn attr_string(&self, key: &str) -> Option<String> {
        match self.attrs.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Inline text runs of this node's children.
    ///
    /// Text nodes become runs with their marks; hard breaks become line-break
    /// runs. Other children are ignored.
    #[must_use]
    pub fn text_runs(&self) -> Vec<TextRun> {
        self.children().iter().filter_map(TextRun::from_node).collect()
    }

    /// Concatenated text of all descendant text nodes.
    #[must_use]
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }
}

fn collect_text(node: &RichTextNode, out: &mut String) {
    if let Some(text) = &node.text {
        out.push_str(text);
    }
    for child in node.children() {
        collect_text(child, out);
    }
}

/// Inline unit of styled text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextRun {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    /// Link target when the run carries a `link` mark.
    pub link: Option<String>,
    /// Run stands for a hard line break rather than text.
    pub line_break: bool,
}

impl TextRun {
    /// Unstyled text run.
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Hard line break.
    #[must_use]
    pub fn line_break() -> Self {
        Self {
            line_break: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    #[must_use]
    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    #[must_use]
    pub fn linked(mut self, href: impl Into<String>) -> Self {
        self.link = Some(href.into());
        self
    }

    /// Build a run from an inline node.
    ///
    /// Returns `None` for nodes that are neither text nor hard breaks.
    #[must_use]
    pub fn from_node(node: &RichTextNode) -> Option<Self> {
        match node.node_type {
            NodeType::Text => {
                let mut run = Self::plain(node.text.clone().unwrap_or_default());
                for mark in &node.marks {
                    match mark.mark_type.as_str() {
                        "bold" => run.bold = true,
                        "italic" => run.italic = true,
                        // First link mark wins
                        "link" if run.link.is_none() => run.link = mark.href().map(str::to_owned),
                        _ => {}
                    }
                }
                Some(run)
            }
            NodeType::HardBreak => Some(Self::line_break()),
            _ => None,
        }
    }

    /// Whether the run produces any output.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.line_break || !self.text.is_empty()
    }
}

/// Deserialize `null` as the type's default value.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
