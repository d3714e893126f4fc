//! Report style sheet.
//!
//! Sizes are in half-points and distances in twentieths of a point, the
//! units word-processor documents store natively.

use quill_renderer::Alignment;
use serde::{Deserialize, Serialize};

pub const TWO_COLUMN_LAYOUT: &str = "twoColumnLayout";
pub const TWO_COLUMN_LAYOUT_WIDE: &str = "twoColumnLayoutWide";
pub const TWO_LEVEL_INDENTATION: &str = "twoLevelIndentation";
pub const REVERSED_LIST: &str = "reversedList";
pub const LEFT_INDENTATION: &str = "leftIndentation";
pub const GROUP_TITLE: &str = "groupTitle";
pub const GROUP_ITEMS: &str = "groupItems";

/// Decimal numbering (`1.`, `2.`, ...).
pub const NUMBERING: &str = "numbering";
/// En-dash bullets.
pub const EN_DASH: &str = "en-dash";

/// Styles and numbering definitions shared by every exported section.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleSheet {
    pub defaults: DefaultStyles,
    pub paragraph_styles: Vec<ParagraphStyle>,
    pub numbering: Vec<NumberingDefinition>,
}

/// Heading and body text defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DefaultStyles {
    pub heading1: TextStyle,
    pub heading2: TextStyle,
    pub heading3: TextStyle,
    pub heading4: TextStyle,
    pub document: TextStyle,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    #[serde(default)]
    pub run: RunProperties,
    #[serde(default)]
    pub paragraph: ParagraphProperties,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RunProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub bold: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub underline: Option<Underline>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Underline {
    #[serde(rename = "type")]
    pub kind: String,
    pub color: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spacing: Option<Spacing>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indent: Option<Indent>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tab_stops: Vec<TabStop>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spacing {
    pub before: u32,
    pub after: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Indent {
    pub left: u32,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub hanging: u32,
}

/// Left-aligned tab stop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabStop {
    pub position: u32,
}

/// Named paragraph style referenced by [`ExportParagraph::style`](crate::ExportParagraph::style).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphStyle {
    pub id: String,
    pub name: String,
    pub based_on: String,
    pub next: String,
    pub quick_format: bool,
    pub paragraph: ParagraphProperties,
}

/// List numbering referenced by [`NumberingRef::reference`](crate::NumberingRef::reference).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NumberingDefinition {
    pub reference: String,
    pub levels: Vec<NumberingLevel>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NumberingLevel {
    pub level: u8,
    pub format: NumberFormat,
    /// Label template, `%1` stands for the number.
    pub text: String,
    pub alignment: Alignment,
    pub paragraph: ParagraphProperties,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberFormat {
    Decimal,
    Bullet,
}

impl StyleSheet {
    /// Default style for heading `level` (1-4).
    #[must_use]
    pub fn heading(&self, level: u8) -> Option<&TextStyle> {
        match level {
            1 => Some(&self.defaults.heading1),
            2 => Some(&self.defaults.heading2),
            3 => Some(&self.defaults.heading3),
            4 => Some(&self.defaults.heading4),
            _ => None,
        }
    }

    #[must_use]
    pub fn paragraph_style(&self, id: &str) -> Option<&ParagraphStyle> {
        self.paragraph_styles.iter().find(|style| style.id == id)
    }

    #[must_use]
    pub fn numbering(&self, reference: &str) -> Option<&NumberingDefinition> {
        self.numbering.iter().find(|def| def.reference == reference)
    }
}

impl Default for StyleSheet {
    fn default() -> Self {
        Self {
            defaults: DefaultStyles {
                heading1: heading(22, false, 180, 180, Some(Alignment::Center)),
                heading2: heading(23, false, 140, 140, Some(Alignment::Center)),
                heading3: {
                    let mut style = heading(23, true, 260, 200, Some(Alignment::Center));
                    style.run.underline = Some(Underline {
                        kind: "single".to_owned(),
                        color: "000000".to_owned(),
                    });
                    style
                },
                heading4: {
                    let mut style = heading(22, false, 120, 120, None);
                    style.run.color = Some("2b2b2b".to_owned());
                    style
                },
                document: TextStyle {
                    run: RunProperties {
                        size: Some(22),
                        ..RunProperties::default()
                    },
                    paragraph: ParagraphProperties {
                        alignment: Some(Alignment::Justify),
                        ..ParagraphProperties::default()
                    },
                },
            },
            paragraph_styles: vec![
                paragraph_style(TWO_COLUMN_LAYOUT, "Two Column Layout", indent(4268, 4268), &[]),
                paragraph_style(
                    TWO_COLUMN_LAYOUT_WIDE,
                    "Two Column Layout (Wide)",
                    indent(6268, 6268),
                    &[],
                ),
                paragraph_style(
                    TWO_LEVEL_INDENTATION,
                    "Two Level Indentation",
                    indent(3200, 2860),
                    &[2834, 2835],
                ),
                paragraph_style(REVERSED_LIST, "Reversed List", indent(1162, 850), &[850]),
                paragraph_style(LEFT_INDENTATION, "Left Indentation", indent(340, 0), &[]),
                paragraph_style(GROUP_TITLE, "Group Title", indent(340, 0), &[]),
                paragraph_style(GROUP_ITEMS, "Group Items", indent(2350, 650), &[]),
            ],
            numbering: vec![
                numbering(NUMBERING, NumberFormat::Decimal, "%1."),
                numbering(EN_DASH, NumberFormat::Bullet, "\u{2013}"),
            ],
        }
    }
}

fn heading(size: u32, bold: bool, before: u32, after: u32, alignment: Option<Alignment>) -> TextStyle {
    TextStyle {
        run: RunProperties {
            size: Some(size),
            color: Some("000000".to_owned()),
            bold,
            underline: None,
        },
        paragraph: ParagraphProperties {
            spacing: Some(Spacing { before, after }),
            alignment,
            ..ParagraphProperties::default()
        },
    }
}

fn indent(left: u32, hanging: u32) -> Indent {
    Indent { left, hanging }
}

fn paragraph_style(id: &str, name: &str, indent: Indent, tabs: &[u32]) -> ParagraphStyle {
    ParagraphStyle {
        id: id.to_owned(),
        name: name.to_owned(),
        based_on: "Normal".to_owned(),
        next: "Normal".to_owned(),
        quick_format: true,
        paragraph: ParagraphProperties {
            indent: Some(indent),
            tab_stops: tabs.iter().map(|&position| TabStop { position }).collect(),
            ..ParagraphProperties::default()
        },
    }
}

fn numbering(reference: &str, format: NumberFormat, text: &str) -> NumberingDefinition {
    NumberingDefinition {
        reference: reference.to_owned(),
        levels: vec![NumberingLevel {
            level: 0,
            format,
            text: text.to_owned(),
            alignment: Alignment::Left,
            paragraph: ParagraphProperties {
                indent: Some(indent(1162, 850)),
                tab_stops: vec![TabStop { position: 850 }],
                ..ParagraphProperties::default()
            },
        }],
    }
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_zero(value: &u32) -> bool {
    *value == 0
}
