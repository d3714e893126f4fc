//! Section formatting modes and their item layouts.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use quill_renderer::Alignment;
use serde::{Deserialize, Serialize};

use crate::style;

/// How the items of a section are laid out on the page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FormattingMode {
    /// Every list of an item merged into one tabbed paragraph.
    TwoLevelIndentation,
    /// First list of an item merged into one hanging-indent paragraph.
    TwoColumnLayout,
    TwoColumnLayoutWide,
    TwoColumnLayoutJustified,
    /// Item paragraphs numbered `1.`, `2.`, ... across the section.
    OrderedList,
    /// Item paragraphs with en-dash bullets.
    UnorderedList,
    LeftIndentation,
    /// Section title followed by indented item paragraphs.
    GroupItems,
    #[default]
    None,
}

impl FormattingMode {
    /// Name as stored in block properties.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TwoLevelIndentation => "two-level-indentation",
            Self::TwoColumnLayout => "two-column-layout",
            Self::TwoColumnLayoutWide => "two-column-layout-wide",
            Self::TwoColumnLayoutJustified => "two-column-layout-justified",
            Self::OrderedList => "ordered-list",
            Self::UnorderedList => "unordered-list",
            Self::LeftIndentation => "left-indentation",
            Self::GroupItems => "group-items",
            Self::None => "none",
        }
    }

    /// Item layout for this mode.
    #[must_use]
    pub fn layout(self) -> &'static ItemLayout {
        LAYOUTS
            .iter()
            .find(|layout| layout.mode == self)
            .unwrap_or(&GENERIC)
    }
}

impl fmt::Display for FormattingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormattingMode {
    type Err = Infallible;

    /// Unknown names fall back to [`FormattingMode::None`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            "two-level-indentation" => Self::TwoLevelIndentation,
            "two-column-layout" => Self::TwoColumnLayout,
            "two-column-layout-wide" => Self::TwoColumnLayoutWide,
            "two-column-layout-justified" => Self::TwoColumnLayoutJustified,
            "ordered-list" => Self::OrderedList,
            "unordered-list" => Self::UnorderedList,
            "left-indentation" => Self::LeftIndentation,
            "group-items" => Self::GroupItems,
            "none" | "" => Self::None,
            other => {
                tracing::debug!(formatting = other, "Unknown formatting mode, using none");
                Self::None
            }
        })
    }
}

impl From<String> for FormattingMode {
    fn from(s: String) -> Self {
        let Ok(mode) = s.parse::<Self>();
        mode
    }
}

impl From<FormattingMode> for String {
    fn from(mode: FormattingMode) -> Self {
        mode.as_str().to_owned()
    }
}

/// Which part of an item feeds its styled paragraphs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemSource {
    /// Each list merged into one paragraph; other content rendered after.
    AllLists,
    /// First list merged into one paragraph; other non-list content after.
    FirstList,
    /// Each paragraph of the item; everything else is dropped.
    Paragraphs,
    /// All content in document order.
    Generic,
}

/// Per-mode rendering rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ItemLayout {
    pub mode: FormattingMode,
    pub source: ItemSource,
    /// Paragraph style applied to item paragraphs.
    pub style: Option<&'static str>,
    /// Numbering reference applied to item paragraphs.
    pub numbering: Option<&'static str>,
    pub alignment: Option<Alignment>,
    /// Replace the main content with its title in the group title style.
    pub group_title: bool,
}

const GENERIC: ItemLayout = ItemLayout {
    mode: FormattingMode::None,
    source: ItemSource::Generic,
    style: None,
    numbering: None,
    alignment: None,
    group_title: false,
};

/// Item layouts for every formatting mode.
pub static LAYOUTS: &[ItemLayout] = &[
    ItemLayout {
        mode: FormattingMode::TwoLevelIndentation,
        source: ItemSource::AllLists,
        style: Some(style::TWO_LEVEL_INDENTATION),
        ..GENERIC
    },
    ItemLayout {
        mode: FormattingMode::TwoColumnLayout,
        source: ItemSource::FirstList,
        style: Some(style::TWO_COLUMN_LAYOUT),
        ..GENERIC
    },
    ItemLayout {
        mode: FormattingMode::TwoColumnLayoutWide,
        source: ItemSource::FirstList,
        style: Some(style::TWO_COLUMN_LAYOUT_WIDE),
        ..GENERIC
    },
    ItemLayout {
        mode: FormattingMode::TwoColumnLayoutJustified,
        source: ItemSource::FirstList,
        style: Some(style::TWO_COLUMN_LAYOUT),
        alignment: Some(Alignment::Justify),
        ..GENERIC
    },
    ItemLayout {
        mode: FormattingMode::OrderedList,
        source: ItemSource::Paragraphs,
        numbering: Some(style::NUMBERING),
        ..GENERIC
    },
    ItemLayout {
        mode: FormattingMode::UnorderedList,
        source: ItemSource::Paragraphs,
        numbering: Some(style::EN_DASH),
        ..GENERIC
    },
    ItemLayout {
        mode: FormattingMode::LeftIndentation,
        source: ItemSource::Paragraphs,
        style: Some(style::LEFT_INDENTATION),
        ..GENERIC
    },
    ItemLayout {
        mode: FormattingMode::GroupItems,
        source: ItemSource::Paragraphs,
        style: Some(style::GROUP_ITEMS),
        group_title: true,
        ..GENERIC
    },
    GENERIC,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_modes() {
        for layout in LAYOUTS {
            let parsed: FormattingMode = layout.mode.as_str().parse().unwrap();
            assert_eq!(parsed, layout.mode);
        }
    }

    #[test]
    fn test_unknown_mode_is_none() {
        assert_eq!(
            "three-column".parse::<FormattingMode>().unwrap(),
            FormattingMode::None
        );
    }

    #[test]
    fn test_every_mode_has_layout() {
        assert_eq!(LAYOUTS.len(), 9);
        assert_eq!(
            FormattingMode::OrderedList.layout().numbering,
            Some(style::NUMBERING)
        );
        assert_eq!(
            FormattingMode::TwoColumnLayoutJustified.layout().alignment,
            Some(Alignment::Justify)
        );
        assert_eq!(FormattingMode::None.layout().source, ItemSource::Generic);
    }

    #[test]
    fn test_serde_uses_kebab_names() {
        let json = serde_json::to_string(&FormattingMode::TwoColumnLayoutWide).unwrap();
        assert_eq!(json, r#""two-column-layout-wide""#);
        let mode: FormattingMode = serde_json::from_str(r#""bogus""#).unwrap();
        assert_eq!(mode, FormattingMode::None);
    }
}
