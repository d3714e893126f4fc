//! Splitting a section into main content and items.

use quill_renderer::IntermediateBlock;

/// Section blocks split at dividers.
///
/// Blocks before the first divider form the main content; each divider
/// starts a new item. Items without blocks are dropped.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SectionContent {
    pub main: Vec<IntermediateBlock>,
    pub items: Vec<Vec<IntermediateBlock>>,
}

impl SectionContent {
    #[must_use]
    pub fn from_blocks(blocks: Vec<IntermediateBlock>) -> Self {
        let mut content = Self::default();
        let mut current: Option<Vec<IntermediateBlock>> = None;

        for block in blocks {
            if matches!(block, IntermediateBlock::Divider { .. }) {
                if let Some(item) = current.take().filter(|item| !item.is_empty()) {
                    content.items.push(item);
                }
                current = Some(Vec::new());
                continue;
            }
            match current.as_mut() {
                Some(item) => item.push(block),
                None => content.main.push(block),
            }
        }
        if let Some(item) = current.filter(|item| !item.is_empty()) {
            content.items.push(item);
        }
        content
    }

    /// Markup of the first heading in the main content.
    #[must_use]
    pub fn title_html(&self) -> Option<&str> {
        self.main.iter().find_map(|block| match block {
            IntermediateBlock::Heading { html, .. } => Some(html.as_str()),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::Map;

    use super::*;

    fn paragraph(html: &str) -> IntermediateBlock {
        IntermediateBlock::Paragraph {
            html: html.to_owned(),
            alignment: None,
        }
    }

    fn divider() -> IntermediateBlock {
        IntermediateBlock::Divider { attrs: Map::new() }
    }

    #[test]
    fn test_split_at_dividers() {
        let content = SectionContent::from_blocks(vec![
            paragraph("intro"),
            divider(),
            paragraph("a1"),
            paragraph("a2"),
            divider(),
            divider(),
            paragraph("b"),
        ]);
        assert_eq!(content.main, vec![paragraph("intro")]);
        assert_eq!(
            content.items,
            vec![vec![paragraph("a1"), paragraph("a2")], vec![paragraph("b")]]
        );
    }

    #[test]
    fn test_no_dividers() {
        let content = SectionContent::from_blocks(vec![paragraph("only")]);
        assert_eq!(content.main.len(), 1);
        assert!(content.items.is_empty());
    }

    #[test]
    fn test_title_html() {
        let content = SectionContent::from_blocks(vec![
            paragraph("p"),
            IntermediateBlock::Heading {
                html: "<em>Awards</em>".to_owned(),
                level: 2,
                id: None,
                anchor_id: "1-Awards".to_owned(),
                alignment: None,
            },
        ]);
        assert_eq!(content.title_html(), Some("<em>Awards</em>"));
        assert_eq!(SectionContent::default().title_html(), None);
    }
}
