//! Date-range filter and sort.

use chrono::NaiveDate;

use crate::citation::Citation;
use crate::date::SortOrder;

/// Inclusive date-range filter with an optional sort.
///
/// With neither bound set every citation passes. Citations without a usable
/// issue date pass only when no bound is set and sort before dated ones.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CitationFilter {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub sort: SortOrder,
}

impl CitationFilter {
    #[must_use]
    pub fn with_start(mut self, start: Option<NaiveDate>) -> Self {
        self.start = start;
        self
    }

    #[must_use]
    pub fn with_end(mut self, end: Option<NaiveDate>) -> Self {
        self.end = end;
        self
    }

    #[must_use]
    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    /// Whether a date bound is set.
    #[must_use]
    pub fn is_bounded(&self) -> bool {
        self.start.is_some() || self.end.is_some()
    }

    /// Whether `citation` falls inside the range.
    #[must_use]
    pub fn matches(&self, citation: &Citation) -> bool {
        if !self.is_bounded() {
            return true;
        }
        let Some(date) = citation.issued_date() else {
            return false;
        };
        self.start.is_none_or(|start| date >= start) && self.end.is_none_or(|end| date <= end)
    }

    /// Filter and sort `citations`. Sorting is stable.
    #[must_use]
    pub fn apply(&self, citations: &[Citation]) -> Vec<Citation> {
        let mut kept: Vec<(Option<NaiveDate>, Citation)> = citations
            .iter()
            .filter(|citation| self.matches(citation))
            .map(|citation| (citation.issued_date(), citation.clone()))
            .collect();

        match self.sort {
            SortOrder::None => {}
            SortOrder::Date => kept.sort_by(|a, b| a.0.cmp(&b.0)),
            SortOrder::DateReverse => kept.sort_by(|a, b| b.0.cmp(&a.0)),
        }

        kept.into_iter().map(|(_, citation)| citation).collect()
    }
}
