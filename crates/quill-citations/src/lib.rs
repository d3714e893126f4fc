//! Citation sub-pipeline.
//!
//! Citation blocks carry their bibliography as a JSON list embedded in a
//! marker element (`<u-cite …>[…]</u-cite>`). This crate:
//!
//! 1. extracts that list and the marker attributes ([`extract_citations`]),
//! 2. filters it by an inclusive date range and sorts it ([`CitationFilter`]),
//! 3. writes it back in the same marker format ([`CitationSet::to_marker_html`]),
//! 4. pulls formatted entries out of the rendered bibliography
//!    ([`extract_entries`]) and numbers them ([`CitationList`]).
//!
//! Missing or malformed markers produce empty results, never errors.
//!
//! # Example
//!
//! ```
//! use quill_citations::{CitationFilter, SortOrder, extract_citations};
//!
//! let html = r#"<div><u-cite data-style="apa">[
//!     {"id": "a", "issued": {"date-parts": [[2020]]}},
//!     {"id": "b", "issued": {"date-parts": [[2019, 6]]}}
//! ]</u-cite></div>"#;
//!
//! let set = extract_citations(html, "u-cite");
//! let filtered = set.filter(&CitationFilter::default().with_sort(SortOrder::Date));
//! let ids: Vec<_> = filtered.citations.iter().map(|c| c.id().unwrap_or_default()).collect();
//! assert_eq!(ids, ["b", "a"]);
//! ```

mod citation;
mod date;
mod entries;
mod error;
mod filter;
mod marker;
mod markup;

pub use citation::Citation;
pub use date::{DateBoundError, SortOrder, UnknownSortOrder, parse_date_bound};
pub use entries::{CitationList, NumberedEntry, extract_entries, number_entries};
pub use error::CitationError;
pub use filter::CitationFilter;
pub use marker::{CitationSet, DEFAULT_MARKER_TAG, extract_citations, marker_html_from_node};

/// Class that identifies one formatted entry in a rendered bibliography.
pub const DEFAULT_ENTRY_CLASS: &str = "csl-entry";
