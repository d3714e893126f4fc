//! Error types for citation parsing.

/// Error while reading a citation marker or bibliography.
///
/// These never escape the public extraction functions, which degrade to empty
/// results; they are surfaced from [`CitationSet::to_marker_html`](crate::CitationSet::to_marker_html)
/// and logged otherwise.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CitationError {
    /// Markup could not be tokenized.
    #[error("XML parse error")]
    XmlParse(#[from] quick_xml::Error),

    /// Encoding error while decoding markup.
    #[error("encoding error")]
    Encoding(#[from] quick_xml::encoding::EncodingError),

    /// Citation payload is not a JSON list of objects.
    #[error("invalid citation JSON")]
    Json(#[from] serde_json::Error),
}
