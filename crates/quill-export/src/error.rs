//! Error types for export rendering.

/// Error during export rendering.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ExportError {
    /// A paragraph references a style the style sheet does not define.
    #[error("unknown paragraph style '{0}'")]
    UnknownStyle(String),

    /// A paragraph references a numbering definition the style sheet lacks.
    #[error("unknown numbering reference '{0}'")]
    UnknownNumbering(String),

    /// Inline markup could not be tokenized.
    #[error("XML parse error")]
    XmlParse(#[from] quick_xml::Error),

    /// Encoding error while decoding inline markup.
    #[error("encoding error")]
    Encoding(#[from] quick_xml::encoding::EncodingError),
}
