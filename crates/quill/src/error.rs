//! CLI error types.

use quill_config::ConfigError;
use quill_export::ExportError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Export(#[from] ExportError),

    #[error("{0}")]
    Citation(#[from] quill_citations::CitationError),
}
