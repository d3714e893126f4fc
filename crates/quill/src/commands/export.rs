//! `quill export` command implementation.

use std::path::PathBuf;

use clap::Args;
use quill_config::{CliSettings, Config};
use quill_export::{ExportRenderer, Report, StyleSheet};

use super::CommonArgs;
use crate::error::CliError;
use crate::input::load_blocks;
use crate::output::Output;

/// Arguments for the export command.
#[derive(Args)]
pub(crate) struct ExportArgs {
    /// Rich-text document or block list (JSON).
    document: PathBuf,

    /// Formatting mode for blocks that don't name one (overrides config).
    #[arg(short, long)]
    formatting: Option<String>,

    /// Block id used for numbering when the file holds a single document.
    #[arg(short, long, default_value_t = 1)]
    block_id: u64,

    /// Style sheet (JSON) replacing the built-in report styles.
    #[arg(long)]
    styles: Option<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl ExportArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            formatting: self.formatting.clone(),
            ..CliSettings::default()
        };
        let config = Config::load(self.common.config.as_deref(), Some(&cli_settings))?;

        let styles = match &self.styles {
            Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
            None => StyleSheet::default(),
        };

        let blocks = load_blocks(
            &self.document,
            self.block_id,
            config.export.formatting_mode(),
        )?;

        let renderer = ExportRenderer::new(&styles);
        let mut report = Report::new(styles.clone());
        for block in &blocks {
            report.push(block.render_export(&renderer)?);
        }
        tracing::info!(
            sections = report.sections.len(),
            paragraphs = report.paragraphs().count(),
            "Rendered export"
        );

        let json = serde_json::to_string_pretty(&report)?;
        output.emit(self.common.output.as_deref(), &json)?;
        Ok(())
    }
}
