//! `quill html` command implementation.

use std::path::PathBuf;

use clap::Args;
use quill_config::{CliSettings, Config};

use super::CommonArgs;
use crate::error::CliError;
use crate::input::load_blocks;
use crate::output::Output;

/// Arguments for the html command.
#[derive(Args)]
pub(crate) struct HtmlArgs {
    /// Rich-text document or block list (JSON).
    document: PathBuf,

    /// Block id used in heading anchors when the file holds a single document.
    #[arg(short, long, default_value_t = 1)]
    block_id: u64,

    /// Heading anchor prefix (overrides config).
    #[arg(long, env = "QUILL_BLOCK_ID_PREFIX")]
    prefix: Option<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl HtmlArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            block_id_prefix: self.prefix.clone(),
            ..CliSettings::default()
        };
        let config = Config::load(self.common.config.as_deref(), Some(&cli_settings))?;
        let prefix = &config.html.block_id_prefix;

        let blocks = load_blocks(
            &self.document,
            self.block_id,
            config.export.formatting_mode(),
        )?;

        let html: String = blocks
            .iter()
            .map(|block| block.render_html(prefix).html)
            .collect();

        output.emit(self.common.output.as_deref(), &html)?;
        Ok(())
    }
}
