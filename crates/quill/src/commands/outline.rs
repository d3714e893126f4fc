//! `quill outline` command implementation.

use std::path::PathBuf;

use clap::Args;
use quill_config::Config;
use quill_renderer::TocEntry;

use super::CommonArgs;
use crate::error::CliError;
use crate::input::load_blocks;
use crate::output::Output;

/// Arguments for the outline command.
#[derive(Args)]
pub(crate) struct OutlineArgs {
    /// Rich-text document or block list (JSON).
    document: PathBuf,

    /// Block id used in heading anchors when the file holds a single document.
    #[arg(short, long, default_value_t = 1)]
    block_id: u64,

    /// Print entries as JSON instead of an indented list.
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl OutlineArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = Config::load(self.common.config.as_deref(), None)?;

        let blocks = load_blocks(
            &self.document,
            self.block_id,
            config.export.formatting_mode(),
        )?;
        let toc: Vec<TocEntry> = blocks
            .iter()
            .flat_map(|block| block.render_html(&config.html.block_id_prefix).toc)
            .collect();

        let text = if self.json {
            serde_json::to_string_pretty(&toc)?
        } else {
            format_outline(&toc)
        };
        output.emit(self.common.output.as_deref(), &text)?;
        Ok(())
    }
}

/// One line per heading, indented by level, with its anchor.
fn format_outline(toc: &[TocEntry]) -> String {
    toc.iter()
        .map(|entry| {
            let indent = "  ".repeat(usize::from(entry.level.saturating_sub(1)));
            format!("{indent}{} #{}", entry.title, entry.id)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_format_outline() {
        let toc = vec![
            TocEntry {
                level: 1,
                title: "Report".to_owned(),
                id: "Section1-Report".to_owned(),
            },
            TocEntry {
                level: 3,
                title: "Awards".to_owned(),
                id: "Section1-Awards".to_owned(),
            },
        ];
        assert_eq!(
            format_outline(&toc),
            "Report #Section1-Report\n    Awards #Section1-Awards"
        );
    }
}
