//! `quill citations` command implementation.

use std::path::PathBuf;

use clap::Args;
use quill_citations::{CitationList, extract_citations, extract_entries};
use quill_config::{CliSettings, Config};
use quill_export::{ExportRenderer, StyleSheet};

use super::CommonArgs;
use crate::error::CliError;
use crate::input::load_citation_markup;
use crate::output::Output;

/// Arguments for the citations command.
///
/// Without `--entries`, filters and sorts the citation marker in the input
/// and writes the marker back. With `--entries`, numbers the formatted
/// bibliography entries instead.
#[derive(Args)]
pub(crate) struct CitationsArgs {
    /// HTML containing the citation marker, or a rich-text document (JSON)
    /// with a citation block.
    file: PathBuf,

    /// Inclusive range start, YYYY[/MM[/DD]] (overrides config).
    #[arg(long)]
    start: Option<String>,

    /// Inclusive range end, YYYY[/MM[/DD]] (overrides config).
    #[arg(long)]
    end: Option<String>,

    /// Sort order: none, date or date_reverse (overrides config).
    #[arg(long)]
    sort_by: Option<String>,

    /// Formatted bibliography (HTML) to turn into a numbered list.
    #[arg(long)]
    entries: Option<PathBuf>,

    /// Title shown above the numbered list.
    #[arg(long)]
    title: Option<String>,

    /// Block id used for the list numbering instance.
    #[arg(short, long, default_value_t = 1)]
    block_id: u64,

    /// Write the numbered list as export paragraphs (JSON) instead of HTML.
    #[arg(long, requires = "entries")]
    json: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl CitationsArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            start_date: self.start.clone(),
            end_date: self.end.clone(),
            sort_by: self.sort_by.clone(),
            ..CliSettings::default()
        };
        let config = Config::load(self.common.config.as_deref(), Some(&cli_settings))?;
        let filter = config.citations.filter()?;

        let html = load_citation_markup(&self.file)?;
        let set = extract_citations(&html, &config.citations.marker_tag);
        if set.is_empty() {
            output.warning(&format!(
                "No citations found in {}",
                self.file.display()
            ));
        }
        let filtered = set.filter(&filter);
        output.info(&format!(
            "Citations: {} of {} in range",
            filtered.len(),
            set.len()
        ));

        let Some(entries_path) = &self.entries else {
            let marker = filtered.to_marker_html()?;
            output.emit(self.common.output.as_deref(), &marker)?;
            return Ok(());
        };

        let bibliography = std::fs::read_to_string(entries_path)?;
        let entries = extract_entries(&bibliography, &config.citations.entry_class);
        if entries.len() != filtered.len() {
            output.warning(&format!(
                "Bibliography has {} entries for {} citations",
                entries.len(),
                filtered.len()
            ));
        }
        let list = CitationList::new(self.title.clone(), entries, filter.sort);

        let text = if self.json {
            let styles = StyleSheet::default();
            let section = ExportRenderer::new(&styles).render_citations(self.block_id, &list)?;
            serde_json::to_string_pretty(&section)?
        } else {
            list.to_html()
        };
        output.emit(self.common.output.as_deref(), &text)?;
        Ok(())
    }
}
