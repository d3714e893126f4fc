//! CLI command implementations.

mod citations;
mod export;
mod html;
mod outline;

use std::path::PathBuf;

use clap::Args;

pub(crate) use citations::CitationsArgs;
pub(crate) use export::ExportArgs;
pub(crate) use html::HtmlArgs;
pub(crate) use outline::OutlineArgs;

/// Arguments shared by every command.
#[derive(Args)]
pub(crate) struct CommonArgs {
    /// Path to configuration file (default: auto-discover quill.toml).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Write the result to a file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}
