//! Quill CLI - Content transform engine.
//!
//! Provides commands for:
//! - `html`: Render rich-text blocks to HTML
//! - `export`: Render rich-text blocks to styled export paragraphs
//! - `outline`: List heading anchors
//! - `citations`: Filter a citation marker or number a bibliography

mod commands;
mod error;
mod input;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CitationsArgs, CommonArgs, ExportArgs, HtmlArgs, OutlineArgs};
use output::Output;

/// Quill - Content transform engine.
#[derive(Parser)]
#[command(name = "quill", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render rich-text blocks to HTML.
    Html(HtmlArgs),
    /// Render rich-text blocks to export paragraphs (JSON).
    Export(ExportArgs),
    /// List heading anchors of rich-text blocks.
    Outline(OutlineArgs),
    /// Filter citations or number a formatted bibliography.
    Citations(CitationsArgs),
}

impl Commands {
    fn common(&self) -> &CommonArgs {
        match self {
            Self::Html(args) => &args.common,
            Self::Export(args) => &args.common,
            Self::Outline(args) => &args.common,
            Self::Citations(args) => &args.common,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.command.common().verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Html(args) => args.execute(),
        Commands::Export(args) => args.execute(),
        Commands::Outline(args) => args.execute(),
        Commands::Citations(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
