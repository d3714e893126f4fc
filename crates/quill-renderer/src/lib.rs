//! Rich-text document normalizer with pluggable render backends.
//!
//! This crate turns the structured rich-text tree supplied by a content source
//! into a renderer-agnostic list of [`IntermediateBlock`]s, and renders that
//! list to HTML through the [`RenderBackend`] trait.
//!
//! # Architecture
//!
//! - [`RichTextNode`]: the source tree, deserialized from the CMS JSON shape
//! - [`render_runs`]: merges inline text runs (bold, italic, links) into markup
//! - [`BlockParser`]: normalizes the tree into [`IntermediateBlock`]s
//! - [`BlockRenderer`]: walks the blocks, delegating element markup to a backend
//! - [`HtmlBackend`]: produces semantic HTML5 for on-screen display
//!
//! For the word-processor export, use the `quill-export` crate, which consumes
//! the same [`IntermediateBlock`] list.
//!
//! # Example
//!
//! ```
//! use quill_renderer::{BlockParser, BlockRenderer, HtmlBackend, RichTextNode};
//!
//! let doc: RichTextNode = serde_json::from_str(
//!     r#"{"type":"doc","content":[
//!         {"type":"heading","attrs":{"level":2},"content":[{"type":"text","text":"Intro"}]},
//!         {"type":"paragraph","content":[{"type":"text","text":"Hello","marks":[{"type":"bold"}]}]}
//!     ]}"#,
//! )
//! .unwrap();
//!
//! let blocks = BlockParser::new("Section12").parse(&doc);
//! let result = BlockRenderer::<HtmlBackend>::new().render(&blocks);
//!
//! assert_eq!(
//!     result.html,
//!     r#"<h2 id="Section12-Intro">Intro</h2><p><strong>Hello</strong></p>"#
//! );
//! assert_eq!(result.toc[0].id, "Section12-Intro");
//! ```

mod backend;
mod block;
mod html;
mod inline;
mod model;
mod parser;
mod renderer;
mod state;

pub use backend::RenderBackend;
pub use block::{Alignment, IntermediateBlock};
pub use html::HtmlBackend;
pub use inline::render_runs;
pub use model::{Mark, NodeType, RichTextNode, TextRun};
pub use parser::{BlockParser, Normalize};
pub use renderer::{BlockRenderer, RenderResult};
pub use state::{TocEntry, anchor_slug, escape_html, strip_tags, unescape_html};
