//! Render backend trait for format-specific block markup.
//!
//! The block walk (recursion into lists and blockquotes, table of contents
//! collection) lives in [`BlockRenderer`](crate::BlockRenderer); backends only
//! decide what each element looks like.

use std::fmt::Write;

use crate::block::Alignment;
use crate::state::escape_html;

/// Backend trait for format-specific rendering operations.
///
/// All inline content handed to a backend is already escaped markup produced
/// by [`render_runs`](crate::render_runs); attribute values are raw strings.
pub trait RenderBackend {
    /// Render a paragraph.
    fn paragraph(html: &str, alignment: Option<Alignment>, out: &mut String) {
        out.push_str("<p");
        push_alignment(alignment, out);
        write!(out, ">{html}</p>").unwrap();
    }

    /// Render a heading with its anchor id.
    fn heading(level: u8, id: &str, html: &str, alignment: Option<Alignment>, out: &mut String) {
        write!(out, r#"<h{level} id="{}""#, escape_html(id)).unwrap();
        push_alignment(alignment, out);
        write!(out, ">{html}</h{level}>").unwrap();
    }

    /// Render a code block.
    ///
    /// # Arguments
    ///
    /// * `lang` - Optional language identifier (e.g., "rust", "python")
    /// * `html` - Escaped code content
    /// * `out` - Output buffer to write to
    fn code_block(lang: Option<&str>, html: &str, out: &mut String);

    /// Render blockquote start tag.
    fn blockquote_start(out: &mut String);

    /// Render blockquote end tag.
    fn blockquote_end(out: &mut String);

    /// Render list start tag.
    fn list_start(ordered: bool, out: &mut String) {
        out.push_str(if ordered { "<ol>" } else { "<ul>" });
    }

    /// Render list end tag.
    fn list_end(ordered: bool, out: &mut String) {
        out.push_str(if ordered { "</ol>" } else { "</ul>" });
    }

    /// Render list item start tag.
    fn item_start(out: &mut String) {
        out.push_str("<li>");
    }

    /// Render list item end tag.
    fn item_end(out: &mut String) {
        out.push_str("</li>");
    }

    /// Render an image.
    ///
    /// # Arguments
    ///
    /// * `src` - Image source URL
    /// * `alt` - Alt text for the image
    /// * `caption` - Caption text, empty when absent
    /// * `out` - Output buffer to write to
    fn image(src: &str, alt: &str, caption: &str, out: &mut String);

    /// Render a divider.
    ///
    /// `style` is the divider type from the source block (e.g. `dotted`).
    fn divider(style: Option<&str>, out: &mut String) {
        match style {
            Some(style) => write!(
                out,
                r#"<hr class="divider divider-{}">"#,
                escape_html(style)
            )
            .unwrap(),
            None => out.push_str(r#"<hr class="divider">"#),
        }
    }

    /// Render a warning panel.
    fn warning(html: &str, out: &mut String);
}

fn push_alignment(alignment: Option<Alignment>, out: &mut String) {
    match alignment {
        None | Some(Alignment::Left) => {}
        Some(align) => write!(out, r#" style="text-align:{}""#, align.as_css()).unwrap(),
    }
}
