//! HTML backend for block rendering.
//!
//! Produces semantic HTML5 output suitable for web display.

use std::fmt::Write;

use crate::backend::RenderBackend;
use crate::state::escape_html;

// Warning icon (GitHub Octicons-style, 16x16)
const SVG_ALERT: &str = r#"<svg class="alert-icon" viewBox="0 0 16 16" width="16" height="16" aria-hidden="true"><path d="M6.457 1.047c.659-1.234 2.427-1.234 3.086 0l6.082 11.378A1.75 1.75 0 0 1 14.082 15H1.918a1.75 1.75 0 0 1-1.543-2.575Zm1.763.707a.25.25 0 0 0-.44 0L1.698 13.132a.25.25 0 0 0 .22.368h12.164a.25.25 0 0 0 .22-.368Zm.53 3.996v2.5a.75.75 0 0 1-1.5 0v-2.5a.75.75 0 0 1 1.5 0ZM9 11a1 1 0 1 1-2 0 1 1 0 0 1 2 0Z"></path></svg>"#;

/// HTML render backend.
///
/// Produces semantic HTML5 with:
/// - `<pre><code>` for code blocks
/// - `<blockquote>` for blockquotes
/// - `<img>` (inside `<figure>` when captioned) for images
/// - `<hr>` for dividers
/// - an alert panel for warnings
pub struct HtmlBackend;

impl RenderBackend for HtmlBackend {
    fn code_block(lang: Option<&str>, html: &str, out: &mut String) {
        if let Some(lang) = lang {
            write!(
                out,
                r#"<pre><code class="language-{}">{html}</code></pre>"#,
                escape_html(lang)
            )
            .unwrap();
        } else {
            write!(out, "<pre><code>{html}</code></pre>").unwrap();
        }
    }

    fn blockquote_start(out: &mut String) {
        out.push_str("<blockquote>");
    }

    fn blockquote_end(out: &mut String) {
        out.push_str("</blockquote>");
    }

    fn image(src: &str, alt: &str, caption: &str, out: &mut String) {
        let img = format!(
            r#"<img src="{}" alt="{}">"#,
            escape_html(src),
            escape_html(alt)
        );
        if caption.is_empty() {
            out.push_str(&img);
        } else {
            write!(
                out,
                "<figure>{img}<figcaption>{}</figcaption></figure>",
                escape_html(caption)
            )
            .unwrap();
        }
    }

    fn warning(html: &str, out: &mut String) {
        write!(
            out,
            r#"<div class="alert alert-warning"><div class="alert-title">{SVG_ALERT}Warning</div><div class="alert-content">{html}</div></div>"#
        )
        .unwrap();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::Alignment;

    #[test]
    fn test_code_block_with_language() {
        let mut out = String::new();
        HtmlBackend::code_block(Some("rust"), "fn main() {}", &mut out);
        assert_eq!(
            out,
            r#"<pre><code class="language-rust">fn main() {}</code></pre>"#
        );
    }

    #[test]
    fn test_code_block_without_language() {
        let mut out = String::new();
        HtmlBackend::code_block(None, "plain &amp; code", &mut out);
        assert_eq!(out, "<pre><code>plain &amp; code</code></pre>");
    }

    #[test]
    fn test_blockquote() {
        let mut out = String::new();
        HtmlBackend::blockquote_start(&mut out);
        out.push_str("content");
        HtmlBackend::blockquote_end(&mut out);
        assert_eq!(out, "<blockquote>content</blockquote>");
    }

    #[test]
    fn test_image() {
        let mut out = String::new();
        HtmlBackend::image("image.png", "Alt text", "", &mut out);
        assert_eq!(out, r#"<img src="image.png" alt="Alt text">"#);
    }

    #[test]
    fn test_image_with_caption() {
        let mut out = String::new();
        HtmlBackend::image("image.png", "Alt", "Figure 1", &mut out);
        assert_eq!(
            out,
            r#"<figure><img src="image.png" alt="Alt"><figcaption>Figure 1</figcaption></figure>"#
        );
    }

    #[test]
    fn test_paragraph_alignment() {
        let mut out = String::new();
        HtmlBackend::paragraph("x", Some(Alignment::Center), &mut out);
        assert_eq!(out, r#"<p style="text-align:center">x</p>"#);

        let mut out = String::new();
        HtmlBackend::paragraph("x", Some(Alignment::Left), &mut out);
        assert_eq!(out, "<p>x</p>");
    }

    #[test]
    fn test_heading() {
        let mut out = String::new();
        HtmlBackend::heading(3, "S1-Intro", "Intro", None, &mut out);
        assert_eq!(out, r#"<h3 id="S1-Intro">Intro</h3>"#);
    }

    #[test]
    fn test_divider() {
        let mut out = String::new();
        HtmlBackend::divider(Some("dotted"), &mut out);
        assert_eq!(out, r#"<hr class="divider divider-dotted">"#);

        let mut out = String::new();
        HtmlBackend::divider(None, &mut out);
        assert_eq!(out, r#"<hr class="divider">"#);
    }

    #[test]
    fn test_warning() {
        let mut out = String::new();
        HtmlBackend::warning("<strong>Careful</strong>", &mut out);
        assert!(out.contains(r#"class="alert alert-warning""#));
        assert!(out.contains(r#"<svg class="alert-icon""#));
        assert!(out.contains("<strong>Careful</strong>"));
    }
}
