//! Inline text-run normalization.

use std::fmt::Write;

use crate::model::TextRun;
use crate::state::escape_html;

/// Render a sequence of text runs into a single HTML-safe string.
///
/// Bold and italic nest as `<strong><em>…</em></strong>`. Consecutive runs
/// that link to the same href (exact string match) share one anchor. Empty
/// runs are dropped before merging, so they never split an anchor.
///
/// # Examples
///
/// ```
/// use quill_renderer::{TextRun, render_runs};
///
/// let runs = [
///     TextRun::plain("see ").linked("/docs"),
///     TextRun::plain("the docs").bold().linked("/docs"),
///     TextRun::plain("."),
/// ];
/// assert_eq!(
///     render_runs(&runs),
///     r#"<a href="/docs">see <strong>the docs</strong></a>."#
/// );
/// ```
#[must_use]
pub fn render_runs(runs: &[TextRun]) -> String {
    let visible: Vec<&TextRun> = runs.iter().filter(|run| run.is_visible()).collect();

    let mut out = String::new();
    let mut open_link: Option<&str> = None;

    for (i, run) in visible.iter().enumerate() {
        let href = run.link.as_deref();

        if let Some(href) = href
            && open_link != Some(href)
        {
            write!(out, r#"<a href="{}">"#, escape_html(href)).unwrap();
            open_link = Some(href);
        }

        push_styled(run, &mut out);

        let next_href = visible.get(i + 1).and_then(|next| next.link.as_deref());
        if open_link.is_some() && next_href != open_link {
            out.push_str("</a>");
            open_link = None;
        }
    }

    out
}

fn push_styled(run: &TextRun, out: &mut String) {
    if run.line_break {
        out.push_str("<br>");
        return;
    }

    let (open, close) = match (run.bold, run.italic) {
        (true, true) => ("<strong><em>", "</em></strong>"),
        (true, false) => ("<strong>", "</strong>"),
        (false, true) => ("<em>", "</em>"),
        (false, false) => ("", ""),
    };
    out.push_str(open);
    out.push_str(&escape_html(&run.text));
    out.push_str(close);
}
