//! Formatted bibliography entries.

use std::fmt::Write as _;
use std::io::BufRead;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use quill_renderer::escape_html;
use serde::Serialize;

use crate::date::SortOrder;
use crate::error::CitationError;
use crate::markup::{escape_amp, escape_bare_lt, html_reader, is_void};

/// Inner markup of every element whose class list contains `class`.
///
/// Matched elements are not searched for nested matches. `<i>` and `<b>` are
/// rewritten as `<em>` and `<strong>`, runs of whitespace collapse to a
/// single space, and each entry is trimmed. Bare `&` and `<` in text are
/// kept as entities. Entries read before a markup error are returned.
///
/// # Examples
///
/// ```
/// use quill_citations::extract_entries;
///
/// let html = r#"<div class="csl-bib-body">
///   <div class="csl-entry">Doe, J. (2020). <i>Title</i>.</div>
/// </div>"#;
/// assert_eq!(extract_entries(html, "csl-entry"), ["Doe, J. (2020). <em>Title</em>."]);
/// ```
#[must_use]
pub fn extract_entries(html: &str, class: &str) -> Vec<String> {
    let mut entries = Vec::new();
    if let Err(e) = collect_entries(html, class, &mut entries) {
        tracing::warn!(class, error = %e, "Malformed bibliography markup");
    }
    entries
}

fn collect_entries(html: &str, class: &str, entries: &mut Vec<String>) -> Result<(), CitationError> {
    let html = escape_bare_lt(html);
    let mut reader = html_reader(&html);

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) if has_class(&e, class) => {
                let inner = read_inner_html(&mut reader)?;
                entries.push(inner);
            }
            Event::Empty(e) if has_class(&e, class) => entries.push(String::new()),
            Event::Eof => return Ok(()),
            _ => {}
        }
        buf.clear();
    }
}

fn has_class(e: &BytesStart, class: &str) -> bool {
    e.html_attributes().flatten().any(|attr| {
        attr.key.as_ref().eq_ignore_ascii_case(b"class")
            && String::from_utf8_lossy(&attr.value)
                .split_whitespace()
                .any(|name| name == class)
    })
}

/// Re-serialize everything up to the current element's end tag.
fn read_inner_html<R: BufRead>(reader: &mut Reader<R>) -> Result<String, CitationError> {
    let mut buf = Vec::new();
    let mut out = String::new();
    let mut depth = 0usize;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                let (name, attrs) = split_tag(reader, &e)?;
                write!(out, "<{}{attrs}>", rename_tag(&name)).unwrap();
                if !is_void(&name) {
                    depth += 1;
                }
            }
            Event::Empty(e) => {
                let (name, attrs) = split_tag(reader, &e)?;
                write!(out, "<{}{attrs}>", rename_tag(&name)).unwrap();
            }
            Event::End(e) => {
                let name = reader.decoder().decode(e.name().as_ref())?.to_ascii_lowercase();
                if is_void(&name) {
                    buf.clear();
                    continue;
                }
                if depth == 0 {
                    break;
                }
                depth -= 1;
                write!(out, "</{}>", rename_tag(&name)).unwrap();
            }
            Event::Text(e) => out.push_str(&escape_amp(&reader.decoder().decode(&e)?)),
            Event::GeneralRef(e) => {
                write!(out, "&{};", reader.decoder().decode(&e)?).unwrap();
            }
            Event::CData(e) => out.push_str(&escape_html(&String::from_utf8_lossy(&e))),
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(collapse_whitespace(&out))
}

/// Lowercase tag name and the raw attribute text that follows it.
fn split_tag<R: BufRead>(
    reader: &Reader<R>,
    e: &BytesStart,
) -> Result<(String, String), CitationError> {
    let raw = reader.decoder().decode(e)?;
    let name_len = e.name().as_ref().len();
    let (name, attrs) = raw.split_at(name_len.min(raw.len()));
    Ok((name.to_ascii_lowercase(), attrs.trim_end().to_owned()))
}

fn rename_tag(name: &str) -> &str {
    match name {
        "i" => "em",
        "b" => "strong",
        other => other,
    }
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Entry with its display number.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NumberedEntry {
    pub number: usize,
    pub html: String,
}

/// Number entries `1..=n`, or `n..=1` when sorted newest first.
///
/// Reverse numbering keeps the oldest citation at number 1 whichever way the
/// list is sorted.
#[must_use]
pub fn number_entries(entries: Vec<String>, sort: SortOrder) -> Vec<NumberedEntry> {
    let count = entries.len();
    entries
        .into_iter()
        .enumerate()
        .map(|(index, html)| NumberedEntry {
            number: if sort == SortOrder::DateReverse {
                count - index
            } else {
                index + 1
            },
            html,
        })
        .collect()
}

/// Numbered bibliography ready for display.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CitationList {
    /// Heading shown above the list.
    pub title: Option<String>,
    pub entries: Vec<NumberedEntry>,
    /// Numbers count down.
    pub reversed: bool,
}

impl CitationList {
    /// Number `entries` according to `sort`.
    #[must_use]
    pub fn new(title: Option<String>, entries: Vec<String>, sort: SortOrder) -> Self {
        Self {
            title: title.filter(|title| !title.trim().is_empty()),
            entries: number_entries(entries, sort),
            reversed: sort == SortOrder::DateReverse,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render as an `<h4>` title followed by an ordered list.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        if let Some(title) = &self.title {
            write!(out, "<h4>{}</h4>", escape_html(title)).unwrap();
        }
        if self.reversed {
            out.push_str(r#"<ol class="citations" reversed>"#);
        } else {
            out.push_str(r#"<ol class="citations">"#);
        }
        for entry in &self.entries {
            write!(out, r#"<li value="{}">{}</li>"#, entry.number, entry.html).unwrap();
        }
        out.push_str("</ol>");
        out
    }
}
