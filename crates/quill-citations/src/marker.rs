//! Citation marker extraction and re-serialization.

use std::fmt::Write as _;
use std::io::BufRead;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use quill_renderer::{NodeType, RichTextNode, escape_html, unescape_html};

use crate::citation::Citation;
use crate::error::CitationError;
use crate::filter::CitationFilter;
use crate::markup::{escape_bare_lt, html_reader, is_void};

/// Tag name of the element carrying the citation payload.
pub const DEFAULT_MARKER_TAG: &str = "u-cite";

/// Citations read from a marker element together with its attributes.
#[derive(Clone, Debug, PartialEq)]
pub struct CitationSet {
    /// Citation records in payload order.
    pub citations: Vec<Citation>,
    /// Marker attributes in source order, values unescaped.
    pub attributes: Vec<(String, String)>,
    /// Marker tag name used when writing the set back.
    pub marker_tag: String,
}

impl CitationSet {
    /// Empty set for `marker_tag`.
    #[must_use]
    pub fn empty(marker_tag: impl Into<String>) -> Self {
        Self {
            citations: Vec::new(),
            attributes: Vec::new(),
            marker_tag: marker_tag.into(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.citations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.citations.is_empty()
    }

    /// Apply a date filter and sort order, keeping the marker attributes.
    #[must_use]
    pub fn filter(&self, filter: &CitationFilter) -> Self {
        Self {
            citations: filter.apply(&self.citations),
            attributes: self.attributes.clone(),
            marker_tag: self.marker_tag.clone(),
        }
    }

    /// Write the set back in marker form.
    ///
    /// Produces `<tag a="v" …>` followed by the citation list as JSON with
    /// two-space indentation and the closing tag. Attributes keep their order.
    ///
    /// # Errors
    ///
    /// Returns [`CitationError::Json`] if a record cannot be serialized.
    pub fn to_marker_html(&self) -> Result<String, CitationError> {
        let json = serde_json::to_string_pretty(&self.citations)?;

        let mut out = String::with_capacity(json.len() + 64);
        out.push('<');
        out.push_str(&self.marker_tag);
        for (name, value) in &self.attributes {
            write!(out, r#" {name}="{}""#, escape_html(value)).unwrap();
        }
        out.push('>');
        push_text(&json, &mut out);
        write!(out, "</{}>", self.marker_tag).unwrap();
        Ok(out)
    }
}

/// Extract the citation list from the first `marker_tag` element in `html`.
///
/// The marker's content must be a JSON list of objects. It is read as raw
/// text up to the closing tag, so bare `&` and `<` inside string values are
/// kept. A missing marker yields an empty set. Unparseable markup or payload
/// also yields an empty list (logged at `warn`); the marker attributes are
/// kept whenever the start tag was read.
#[must_use]
pub fn extract_citations(html: &str, marker_tag: &str) -> CitationSet {
    let mut set = CitationSet::empty(marker_tag);

    let marker = match find_marker(html, marker_tag) {
        Ok(Some(marker)) => marker,
        Ok(None) => {
            tracing::debug!(tag = marker_tag, "No citation marker found");
            return set;
        }
        Err(e) => {
            tracing::warn!(tag = marker_tag, error = %e, "Malformed citation markup");
            return set;
        }
    };

    set.attributes = marker.attributes;
    if unescape_html(&marker.raw).trim().is_empty() {
        return set;
    }

    match parse_payload(&marker.raw) {
        Ok(citations) => set.citations = citations,
        Err(e) => {
            tracing::warn!(tag = marker_tag, error = %e, "Invalid citation payload");
        }
    }
    set
}

/// Parse the raw marker content as a citation list.
///
/// Markup wrapped around the JSON (line breaks, spans) is dropped on a
/// second attempt when the raw text does not parse.
fn parse_payload(raw: &str) -> Result<Vec<Citation>, CitationError> {
    let first = serde_json::from_str::<Vec<Citation>>(unescape_html(raw).trim());
    if first.is_err()
        && raw.contains('<')
        && let Ok(text) = text_content(raw)
        && let Ok(citations) = serde_json::from_str(text.trim())
    {
        return Ok(citations);
    }
    first.map_err(CitationError::from)
}

/// Raw marker markup carried by a citation block node.
///
/// Taken from the `html` attribute when present, otherwise from the text of
/// the first paragraph (where editors paste the marker), otherwise from all
/// text in the node.
#[must_use]
pub fn marker_html_from_node(node: &RichTextNode) -> String {
    if let Some(html) = node.attr_str("html") {
        return html.to_owned();
    }
    node.children()
        .iter()
        .find(|child| child.node_type == NodeType::Paragraph)
        .map_or_else(|| node.plain_text(), RichTextNode::plain_text)
}

struct Marker {
    attributes: Vec<(String, String)>,
    /// Content between the start tag and the closing tag, still escaped.
    raw: String,
}

fn find_marker(html: &str, tag: &str) -> Result<Option<Marker>, CitationError> {
    let html = escape_bare_lt(html);
    let mut reader = html_reader(&html);

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) if is_marker(&e, tag) => {
                let attributes = decode_attrs(&reader, &e);
                let after = usize::try_from(reader.buffer_position())
                    .ok()
                    .and_then(|pos| html.get(pos..))
                    .unwrap_or_default();
                return Ok(Some(Marker {
                    attributes,
                    raw: content_before_close(after, tag).to_owned(),
                }));
            }
            Event::Empty(e) if is_marker(&e, tag) => {
                return Ok(Some(Marker {
                    attributes: decode_attrs(&reader, &e),
                    raw: String::new(),
                }));
            }
            Event::Eof => return Ok(None),
            _ => {}
        }
        buf.clear();
    }
}

fn is_marker(e: &BytesStart, tag: &str) -> bool {
    e.name().as_ref().eq_ignore_ascii_case(tag.as_bytes())
}

/// Text up to the first `</tag`, matched case-insensitively, or to the end.
fn content_before_close<'a>(after: &'a str, tag: &str) -> &'a str {
    let close = format!("</{}", tag.to_ascii_lowercase());
    let end = after
        .to_ascii_lowercase()
        .find(&close)
        .unwrap_or(after.len());
    &after[..end]
}

/// Concatenated text of a markup fragment, entities decoded.
fn text_content(fragment: &str) -> Result<String, CitationError> {
    let mut reader = html_reader(fragment);
    let mut buf = Vec::new();
    let mut text = String::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) | Event::Empty(e)
                if is_void(&String::from_utf8_lossy(e.name().as_ref())) =>
            {
                text.push(' ');
            }
            Event::Text(e) => text.push_str(&reader.decoder().decode(&e)?),
            Event::GeneralRef(e) => {
                let entity = reader.decoder().decode(&e)?;
                text.push_str(&unescape_html(&format!("&{entity};")));
            }
            Event::CData(e) => text.push_str(&String::from_utf8_lossy(&e)),
            Event::Eof => return Ok(text),
            _ => {}
        }
        buf.clear();
    }
}

fn decode_attrs<R: BufRead>(reader: &Reader<R>, e: &BytesStart) -> Vec<(String, String)> {
    e.html_attributes()
        .flatten()
        .map(|attr| {
            let key = reader.decoder().decode(attr.key.as_ref()).map_or_else(
                |_| String::from_utf8_lossy(attr.key.as_ref()).into_owned(),
                std::borrow::Cow::into_owned,
            );
            let value = attr.unescape_value().map_or_else(
                |_| String::from_utf8_lossy(&attr.value).into_owned(),
                std::borrow::Cow::into_owned,
            );
            (key, value)
        })
        .collect()
}

/// Escape text content. Quotes stay literal so the JSON payload is readable.
fn push_text(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}
