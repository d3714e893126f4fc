//! Shared text helpers and table of contents entries.

use serde::{Deserialize, Serialize};

/// Table of contents entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocEntry {
    /// Heading level (1-6).
    pub level: u8,
    /// Heading text without markup.
    pub title: String,
    /// Anchor ID for linking.
    pub id: String,
}

/// Build the in-page anchor fragment for a heading.
///
/// Strips markup tags from the heading HTML, decodes entities back to the
/// heading text and replaces every whitespace character with a hyphen. Case
/// and punctuation are kept as-is so the result matches the anchors an
/// outline collaborator builds from the heading text.
///
/// # Examples
///
/// ```
/// use quill_renderer::anchor_slug;
///
/// assert_eq!(anchor_slug("Getting <strong>Started</strong>"), "Getting-Started");
/// assert_eq!(anchor_slug("a  b"), "a--b");
/// assert_eq!(anchor_slug("Q&amp;A"), "Q&A");
/// ```
#[must_use]
pub fn anchor_slug(html: &str) -> String {
    unescape_html(&strip_tags(html))
        .chars()
        .map(|c| if c.is_whitespace() { '-' } else { c })
        .collect()
}

/// Remove markup tags, keeping text content (entities are left encoded).
#[must_use]
pub fn strip_tags(html: &str) -> String {
    let mut result = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => result.push(c),
            _ => {}
        }
    }
    result
}

/// Escape HTML special characters.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

/// Reverse [`escape_html`] and decode numeric character references.
///
/// Unknown entities are kept verbatim.
#[must_use]
pub fn unescape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        result.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        match tail.find(';') {
            Some(semi) if semi > 1 => {
                let entity = &tail[1..semi];
                match decode_entity(entity) {
                    Some(c) => result.push(c),
                    None => result.push_str(&tail[..=semi]),
                }
                rest = &tail[semi + 1..];
            }
            _ => {
                result.push('&');
                rest = &tail[1..];
            }
        }
    }
    result.push_str(rest);
    result
}

fn decode_entity(entity: &str) -> Option<char> {
    match entity {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{00a0}'),
        s if s.starts_with("#x") || s.starts_with("#X") => {
            u32::from_str_radix(&s[2..], 16).ok().and_then(char::from_u32)
        }
        s if s.starts_with('#') => s[1..].parse::<u32>().ok().and_then(char::from_u32),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_slug() {
        assert_eq!(anchor_slug("Hello World"), "Hello-World");
        assert_eq!(anchor_slug("<em>Hello</em>\tWorld"), "Hello-World");
        assert_eq!(anchor_slug("What's New?"), "What's-New?");
        assert_eq!(anchor_slug("Q&amp;A &lt;intro&gt;"), "Q&A-<intro>");
    }

    #[test]
    fn test_strip_tags() {
        assert_eq!(
            strip_tags(r#"<a href="x">link</a> and <strong>bold</strong>"#),
            "link and bold"
        );
        assert_eq!(strip_tags("a &amp; b"), "a &amp; b");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<script>"), "&lt;script&gt;");
        assert_eq!(escape_html("a & b"), "a &amp; b");
        assert_eq!(escape_html(r#""quoted""#), "&quot;quoted&quot;");
        assert_eq!(escape_html("it's"), "it&#x27;s");
    }

    #[test]
    fn test_unescape_html() {
        assert_eq!(unescape_html("a &amp; b"), "a & b");
        assert_eq!(unescape_html("it&#x27;s &#65;"), "it's A");
        assert_eq!(unescape_html("&unknown; & done"), "&unknown; & done");
        assert_eq!(unescape_html(&escape_html(r#"<"x">"#)), r#"<"x">"#);
    }
}
