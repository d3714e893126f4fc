//! HTML-tolerant reader setup shared by marker and entry extraction.

use std::borrow::Cow;

use quick_xml::reader::Reader;

/// Elements that never have an end tag in HTML.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

pub(crate) fn is_void(name: &str) -> bool {
    VOID_ELEMENTS.iter().any(|void| void.eq_ignore_ascii_case(name))
}

/// Reader accepting HTML text: unmatched end tags and bare `&` are allowed.
pub(crate) fn html_reader(html: &str) -> Reader<&[u8]> {
    let mut reader = Reader::from_str(html);
    let config = reader.config_mut();
    config.trim_text(false);
    config.check_end_names = false;
    config.allow_dangling_amp = true;
    reader
}

/// Escape every `<` that cannot start a tag, comment or declaration.
///
/// Browsers read `a < b` as text; an XML tokenizer would take it as a tag.
pub(crate) fn escape_bare_lt(html: &str) -> Cow<'_, str> {
    let starts_tag = |rest: &str| {
        rest.chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || matches!(c, '/' | '!' | '?'))
    };

    if !html
        .match_indices('<')
        .any(|(i, _)| !starts_tag(&html[i + 1..]))
    {
        return Cow::Borrowed(html);
    }

    let mut out = String::with_capacity(html.len() + 8);
    let mut rest = html;
    while let Some(i) = rest.find('<') {
        out.push_str(&rest[..i]);
        if starts_tag(&rest[i + 1..]) {
            out.push('<');
        } else {
            out.push_str("&lt;");
        }
        rest = &rest[i + 1..];
    }
    out.push_str(rest);
    Cow::Owned(out)
}

/// Escape `&` in text that the reader passed through as a dangling ampersand.
pub(crate) fn escape_amp(text: &str) -> Cow<'_, str> {
    if text.contains('&') {
        Cow::Owned(text.replace('&', "&amp;"))
    } else {
        Cow::Borrowed(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_bare_lt() {
        assert_eq!(escape_bare_lt("<p>a < b</p>"), "<p>a &lt; b</p>");
        assert_eq!(escape_bare_lt("x <3 <br/><!-- c -->"), "x &lt;3 <br/><!-- c -->");
        assert!(matches!(escape_bare_lt("<p>plain</p>"), Cow::Borrowed(_)));
        assert_eq!(escape_bare_lt("trailing <"), "trailing &lt;");
    }

    #[test]
    fn test_is_void() {
        assert!(is_void("br"));
        assert!(is_void("IMG"));
        assert!(!is_void("div"));
    }

    #[test]
    fn test_escape_amp() {
        assert_eq!(escape_amp("Smith & Jones"), "Smith &amp; Jones");
        assert_eq!(escape_amp("none"), "none");
    }
}
