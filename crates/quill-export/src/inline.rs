//! Inline markup to export runs.

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use quill_renderer::{strip_tags, unescape_html};

use crate::error::ExportError;
use crate::paragraph::Run;

/// Convert inline markup into runs.
///
/// Understands `<strong>`/`<b>`, `<em>`/`<i>`, `<a href>`, `<br>` and
/// `<img>`; other tags are dropped and their text kept. Adjacent text with
/// the same formatting is merged into one run. Markup that cannot be
/// tokenized degrades to a single plain run of its text.
#[must_use]
pub fn html_to_runs(html: &str) -> Vec<Run> {
    match parse_runs(html) {
        Ok(runs) => runs,
        Err(e) => {
            tracing::warn!(error = %e, "Unparseable inline markup, exporting plain text");
            let text = unescape_html(&strip_tags(html));
            if text.is_empty() {
                Vec::new()
            } else {
                vec![Run::text(text)]
            }
        }
    }
}

#[derive(Default)]
struct RunBuilder {
    runs: Vec<Run>,
    bold: usize,
    italic: usize,
    links: Vec<Option<String>>,
}

impl RunBuilder {
    fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let bold = self.bold > 0;
        let italic = self.italic > 0;
        let link = self.links.iter().rev().find_map(Clone::clone);

        if let Some(Run::Text {
            text: last,
            bold: last_bold,
            italic: last_italic,
            link: last_link,
        }) = self.runs.last_mut()
            && *last_bold == bold
            && *last_italic == italic
            && *last_link == link
        {
            last.push_str(text);
            return;
        }

        self.runs.push(Run::Text {
            text: text.to_owned(),
            bold,
            italic,
            link,
        });
    }

    fn open(&mut self, e: &BytesStart) {
        match tag_name(e).as_str() {
            "strong" | "b" => self.bold += 1,
            "em" | "i" => self.italic += 1,
            "a" => self.links.push(attr(e, "href")),
            "br" => self.runs.push(Run::Break),
            "img" => self.image(e),
            _ => {}
        }
    }

    /// Self-closing tag; only breaks and images produce output.
    fn void(&mut self, e: &BytesStart) {
        match tag_name(e).as_str() {
            "br" => self.runs.push(Run::Break),
            "img" => self.image(e),
            _ => {}
        }
    }

    fn close(&mut self, name: &str) {
        match name {
            "strong" | "b" => self.bold = self.bold.saturating_sub(1),
            "em" | "i" => self.italic = self.italic.saturating_sub(1),
            "a" => {
                self.links.pop();
            }
            _ => {}
        }
    }

    fn image(&mut self, e: &BytesStart) {
        if let Some(src) = attr(e, "src") {
            self.runs.push(Run::Image {
                src,
                alt: attr(e, "alt").unwrap_or_default(),
            });
        }
    }
}

fn parse_runs(html: &str) -> Result<Vec<Run>, ExportError> {
    let mut reader = Reader::from_str(html);
    let config = reader.config_mut();
    config.trim_text(false);
    config.check_end_names = false;
    config.allow_dangling_amp = true;

    let mut builder = RunBuilder::default();
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => builder.open(&e),
            Event::Empty(e) => builder.void(&e),
            Event::End(e) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_ascii_lowercase();
                builder.close(&name);
            }
            Event::Text(e) => builder.push_text(&reader.decoder().decode(&e)?),
            Event::GeneralRef(e) => {
                let entity = reader.decoder().decode(&e)?;
                builder.push_text(&unescape_html(&format!("&{entity};")));
            }
            Event::CData(e) => builder.push_text(&String::from_utf8_lossy(&e)),
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }
    Ok(builder.runs)
}

fn tag_name(e: &BytesStart) -> String {
    String::from_utf8_lossy(e.name().as_ref()).to_ascii_lowercase()
}

fn attr(e: &BytesStart, name: &str) -> Option<String> {
    e.html_attributes()
        .flatten()
        .find(|attr| attr.key.as_ref().eq_ignore_ascii_case(name.as_bytes()))
        .map(|attr| {
            attr.unescape_value().map_or_else(
                |_| String::from_utf8_lossy(&attr.value).into_owned(),
                std::borrow::Cow::into_owned,
            )
        })
}
