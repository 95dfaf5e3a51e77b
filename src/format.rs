//! Message text formatting: bare `http(s)://` URLs become links and every
//! newline-delimited line becomes its own paragraph.
//!
//! [`format_message`] produces segments for the native view;
//! [`format_message_html`] renders the same structure as markup, with all
//! message text escaped.

use once_cell::sync::Lazy;
use regex::Regex;

static URL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://\S+").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    Link(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Paragraph {
    pub segments: Vec<Segment>,
}

impl Paragraph {
    /// A blank source line.
    pub fn is_blank(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn links(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Link(url) => Some(url.as_str()),
            Segment::Text(_) => None,
        })
    }
}

fn split_line(line: &str) -> Paragraph {
    let mut segments = Vec::new();
    let mut cursor = 0;
    for found in URL_RE.find_iter(line) {
        if found.start() > cursor {
            segments.push(Segment::Text(line[cursor..found.start()].to_string()));
        }
        segments.push(Segment::Link(found.as_str().to_string()));
        cursor = found.end();
    }
    if cursor < line.len() {
        segments.push(Segment::Text(line[cursor..].to_string()));
    }
    Paragraph { segments }
}

pub fn format_message(text: &str) -> Vec<Paragraph> {
    text.split('\n').map(split_line).collect()
}

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

pub fn format_message_html(text: &str) -> String {
    let mut html = String::new();
    for paragraph in format_message(text) {
        if paragraph.is_blank() {
            html.push_str("<p><br/></p>");
            continue;
        }
        html.push_str("<p>");
        for segment in &paragraph.segments {
            match segment {
                Segment::Text(raw) => html.push_str(&escape_html(raw)),
                Segment::Link(url) => {
                    let url = escape_html(url);
                    html.push_str(&format!(
                        r#"<a href="{url}" target="_blank" rel="noopener noreferrer">{url}</a>"#
                    ));
                }
            }
        }
        html.push_str("</p>");
    }
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn links_url_and_splits_paragraphs() {
        let html = format_message_html("see http://x.com here\nnext line");
        assert_eq!(
            html,
            concat!(
                r#"<p>see <a href="http://x.com" target="_blank" rel="noopener noreferrer">http://x.com</a> here</p>"#,
                "<p>next line</p>"
            )
        );
    }

    #[test]
    fn blank_line_is_empty_paragraph_with_break() {
        let html = format_message_html("first\n\nsecond");
        assert_eq!(html, "<p>first</p><p><br/></p><p>second</p>");
    }

    #[test]
    fn escapes_markup_in_text_and_urls() {
        let html = format_message_html("<b>hi</b> https://a.io/?q=1&r=<x>");
        assert!(html.starts_with("<p>&lt;b&gt;hi&lt;/b&gt; "));
        assert!(html.contains(r#"href="https://a.io/?q=1&amp;r=&lt;x&gt;""#));
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn segments_mirror_markup() {
        let paragraphs = format_message("go to https://example.com/listing/1 now\n\nthanks");
        assert_eq!(paragraphs.len(), 3);
        assert_eq!(
            paragraphs[0].segments,
            vec![
                Segment::Text("go to ".to_string()),
                Segment::Link("https://example.com/listing/1".to_string()),
                Segment::Text(" now".to_string()),
            ]
        );
        assert!(paragraphs[1].is_blank());
        assert_eq!(paragraphs[2].links().count(), 0);
    }

    #[test]
    fn adjacent_urls_and_line_edges() {
        let paragraphs = format_message("http://a.com http://b.com");
        let links: Vec<_> = paragraphs[0].links().collect();
        assert_eq!(links, vec!["http://a.com", "http://b.com"]);

        assert_eq!(format_message_html(""), "<p><br/></p>");
        assert_eq!(format_message_html("plain"), "<p>plain</p>");
    }

    #[test]
    fn scheme_without_host_text_is_not_a_link() {
        let paragraphs = format_message("ftp://nope.com and http:// alone");
        assert_eq!(paragraphs[0].links().count(), 0);
    }
}
