//! Turning page markup into plain, line-oriented text.

use html_escape::decode_html_entities;
use scraper::{ElementRef, Html, Node};

/// Elements whose start or end breaks the line.
const BLOCK_TAGS: &[&str] = &[
    "p", "div", "ul", "ol", "h1", "h2", "h3", "h4", "h5", "h6", "tr", "td", "th", "table",
    "section", "article", "header", "footer", "main", "aside", "nav", "form", "blockquote",
    "pre", "dt", "dd", "figure", "figcaption", "title", "hr",
];

/// Elements dropped together with their content.
const SKIPPED_TAGS: &[&str] = &["script", "style", "noscript", "svg", "template", "iframe"];

pub fn decode_html_symbols(text: &str) -> String {
    // for some reason need to decode twice to get the correct string
    decode_html_entities(&decode_html_entities(text)).into_owned()
}

pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Text content of a markup snippet, tags removed.
pub fn fragment_text(raw: &str) -> String {
    let fragment = Html::parse_fragment(raw);
    let text = fragment.root_element().text().collect::<String>();
    collapse_whitespace(&text)
}

/// Lines of a markup snippet such as a JSON-LD instruction string.
///
/// Block elements and `<br>` separate lines; list items get no bullet.
pub fn fragment_lines(raw: &str) -> Vec<String> {
    let fragment = Html::parse_fragment(raw);
    let mut writer = LineWriter::new(false);
    writer.walk(fragment.root_element());
    writer.into_lines()
}

/// Convert a parsed page to trimmed, non-empty lines.
///
/// Block elements and `<br>` become line breaks, `<li>` starts a `- ` bullet,
/// and scripts/styles disappear. Text keeps its own newlines, so plain text
/// and markdown split the same way they were written.
pub fn document_lines(document: &Html) -> Vec<String> {
    let mut writer = LineWriter::new(true);
    writer.walk(document.root_element());
    writer.into_lines()
}

struct LineWriter {
    text: String,
    bullets: bool,
    // set at `<li>` until the item's first text arrives
    pending_bullet: bool,
}

impl LineWriter {
    fn new(bullets: bool) -> Self {
        LineWriter {
            text: String::new(),
            bullets,
            pending_bullet: false,
        }
    }

    fn walk(&mut self, element: ElementRef) {
        for child in element.children() {
            match child.value() {
                Node::Text(text) => self.push_text(text),
                Node::Element(_) => {
                    if let Some(child) = ElementRef::wrap(child) {
                        self.element(child);
                    }
                }
                _ => {}
            }
        }
    }

    fn element(&mut self, element: ElementRef) {
        let name = element.value().name();
        if SKIPPED_TAGS.contains(&name) {
            return;
        }

        match name {
            "br" => self.text.push('\n'),
            "li" => {
                self.text.push('\n');
                self.pending_bullet = self.bullets;
                self.walk(element);
                self.pending_bullet = false;
                self.text.push('\n');
            }
            name if BLOCK_TAGS.contains(&name) => {
                self.text.push('\n');
                self.walk(element);
                self.text.push('\n');
            }
            _ => self.walk(element),
        }
    }

    fn push_text(&mut self, text: &str) {
        if !self.pending_bullet {
            self.text.push_str(text);
            return;
        }
        let text = text.trim_start();
        if text.is_empty() {
            return;
        }
        self.text.push_str("- ");
        self.text.push_str(text);
        self.pending_bullet = false;
    }

    fn into_lines(self) -> Vec<String> {
        // parsing decodes entities once; double-encoded pages need one more pass
        decode_html_entities(&self.text)
            .lines()
            .map(collapse_whitespace)
            .filter(|line| !line.is_empty())
            .collect()
    }
}
