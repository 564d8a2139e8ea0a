//! Plain-text to HTML formatter
//!
//! The spreadsheet holds review bodies as plain text with a constrained
//! markup: `**Título**` marks a section heading, a single line break is a
//! soft break, a blank line separates paragraphs.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// `**…**` section headings, non-greedy so two headings on one line work
    static ref HEADING_RE: Regex = Regex::new(r"\*\*(.*?)\*\*").unwrap();
    /// A blank source line after break conversion: two or more `<br>` in a row
    static ref BREAK_RUN_RE: Regex = Regex::new(r"(<br>){2,}").unwrap();
}

/// Convert the constrained plain text of a review body into an HTML fragment.
///
/// Rules, applied in order: `**…**` becomes an `<h3>`, every line break
/// becomes `<br>`, a run of two or more `<br>` becomes a paragraph break,
/// and the whole result is wrapped in `<p>…</p>` unless it already starts
/// with a paragraph or heading tag.
///
/// A heading directly next to a blank line produces an empty paragraph pair;
/// that is long-standing behavior the site's stylesheet tolerates, so it is
/// kept rather than corrected.
pub fn format_text(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let html = HEADING_RE.replace_all(raw, "<h3>$1</h3>");
    let html = html.replace('\n', "<br>");
    let mut html = BREAK_RUN_RE.replace_all(&html, "</p><p>").into_owned();

    if !html.starts_with("<p>") && !html.starts_with("<h") {
        html = format!("<p>{}", html);
    }
    if !html.ends_with("</p>") {
        html.push_str("</p>");
    }

    html
}
