//! HTML rendering of parsed lines.

use crate::parser::ParseContext;

/// Markup appended to every rendered line.
pub const LINE_BREAK: &str = "<br/>";

/// Escape text for inclusion in an HTML body.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Render the final context of a line as one HTML chunk.
#[must_use]
pub fn render_line(context: &ParseContext) -> String {
    format!("{}{LINE_BREAK}", escape_html(&context.line))
}
