//! HTML pages served by the search front end.

use std::fmt::Write as _;

use crate::search::{escape_html, Chunk, SearchParams};

/// Size of the whitespace padding sent first: some browsers only start
/// rendering a chunked body after the first kilobyte.
pub const LEAD_IN_LEN: usize = 1024;

/// Whitespace padding that opens every streamed response.
#[must_use]
pub fn lead_in() -> String {
    " ".repeat(LEAD_IN_LEN)
}

/// Markup sent when the search process has finished.
pub const DONE_MARKER: &str = concat!(
    r#"<hr><p id="done">Done</p>"#,
    r#"<script>document.getElementById("spinner").style.display = "none";</script>"#,
    "</body></html>",
);

const HEAD: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>loggrep</title>
<style>
body { font-family: monospace; }
#results { white-space: pre-wrap; }
</style>
</head>
<body>
"#;

fn search_form(out: &mut String, files: &[String], params: &SearchParams) {
    let selected = params.file.as_deref().unwrap_or_default();
    out.push_str(r#"<form action="/search" method="get"><select name="file">"#);
    for file in files {
        let file = escape_html(file);
        let attr = if file == escape_html(selected) {
            " selected"
        } else {
            ""
        };
        let _ = write!(out, r#"<option value="{file}"{attr}>{file}</option>"#);
    }
    let _ = write!(
        out,
        r#"</select> <input name="q" value="{}" placeholder="query"> <input name="shop" value="{}" placeholder="shop filter"> <input type="submit" value="Search"></form>"#,
        escape_html(params.q.as_deref().unwrap_or_default()),
        escape_html(params.shop.as_deref().unwrap_or_default()),
    );
}

/// Landing page with the search form.
#[must_use]
pub fn welcome_page(files: &[String]) -> String {
    let mut out = String::from(HEAD);
    out.push_str("<h1>Log search</h1>\n");
    if files.is_empty() {
        out.push_str("<p>No log files are configured.</p>\n");
    }
    search_form(&mut out, files, &SearchParams::default());
    out.push_str("\n</body></html>");
    out
}

/// Opening of the streamed results page; lines are appended after it.
#[must_use]
pub fn results_header(files: &[String], params: &SearchParams) -> String {
    let mut out = String::from(HEAD);
    search_form(&mut out, files, params);
    let _ = write!(
        out,
        "\n<h2>Results for {} in {}</h2>\n<p id=\"spinner\">Searching&hellip;</p>\n<div id=\"results\">\n",
        escape_html(params.q.as_deref().unwrap_or_default()),
        escape_html(params.file.as_deref().unwrap_or_default()),
    );
    out
}

/// Page shown for a rejected or failed search.
#[must_use]
pub fn error_page(message: &str) -> String {
    let mut out = String::from(HEAD);
    let _ = write!(
        out,
        "<h1>Search failed</h1>\n<p class=\"error\">{}</p>\n<p><a href=\"/\">Back</a></p>\n</body></html>",
        escape_html(message)
    );
    out
}

/// Body text for one streamed chunk.
#[must_use]
pub fn chunk_markup(chunk: Chunk) -> String {
    match chunk {
        Chunk::Content(html) => html,
        Chunk::Complete => format!("</div>{DONE_MARKER}"),
    }
}
