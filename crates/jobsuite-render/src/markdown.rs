//! Markdown to HTML conversion.

use pulldown_cmark::{Options, Parser, html};

/// Render CommonMark to an HTML fragment.
#[must_use]
pub fn to_html(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, Options::empty());
    let mut out = String::with_capacity(markdown.len() * 2);
    html::push_html(&mut out, parser);
    out
}
