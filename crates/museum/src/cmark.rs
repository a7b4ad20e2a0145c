//! Useful utilities for rendering CommonMark text found in journey data.

use pulldown_cmark::{html, Options, Parser};

fn options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);

    options
}

/// Render a CommonMark string into an HTML fragment.
pub fn to_html(source: &str) -> String {
    let parser = Parser::new_ext(source, options());
    let mut buffer = String::with_capacity(source.len() * 3 / 2);
    html::push_html(&mut buffer, parser);

    buffer
}
