use std::borrow::Cow;

use crate::parser::cleaner;
use crate::parser::{text_section, text_start, TEXT_CLOSE};

const EXTERNAL_LINKS_HEADERS: [&str; 2] = ["External Links", "External links"];
const HEADING: &str = "==";

/// Cleaned page text without the external links line.
pub fn text(body: &str) -> String {
    let Some(section) = text_section(body) else {
        return String::new();
    };
    cleaner::clean(&drop_external_links(section))
}

/// Cleaned text from the start of the page text up to the first heading, or
/// to `</text>` when there is none.
pub fn abstract_text(body: &str) -> String {
    let Some(start) = text_start(body) else {
        return String::new();
    };
    let rest = &body[start..];
    match rest.find(HEADING).or_else(|| rest.find(TEXT_CLOSE)) {
        Some(end) => cleaner::clean(&rest[..end]),
        None => String::new(),
    }
}

/// Single pass: cut from the header to the end of its line.
fn drop_external_links(section: &str) -> Cow<'_, str> {
    let Some(at) = EXTERNAL_LINKS_HEADERS
        .iter()
        .find_map(|header| section.find(header))
    else {
        return Cow::Borrowed(section);
    };
    match section[at..].find('\n') {
        Some(nl) => Cow::Owned(format!("{}{}", &section[..at], &section[at + nl + 1..])),
        None => Cow::Borrowed(&section[..at]),
    }
}
