pub mod cleaner;
pub mod extract;

pub const TITLE_OPEN: &str = "<title>";
pub const TITLE_CLOSE: &str = "</title>";
pub const TEXT_OPEN: &str = "<text ";
pub const TEXT_CLOSE: &str = "</text>";

/// Byte offset just past the `>` that closes the first `<text ...>` tag.
pub fn text_start(body: &str) -> Option<usize> {
    let tag = body.find(TEXT_OPEN)?;
    let close = body[tag..].find('>')?;
    Some(tag + close + 1)
}

/// Markup between the `<text ...>` tag and the first `</text>`.
pub fn text_section(body: &str) -> Option<&str> {
    let start = text_start(body)?;
    let end = body.find(TEXT_CLOSE)?;
    body.get(start..end)
}

/// Cut `s` at the first `#` or `|`, whichever comes first.
pub fn strip_anchor_or_label(s: &str) -> &str {
    match s.find(|c: char| c == '#' || c == '|') {
        Some(i) => &s[..i],
        None => s,
    }
}
