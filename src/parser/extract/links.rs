use std::collections::HashSet;

use super::{LINK_CLOSE, LINK_OPEN};
use crate::parser::cleaner::strip_encoded_tags;
use crate::parser::{strip_anchor_or_label, text_section};

const QUOTE: &str = "&quot;";

/// Article links inside the page text, first occurrence only.
///
/// Any segment after `[[` that contains a colon is skipped, which drops
/// file, namespace and interlanguage links (and, since the check covers the
/// text up to the next `[[`, the occasional plain link followed by a colon).
pub fn extract(body: &str) -> Vec<String> {
    let Some(section) = text_section(body) else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for segment in section.split(LINK_OPEN).skip(1) {
        if segment.contains(':') {
            continue;
        }
        let Some(end) = segment.find(LINK_CLOSE) else {
            continue;
        };
        let link = clean_target(strip_anchor_or_label(&segment[..end]));
        if seen.insert(link.clone()) {
            links.push(link);
        }
    }

    links
}

fn clean_target(target: &str) -> String {
    let target = if target.contains("&lt;") {
        strip_encoded_tags(target)
    } else {
        target.to_string()
    };
    match quoted_span(&target) {
        Some(span) => span.to_string(),
        None => target,
    }
}

/// First `&quot;...&quot;` span, quotes included.
fn quoted_span(s: &str) -> Option<&str> {
    let start = s.find(QUOTE)?;
    let after = start + QUOTE.len();
    let end = s[after..].find(QUOTE)? + after + QUOTE.len();
    Some(&s[start..end])
}
