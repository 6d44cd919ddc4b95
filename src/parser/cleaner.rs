//! Markup cleaner: lossy rewrite of wiki markup into a flat run of ASCII
//! letters, digits and spaces for indexing.
//!
//! The rewrites are applied in a fixed order and each one sees the output of
//! the previous one. None of them understands nesting: `{{a {{b}} c}}` loses
//! only `{{a {{b}}`.

use std::sync::LazyLock;

use regex::Regex;

/// Private-use code points standing in for tag delimiters while tag spans are
/// removed. They never occur in dump text.
const OPEN: &str = "\u{E000}";
const CLOSE: &str = "\u{E001}";

static TEMPLATE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{\{[^}]*\}\}").unwrap());
static NAMESPACED_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[[^\]]+:[^\]]+\]\]").unwrap());
static SENTINEL_SPAN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x{E000}[^\x{E001}]*\x{E001}").unwrap());
static PIPED_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[[^\]]+\|([^\]]+)\]\]").unwrap());
static SECTION_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[[^\]]+#([^\]]+)\]\]").unwrap());
static PLAIN_LINK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[\[([^\]]*)\]\]").unwrap());
static EXTERNAL_LINK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[http[^\]]*\]").unwrap());
static ENTITY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"&[^&]*;").unwrap());

const HEADINGS: [&str; 4] = ["=====", "====", "===", "=="];
const EMPHASIS: [&str; 4] = ["'''''", "''''", "'''", "''"];

/// Run the full pipeline.
pub fn clean(markup: &str) -> String {
    let s = strip_templates(markup);
    let s = strip_namespaced_links(&s);
    let s = strip_tags(&s);
    let s = unwrap_links(&s);
    let s = strip_external_links(&s);
    let s = strip_markers(&s);
    let s = decode_entities(&s);
    flatten(&s)
}

pub fn strip_templates(s: &str) -> String {
    TEMPLATE_RE.replace_all(s, " ").into_owned()
}

/// `[[en:Foo]]`, `[[File:x.jpg]]` and the like.
pub fn strip_namespaced_links(s: &str) -> String {
    NAMESPACED_LINK_RE.replace_all(s, " ").into_owned()
}

/// Remove encoded references, `<math>` blocks and any other encoded tag.
pub fn strip_tags(s: &str) -> String {
    let s = s
        .replace("&lt;ref", OPEN)
        .replace("/ref&gt;", CLOSE)
        .replace("<math>", OPEN)
        .replace("</math>", CLOSE);
    strip_encoded_tags(&s)
}

/// Replace every encoded `&lt;...&gt;` span with a space.
pub fn strip_encoded_tags(s: &str) -> String {
    let s = s.replace("&lt;", OPEN).replace("&gt;", CLOSE);
    SENTINEL_SPAN_RE.replace_all(&s, " ").into_owned()
}

/// `[[a|b]]` → `b`, `[[a#b]]` → `b`, `[[a]]` → `a`.
pub fn unwrap_links(s: &str) -> String {
    let s = PIPED_LINK_RE.replace_all(s, " ${1} ");
    let s = SECTION_LINK_RE.replace_all(&s, " ${1} ");
    PLAIN_LINK_RE.replace_all(&s, " ${1} ").into_owned()
}

pub fn strip_external_links(s: &str) -> String {
    EXTERNAL_LINK_RE.replace_all(s, " ").into_owned()
}

/// Heading and bold/italic runs, longest first.
pub fn strip_markers(s: &str) -> String {
    HEADINGS
        .iter()
        .chain(EMPHASIS.iter())
        .fold(s.to_string(), |acc, marker| acc.replace(*marker, " "))
}

pub fn decode_entities(s: &str) -> String {
    let s = s
        .replace("&quot;", " ")
        .replace("&amp;", " and ")
        .replace("&ndash;", "-");
    ENTITY_RE.replace_all(&s, " ").into_owned()
}

/// Everything outside `[A-Za-z0-9]` becomes a space.
pub fn flatten(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { ' ' })
        .collect()
}
