use super::PageType;

/// Older dumps write `<redirect />`, newer ones carry the target as an
/// attribute.
const REDIRECT_MARKERS: [&str; 2] = ["<redirect />", "<redirect title="];
const DISAMBIGUATION_TEMPLATES: [&str; 2] = ["{{disambig}}", "{{Disambig}}"];
const DISAMBIGUATION_SUFFIX: &str = "(disambiguation)";
const STUB_MARKER: &str = "-stub}}";

const NAMESPACES: [(&str, PageType); 5] = [
    ("Wikipedia:", PageType::Wikipedia),
    ("File:", PageType::File),
    ("Template:", PageType::Template),
    ("Category:", PageType::Category),
    ("Portal:", PageType::Portal),
];

/// Classify a page. Checks run in priority order and the first hit wins, so
/// a redirect is a redirect whatever namespace its title is in.
pub fn classify(body: &str, title: &str) -> PageType {
    if body.is_empty() || title.is_empty() {
        return PageType::Unknown;
    }
    if REDIRECT_MARKERS.iter().any(|m| body.contains(m)) {
        return PageType::Redirect;
    }
    if let Some((_, kind)) = NAMESPACES.iter().find(|(prefix, _)| title.starts_with(prefix)) {
        return *kind;
    }
    if title.ends_with(DISAMBIGUATION_SUFFIX)
        || DISAMBIGUATION_TEMPLATES.iter().any(|m| body.contains(m))
    {
        return PageType::Disambiguation;
    }
    PageType::Article
}

pub fn is_stub(body: &str) -> bool {
    body.contains(STUB_MARKER)
}
