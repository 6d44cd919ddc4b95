pub mod body;
pub mod categories;
pub mod kind;
pub mod links;
pub mod title;

use std::fmt;

use serde::Serialize;

pub const LINK_OPEN: &str = "[[";
pub const LINK_CLOSE: &str = "]]";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum PageType {
    /// Not determined yet, or the page has no body or title.
    #[default]
    Unknown,
    Article,
    Redirect,
    Disambiguation,
    Wikipedia,
    File,
    Template,
    Category,
    Portal,
}

impl PageType {
    pub const ALL: [PageType; 9] = [
        PageType::Unknown,
        PageType::Article,
        PageType::Redirect,
        PageType::Disambiguation,
        PageType::Wikipedia,
        PageType::File,
        PageType::Template,
        PageType::Category,
        PageType::Portal,
    ];
}

impl fmt::Display for PageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Snapshot of every field of one page.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExtractedFields {
    pub title: String,
    pub page_type: PageType,
    pub is_stub: bool,
    pub categories: Vec<String>,
    pub links: Vec<String>,
    pub text: String,
    pub abstract_text: String,
}

/// Swap the spaces inside a title, category or link for `separator`.
pub fn render_words(token: &str, separator: &str) -> String {
    if separator == " " {
        token.to_string()
    } else {
        token.replace(' ', separator)
    }
}

/// Render tokens as one string: words joined by `word_sep`, tokens by
/// `list_sep`.
pub fn join_tokens(tokens: &[String], word_sep: &str, list_sep: &str) -> String {
    tokens
        .iter()
        .map(|t| render_words(t, word_sep))
        .collect::<Vec<_>>()
        .join(list_sep)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_words_uses_separator() {
        assert_eq!(render_words("Foo Bar Baz", "_"), "Foo_Bar_Baz");
        assert_eq!(render_words("Foo Bar", " "), "Foo Bar");
        assert_eq!(render_words("Foo Bar", ""), "FooBar");
    }

    #[test]
    fn join_tokens_no_trailing_separator() {
        let tokens = vec!["Living people".to_string(), "French poets".to_string()];
        assert_eq!(join_tokens(&tokens, "_", " "), "Living_people French_poets");
        assert_eq!(join_tokens(&tokens, "_", ", "), "Living_people, French_poets");
        assert_eq!(join_tokens(&[], "_", " "), "");
    }

    #[test]
    fn page_type_display() {
        assert_eq!(PageType::Disambiguation.to_string(), "Disambiguation");
    }
}
