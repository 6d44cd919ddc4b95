//! Forward-only iteration over the pages of a dump with cached field access.
//!
//! Call [`Extractor::advance`] to load a page, then ask for the fields you
//! need. The plain accessors (`title()`, `links()`, ...) extract from the page
//! and cache the result; the `cached_*` accessors only return what is cached,
//! which is the default value right after an advance. Rendering with
//! different [`Separators`] works on the cached values:
//!
//! ```no_run
//! # fn main() -> wikidump::Result<()> {
//! let mut ex = wikidump::Extractor::open("enwiki-latest-pages-articles.xml")?;
//! while ex.advance() {
//!     let id = ex.title();
//!     ex.separators_mut().title = " ".into();
//!     let words = ex.cached_title();
//!     println!("{id} / {words}");
//!     ex.separators_mut().title = "_".into();
//! }
//! # Ok(())
//! # }
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::Deserialize;

use crate::cache::FieldCache;
use crate::dump::{self, LineSource, PageCursor, ReaderLines};
use crate::error::Result;
use crate::parser::extract::{
    body, categories, join_tokens, kind, links, render_words, title, ExtractedFields, PageType,
};

/// Delimiters used when rendering titles, categories and links.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Separators {
    /// Between words of a title.
    pub title: String,
    /// Between words of a category.
    pub category: String,
    /// Between categories.
    pub category_list: String,
    pub link: String,
    pub link_list: String,
}

impl Default for Separators {
    fn default() -> Self {
        Separators {
            title: "_".into(),
            category: "_".into(),
            category_list: " ".into(),
            link: "_".into(),
            link_list: " ".into(),
        }
    }
}

pub struct Extractor<S> {
    cursor: PageCursor<S>,
    cache: FieldCache,
    separators: Separators,
}

impl Extractor<ReaderLines<BufReader<File>>> {
    /// Open a dump file. This is the only fatal failure: everything that goes
    /// wrong afterwards ends the traversal or yields default field values.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(dump::open(path.as_ref())?))
    }
}

impl<R: BufRead> Extractor<ReaderLines<R>> {
    pub fn from_reader(reader: R) -> Self {
        Self::new(ReaderLines::new(reader))
    }
}

impl<S: LineSource> Extractor<S> {
    pub fn new(source: S) -> Self {
        Extractor {
            cursor: PageCursor::new(source),
            cache: FieldCache::default(),
            separators: Separators::default(),
        }
    }

    pub fn with_separators(mut self, separators: Separators) -> Self {
        self.separators = separators;
        self
    }

    /// Move to the next page and drop every cached field. `false` means the
    /// dump is exhausted or broken; the two are not distinguished.
    pub fn advance(&mut self) -> bool {
        let loaded = self.cursor.advance();
        self.cache.clear();
        loaded
    }

    /// Unprocessed markup of the current page.
    pub fn page_source(&self) -> &str {
        self.cursor.body()
    }

    pub fn separators(&self) -> &Separators {
        &self.separators
    }

    pub fn separators_mut(&mut self) -> &mut Separators {
        &mut self.separators
    }

    pub fn set_title_separator(&mut self, separator: impl Into<String>) {
        self.separators.title = separator.into();
    }

    pub fn set_category_separator(&mut self, separator: impl Into<String>) {
        self.separators.category = separator.into();
    }

    pub fn set_category_list_separator(&mut self, separator: impl Into<String>) {
        self.separators.category_list = separator.into();
    }

    pub fn set_link_separator(&mut self, separator: impl Into<String>) {
        self.separators.link = separator.into();
    }

    pub fn set_link_list_separator(&mut self, separator: impl Into<String>) {
        self.separators.link_list = separator.into();
    }

    // ── Title ──

    pub fn title(&mut self) -> String {
        let body = self.cursor.body();
        self.cache.title.recompute(|| title::extract(body));
        self.cached_title()
    }

    pub fn cached_title(&self) -> String {
        render_words(self.cache.title.get_cached(), &self.separators.title)
    }

    // ── Classification ──

    /// Also refreshes the cached title, which classification depends on.
    pub fn page_type(&mut self) -> PageType {
        let body = self.cursor.body();
        let title = self.cache.title.recompute(|| title::extract(body));
        let page_type = kind::classify(body, title);
        *self.cache.page_type.recompute(|| page_type)
    }

    pub fn cached_page_type(&self) -> PageType {
        *self.cache.page_type.get_cached()
    }

    pub fn is_stub(&mut self) -> bool {
        let body = self.cursor.body();
        *self.cache.is_stub.recompute(|| kind::is_stub(body))
    }

    pub fn cached_is_stub(&self) -> bool {
        *self.cache.is_stub.get_cached()
    }

    // ── Categories ──

    pub fn category_list(&mut self) -> &[String] {
        let body = self.cursor.body();
        self.cache.categories.recompute(|| categories::extract(body))
    }

    pub fn cached_category_list(&self) -> &[String] {
        self.cache.categories.get_cached()
    }

    pub fn categories(&mut self) -> String {
        self.category_list();
        self.cached_categories()
    }

    pub fn cached_categories(&self) -> String {
        join_tokens(
            self.cache.categories.get_cached(),
            &self.separators.category,
            &self.separators.category_list,
        )
    }

    // ── Links ──

    pub fn link_list(&mut self) -> &[String] {
        let body = self.cursor.body();
        self.cache.links.recompute(|| links::extract(body))
    }

    pub fn cached_link_list(&self) -> &[String] {
        self.cache.links.get_cached()
    }

    pub fn links(&mut self) -> String {
        self.link_list();
        self.cached_links()
    }

    pub fn cached_links(&self) -> String {
        join_tokens(
            self.cache.links.get_cached(),
            &self.separators.link,
            &self.separators.link_list,
        )
    }

    // ── Text ──

    pub fn text(&mut self) -> &str {
        let body = self.cursor.body();
        self.cache.text.recompute(|| body::text(body))
    }

    pub fn cached_text(&self) -> &str {
        self.cache.text.get_cached()
    }

    pub fn abstract_text(&mut self) -> &str {
        let body = self.cursor.body();
        self.cache.abstract_text.recompute(|| body::abstract_text(body))
    }

    pub fn cached_abstract_text(&self) -> &str {
        self.cache.abstract_text.get_cached()
    }

    /// Extract every field of the current page.
    pub fn fields(&mut self) -> ExtractedFields {
        let page_type = self.page_type();
        let is_stub = self.is_stub();
        ExtractedFields {
            title: self.cache.title.get_cached().clone(),
            page_type,
            is_stub,
            categories: self.category_list().to_vec(),
            links: self.link_list().to_vec(),
            text: self.text().to_string(),
            abstract_text: self.abstract_text().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const DUMP: &str = r#"<mediawiki>
  <page>
    <title>Foo Bar</title>
    <revision>
      <text xml:space="preserve">'''Foo Bar''' is a [[Paris|place]] near [[Lyon]] and [[Paris]]. == History == Old.
[[Category:Living people]] [[Category:French poets|Hugo]] {{France-geo-stub}}</text>
    </revision>
  </page>
  <page>
    <title>Template:Infobox</title>
    <redirect />
    <text xml:space="preserve">#REDIRECT [[Template:Box]]</text>
  </page>
</mediawiki>
"#;

    fn extractor() -> Extractor<ReaderLines<Cursor<&'static [u8]>>> {
        Extractor::from_reader(Cursor::new(DUMP.as_bytes()))
    }

    #[test]
    fn nothing_loaded_before_advance() {
        let mut ex = extractor();
        assert_eq!(ex.page_source(), "");
        assert_eq!(ex.title(), "");
        assert_eq!(ex.page_type(), PageType::Unknown);
    }

    #[test]
    fn title_rendering() {
        let mut ex = extractor();
        assert!(ex.advance());
        assert_eq!(ex.title(), "Foo_Bar");
        ex.set_title_separator(" ");
        assert_eq!(ex.cached_title(), "Foo Bar");
    }

    #[test]
    fn cached_is_empty_until_computed() {
        let mut ex = extractor();
        assert!(ex.advance());
        assert_eq!(ex.cached_title(), "");
        assert_eq!(ex.cached_text(), "");
        assert!(ex.cached_link_list().is_empty());
        assert!(!ex.cached_is_stub());
    }

    #[test]
    fn text_then_cached_text_match() {
        let mut ex = extractor();
        assert!(ex.advance());
        let fresh = ex.text().to_string();
        assert!(!fresh.is_empty());
        assert_eq!(ex.cached_text(), fresh);
    }

    #[test]
    fn advance_clears_cache() {
        let mut ex = extractor();
        assert!(ex.advance());
        ex.title();
        ex.links();
        assert!(ex.advance());
        assert_eq!(ex.cached_title(), "");
        assert!(ex.cached_link_list().is_empty());
        assert_eq!(ex.title(), "Template:Infobox");
    }

    #[test]
    fn page_type_refreshes_title() {
        let mut ex = extractor();
        assert!(ex.advance());
        assert_eq!(ex.page_type(), PageType::Article);
        assert_eq!(ex.cached_title(), "Foo_Bar");
        assert!(ex.advance());
        assert_eq!(ex.page_type(), PageType::Redirect);
        assert_eq!(ex.cached_page_type(), PageType::Redirect);
    }

    #[test]
    fn stub_independent_of_type() {
        let mut ex = extractor();
        assert!(ex.advance());
        assert_eq!(ex.page_type(), PageType::Article);
        assert!(ex.is_stub());
    }

    #[test]
    fn separators_only_change_rendering() {
        let mut ex = extractor();
        assert!(ex.advance());
        assert_eq!(ex.categories(), "Living_people French_poets");
        ex.set_category_list_separator("|");
        assert_eq!(ex.cached_categories(), "Living_people|French_poets");
        assert_eq!(ex.cached_category_list(), ["Living people", "French poets"]);
    }

    #[test]
    fn links_deduplicated() {
        let mut ex = extractor();
        assert!(ex.advance());
        assert_eq!(ex.link_list(), ["Paris", "Lyon"]);
        ex.set_link_separator(" ");
        ex.set_link_list_separator(",");
        assert_eq!(ex.cached_links(), "Paris,Lyon");
    }

    #[test]
    fn abstract_stops_at_heading() {
        let mut ex = extractor();
        assert!(ex.advance());
        let words: Vec<_> = ex.abstract_text().split_whitespace().collect();
        assert_eq!(words, ["Foo", "Bar", "is", "a", "place", "near", "Lyon", "and", "Paris"]);
    }

    #[test]
    fn fields_snapshot() {
        let mut ex = extractor();
        assert!(ex.advance());
        let f = ex.fields();
        assert_eq!(f.title, "Foo Bar");
        assert_eq!(f.page_type, PageType::Article);
        assert!(f.is_stub);
        assert_eq!(f.links, ["Paris", "Lyon"]);
        assert!(ex.advance());
        assert!(!ex.advance());
        assert_eq!(ex.fields(), ExtractedFields::default());
    }
}
