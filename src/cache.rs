use crate::parser::extract::PageType;

/// Last computed value of one field and whether it was computed since the
/// last page advance.
#[derive(Debug, Clone, Default)]
pub struct Memo<T> {
    value: T,
    fresh: bool,
}

impl<T: Default> Memo<T> {
    /// Cached value, or the default when nothing was computed for this page.
    pub fn get_cached(&self) -> &T {
        &self.value
    }

    pub fn recompute(&mut self, f: impl FnOnce() -> T) -> &T {
        self.value = f();
        self.fresh = true;
        &self.value
    }

    pub fn is_fresh(&self) -> bool {
        self.fresh
    }

    pub fn reset(&mut self) {
        self.value = T::default();
        self.fresh = false;
    }
}

/// Every derived field of the current page.
#[derive(Debug, Default)]
pub struct FieldCache {
    pub title: Memo<String>,
    pub page_type: Memo<PageType>,
    pub is_stub: Memo<bool>,
    pub categories: Memo<Vec<String>>,
    pub links: Memo<Vec<String>>,
    pub text: Memo<String>,
    pub abstract_text: Memo<String>,
}

impl FieldCache {
    pub fn clear(&mut self) {
        self.title.reset();
        self.page_type.reset();
        self.is_stub.reset();
        self.categories.reset();
        self.links.reset();
        self.text.reset();
        self.abstract_text.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cached_is_default_until_computed() {
        let m: Memo<String> = Memo::default();
        assert_eq!(m.get_cached(), "");
        assert!(!m.is_fresh());
    }

    #[test]
    fn recompute_overwrites() {
        let mut m = Memo::default();
        m.recompute(|| 3u8);
        assert_eq!(*m.recompute(|| 7u8), 7);
        assert_eq!(*m.get_cached(), 7);
        assert!(m.is_fresh());
    }

    #[test]
    fn clear_resets_every_field() {
        let mut c = FieldCache::default();
        c.title.recompute(|| "T".into());
        c.page_type.recompute(|| PageType::Article);
        c.links.recompute(|| vec!["a".into()]);
        c.clear();
        assert_eq!(c.title.get_cached(), "");
        assert_eq!(*c.page_type.get_cached(), PageType::Unknown);
        assert!(c.links.get_cached().is_empty());
        assert!(!c.title.is_fresh());
    }
}
