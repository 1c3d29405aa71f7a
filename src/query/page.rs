//! One page of a paginated collection query.
//!
//! `Page<T>` implements `Deref<Target = [T]>`, so the page's items can be
//! iterated, indexed and counted directly:
//!
//! ```rust
//! use openalex::query::Page;
//!
//! let page = Page::new(vec!["W1", "W2"], 5, 2, 1);
//!
//! assert_eq!(page.len(), 2);
//! assert_eq!(page[0], "W1");
//! assert_eq!(page.last_page(), 3);
//! assert!(page.has_more_pages());
//! ```

use std::ops::{Deref, DerefMut};

/// Mapped items of one page plus the total count reported by the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    items: Vec<T>,
    /// `meta.count` of the response, 0 if absent.
    total: u64,
    per_page: u32,
    current_page: u32,
}

impl<T> Page<T> {
    #[must_use]
    pub const fn new(items: Vec<T>, total: u64, per_page: u32, current_page: u32) -> Self {
        Self {
            items,
            total,
            per_page,
            current_page,
        }
    }

    /// Total number of results across all pages.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    #[must_use]
    pub const fn per_page(&self) -> u32 {
        self.per_page
    }

    /// One-based page number.
    #[must_use]
    pub const fn current_page(&self) -> u32 {
        self.current_page
    }

    /// Number of the last page; at least 1, even for an empty result set.
    #[must_use]
    pub fn last_page(&self) -> u64 {
        if self.per_page == 0 {
            return 1;
        }
        self.total.div_ceil(u64::from(self.per_page)).max(1)
    }

    /// Returns `true` if pages after this one exist.
    #[must_use]
    pub fn has_more_pages(&self) -> bool {
        u64::from(self.current_page) < self.last_page()
    }

    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Maps the items, keeping the pagination metadata.
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            per_page: self.per_page,
            current_page: self.current_page,
        }
    }
}

impl<T> Deref for Page<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.items
    }
}

impl<T> DerefMut for Page<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.items
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Page<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Page<String>>();
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_page_rounds_up() {
        let page = Page::new(vec![1, 2], 100, 2, 3);
        assert_eq!(page.last_page(), 50);
        assert!(page.has_more_pages());

        let page = Page::new(vec![1], 5, 2, 3);
        assert_eq!(page.last_page(), 3);
        assert!(!page.has_more_pages());
    }

    #[test]
    fn test_empty_result_set_has_one_page() {
        let page: Page<i32> = Page::new(vec![], 0, 25, 1);
        assert_eq!(page.last_page(), 1);
        assert!(!page.has_more_pages());
        assert!(page.is_empty());
    }

    #[test]
    fn test_map_keeps_metadata() {
        let page = Page::new(vec![1, 2], 10, 2, 1).map(|n| n * 10);
        assert_eq!(page.items(), &[10, 20]);
        assert_eq!(page.total(), 10);
        assert_eq!(page.current_page(), 1);
    }

    #[test]
    fn test_into_iterator() {
        let page = Page::new(vec!["a", "b"], 2, 2, 1);
        let collected: Vec<_> = page.into_iter().collect();
        assert_eq!(collected, vec!["a", "b"]);
    }
}
