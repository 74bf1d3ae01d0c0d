//! Page index/size bookkeeping.

use crate::constants::DEFAULT_PAGE_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page_index: usize,
    pub page_size: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Pagination {
    /// A zero page size is bumped to one.
    pub fn new(page_size: usize) -> Self {
        Self {
            page_index: 0,
            page_size: page_size.max(1),
        }
    }

    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_size)
    }

    pub fn can_previous(&self) -> bool {
        self.page_index > 0
    }

    pub fn can_next(&self, total: usize) -> bool {
        self.page_index + 1 < self.page_count(total)
    }

    /// Moves to `index`, clamped to the last existing page.
    pub fn set_page_index(&mut self, index: usize, total: usize) {
        let last = self.page_count(total).saturating_sub(1);
        self.page_index = index.min(last);
    }

    /// Changes the page size and returns to the first page.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.page_index = 0;
    }

    /// Index range of the current page within `total` rows.
    pub fn range(&self, total: usize) -> std::ops::Range<usize> {
        let start = (self.page_index * self.page_size).min(total);
        let end = (start + self.page_size).min(total);
        start..end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_count_and_navigation_bounds() {
        let mut pages = Pagination::new(10);
        assert_eq!(pages.page_count(0), 0);
        assert_eq!(pages.page_count(25), 3);
        assert!(!pages.can_previous());
        assert!(pages.can_next(25));
        assert!(!pages.can_next(0));

        pages.set_page_index(7, 25);
        assert_eq!(pages.page_index, 2);
        assert!(!pages.can_next(25));
        assert_eq!(pages.range(25), 20..25);
    }

    #[test]
    fn changing_page_size_resets_index() {
        let mut pages = Pagination::new(10);
        pages.set_page_index(2, 50);
        pages.set_page_size(25);
        assert_eq!(pages.page_index, 0);
        assert_eq!(pages.range(50), 0..25);
    }
}
