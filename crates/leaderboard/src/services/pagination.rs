use crate::dto::common::{Page, PageWindow};
use crate::error::{LeaderboardError, Result};

/// `ceil(total_items / size)`; a size of zero counts as one.
pub fn total_pages(total_items: usize, size: usize) -> usize {
    total_items.div_ceil(size.max(1))
}

/// Clamps a 1-based page number into `1..=max(1, total_pages)`.
pub fn clamp_page(index: usize, total_pages: usize) -> usize {
    index.clamp(1, total_pages.max(1))
}

/// 1-based page holding the item at a zero-based absolute index.
pub fn find_page_for_index(absolute_index: usize, size: usize) -> usize {
    absolute_index / size.max(1) + 1
}

/// Slices one page out of `items`.
///
/// Out-of-range page numbers are clamped to the nearest valid page and
/// logged, never rejected.
pub fn paginate<T: Clone>(items: &[T], index: usize, size: usize) -> Page<T> {
    let size = size.max(1);
    let total_items = items.len();
    let total_pages = total_pages(total_items, size);
    let clamped = clamp_page(index, total_pages);

    if clamped != index {
        tracing::warn!(
            requested = index,
            page = clamped,
            total_pages,
            "Page out of range, clamping"
        );
    }

    let start = ((clamped - 1) * size).min(total_items);
    let end = (start + size).min(total_items);

    Page {
        items: items[start..end].to_vec(),
        index: clamped,
        size,
        total_items,
        total_pages,
        start_index: start,
        end_index: end,
        has_next: clamped < total_pages,
        has_prev: clamped > 1,
    }
}

/// Up to `max_buttons` consecutive page numbers centred on `current`,
/// plus whether page 1 and the last page need their own buttons.
pub fn page_window(current: usize, total_pages: usize, max_buttons: usize) -> PageWindow {
    if total_pages == 0 {
        return PageWindow::default();
    }

    let max_buttons = max_buttons.max(1);
    let current = clamp_page(current, total_pages);

    let mut start = current.saturating_sub(max_buttons / 2).max(1);
    let end = (start + max_buttons - 1).min(total_pages);
    if end - start < max_buttons - 1 {
        start = (end + 1).saturating_sub(max_buttons).max(1);
    }

    PageWindow {
        pages: (start..=end).collect(),
        show_first: start > 1,
        leading_ellipsis: start > 2,
        show_last: end < total_pages,
        trailing_ellipsis: end + 1 < total_pages,
    }
}

/// Stateful pager over an owned collection with a fixed page size.
#[derive(Debug, Clone)]
pub struct Paginator<T> {
    items: Vec<T>,
    page_size: usize,
    current_page: usize,
}

impl<T: Clone> Paginator<T> {
    pub fn new(page_size: usize) -> Result<Self> {
        if page_size == 0 {
            return Err(LeaderboardError::InvalidPageSize(page_size));
        }
        Ok(Self {
            items: Vec::new(),
            page_size,
            current_page: 1,
        })
    }

    /// Replaces the data and resets to page 1.
    pub fn set_data(&mut self, items: Vec<T>) {
        self.items = items;
        self.current_page = 1;
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.items.len(), self.page_size)
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn get_page(&self, index: usize, size: usize) -> Page<T> {
        paginate(&self.items, index, size)
    }

    pub fn current(&self) -> Page<T> {
        self.get_page(self.current_page, self.page_size)
    }

    /// Moves to `page`, which must exist.
    pub fn go_to_page(&mut self, page: usize) -> Result<Page<T>> {
        let total = self.total_pages();
        if page < 1 || page > total {
            return Err(LeaderboardError::InvalidPagination(format!(
                "page {page} is outside 1..={total}"
            )));
        }
        self.current_page = page;
        Ok(self.current())
    }

    /// Advances one page; false when already on the last page.
    pub fn next_page(&mut self) -> bool {
        if self.current_page < self.total_pages() {
            self.current_page += 1;
            true
        } else {
            false
        }
    }

    pub fn prev_page(&mut self) -> bool {
        if self.current_page > 1 {
            self.current_page -= 1;
            true
        } else {
            false
        }
    }

    /// Page holding the first item that matches, or 1 when none does.
    pub fn find_page_for<P>(&self, predicate: P) -> usize
    where
        P: FnMut(&T) -> bool,
    {
        self.items
            .iter()
            .position(predicate)
            .map(|index| find_page_for_index(index, self.page_size))
            .unwrap_or(1)
    }

    pub fn window(&self, max_buttons: usize) -> PageWindow {
        page_window(self.current_page, self.total_pages(), max_buttons)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(n: usize) -> Vec<usize> {
        (0..n).collect()
    }

    #[test]
    fn test_first_page() {
        let page = paginate(&items(250), 1, 100);
        assert_eq!(page.items.len(), 100);
        assert_eq!(page.items[0], 0);
        assert_eq!(page.items[99], 99);
        assert_eq!(page.total_pages, 3);
        assert_eq!((page.start_index, page.end_index), (0, 100));
        assert!(page.has_next);
        assert!(!page.has_prev);
    }

    #[test]
    fn test_out_of_range_page_is_clamped() {
        let page = paginate(&items(250), 4, 100);
        assert_eq!(page.index, 3);
        assert_eq!(page.items, (200..250).collect::<Vec<_>>());
        assert!(!page.has_next);

        assert_eq!(paginate(&items(250), 0, 100).index, 1);
    }

    #[test]
    fn test_empty_collection() {
        let page = paginate::<u8>(&[], 7, 100);
        assert_eq!(page.index, 1);
        assert_eq!(page.total_pages, 0);
        assert!(page.is_empty());
        assert!(!page.has_next && !page.has_prev);
    }

    #[test]
    fn test_zero_size_counts_as_one() {
        let page = paginate(&items(3), 2, 0);
        assert_eq!(page.size, 1);
        assert_eq!(page.items, vec![1]);
    }

    #[test]
    fn test_find_page_for_index() {
        assert_eq!(find_page_for_index(150, 100), 2);
        assert_eq!(find_page_for_index(0, 100), 1);
        assert_eq!(find_page_for_index(99, 100), 1);
        assert_eq!(find_page_for_index(100, 100), 2);
    }

    #[test]
    fn test_page_window() {
        assert_eq!(page_window(1, 1, 5).pages, vec![1]);
        assert_eq!(page_window(1, 3, 5).pages, vec![1, 2, 3]);

        let window = page_window(10, 20, 5);
        assert_eq!(window.pages, vec![8, 9, 10, 11, 12]);
        assert!(window.show_first && window.leading_ellipsis);
        assert!(window.show_last && window.trailing_ellipsis);

        let window = page_window(20, 20, 5);
        assert_eq!(window.pages, vec![16, 17, 18, 19, 20]);
        assert!(!window.show_last);

        let window = page_window(2, 6, 5);
        assert_eq!(window.pages, vec![1, 2, 3, 4, 5]);
        assert!(!window.show_first);
        assert!(window.show_last && !window.trailing_ellipsis);

        assert_eq!(page_window(1, 0, 5), PageWindow::default());
    }

    #[test]
    fn test_paginator_navigation() {
        let mut pager = Paginator::new(100).unwrap();
        pager.set_data(items(250));
        assert_eq!(pager.current_page(), 1);

        assert!(pager.next_page());
        assert!(pager.next_page());
        assert!(!pager.next_page());
        assert_eq!(pager.current().items.len(), 50);

        assert!(pager.go_to_page(4).is_err());
        assert_eq!(pager.go_to_page(2).unwrap().start_index, 100);
        assert!(pager.prev_page());
        assert!(!pager.prev_page());

        pager.set_data(items(10));
        assert_eq!(pager.current_page(), 1);
    }

    #[test]
    fn test_paginator_rejects_zero_page_size() {
        assert!(matches!(
            Paginator::<u8>::new(0),
            Err(LeaderboardError::InvalidPageSize(0))
        ));
    }

    #[test]
    fn test_find_page_for() {
        let mut pager = Paginator::new(100).unwrap();
        pager.set_data(items(250));
        assert_eq!(pager.find_page_for(|n| *n == 150), 2);
        assert_eq!(pager.find_page_for(|n| *n == 999), 1);
    }
}
