//! Pagination window over an already-filtered record sequence.
//!
//! All functions are pure and defensive: malformed input (zero page size,
//! out-of-range pages) is clamped instead of propagated, because this logic
//! sits directly under UI rendering and must never take a screen down.

use serde::Serialize;

/// How many page-number controls are rendered around the current page.
const WINDOW_WIDTH: usize = 5;

/// Page size used by the listing screens unless a caller overrides it.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 10;

/// Number of pages needed to hold `count` items at `page_size` per page.
///
/// An empty sequence still has one (empty) page so that the invariant
/// `1 <= current_page <= total_pages` holds without special cases.
pub fn total_pages(count: usize, page_size: usize) -> usize {
    let page_size = page_size.max(1);
    count.div_ceil(page_size).max(1)
}

/// Returns the sub-slice visible on `page` (1-based).
///
/// A page beyond the available range yields an empty slice rather than an
/// error.
pub fn slice<T>(items: &[T], page_size: usize, page: usize) -> &[T] {
    let page_size = page_size.max(1);
    let page = page.max(1);

    let start = (page - 1).saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = (start + page_size).min(items.len());
    &items[start..end]
}

/// Computes the page numbers to render as navigation controls: up to five
/// contiguous pages centered on `current`, clamped to `[1, total]` and
/// shifted back to full width whenever `total` allows it.
pub fn visible_pages(total: usize, current: usize) -> Vec<usize> {
    let total = total.max(1);
    let current = current.clamp(1, total);

    let mut start = current.saturating_sub(2).max(1);
    let end = total.min(start + WINDOW_WIDTH - 1);
    if end - start < WINDOW_WIDTH - 1 {
        start = end.saturating_sub(WINDOW_WIDTH - 1).max(1);
    }

    (start..=end).collect()
}

/// Current-page state machine.
///
/// States are the integers `1..=total_pages`; `goto` outside that range is a
/// no-op, and a filter change that shrinks the page count below the current
/// page resets it to the first page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    current: usize,
    total: usize,
}

impl PageState {
    pub fn new(total: usize) -> Self {
        Self {
            current: 1,
            total: total.max(1),
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Moves to page `n` if it is within range, otherwise leaves the state
    /// unchanged.
    pub fn goto(&mut self, n: usize) {
        if (1..=self.total).contains(&n) {
            self.current = n;
        }
    }

    pub fn next(&mut self) {
        self.goto(self.current + 1);
    }

    pub fn prev(&mut self) {
        self.goto(self.current.saturating_sub(1));
    }

    /// Recomputes the page count after the filtered result changed. When the
    /// old current page no longer exists the state resets to page 1.
    pub fn on_filter_changed(&mut self, total: usize) {
        self.total = total.max(1);
        if self.current > self.total {
            self.current = 1;
        }
    }
}

/// A rendered page of records plus the navigation controls for it.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub pages: Vec<usize>,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, page: usize, total_pages: usize, total_items: usize) -> Self {
        let total_pages = total_pages.max(1);
        let page = page.clamp(1, total_pages);
        let pages = visible_pages(total_pages, page);

        Self {
            items,
            page,
            total_pages,
            total_items,
            pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_rounds_up_and_never_hits_zero() {
        assert_eq!(total_pages(0, 5), 1);
        assert_eq!(total_pages(1, 5), 1);
        assert_eq!(total_pages(5, 5), 1);
        assert_eq!(total_pages(6, 5), 2);
        assert_eq!(total_pages(12, 5), 3);
        // zero page size is clamped, not propagated
        assert_eq!(total_pages(10, 0), 10);
    }

    #[test]
    fn slices_are_contiguous_and_disjoint() {
        let items: Vec<usize> = (0..23).collect();
        let page_size = 5;
        let pages = total_pages(items.len(), page_size);
        let mut seen = Vec::new();
        for page in 1..=pages {
            let part = slice(&items, page_size, page);
            let expected_len = page_size.min(items.len() - (page - 1) * page_size);
            assert_eq!(part.len(), expected_len);
            seen.extend_from_slice(part);
        }
        assert_eq!(seen, items);
    }

    #[test]
    fn slice_beyond_range_is_empty() {
        let items: Vec<usize> = (0..4).collect();
        assert!(slice(&items, 5, 2).is_empty());
        assert!(slice::<usize>(&[], 5, 1).is_empty());
    }

    #[test]
    fn twelve_records_at_five_per_page() {
        let items: Vec<usize> = (0..12).collect();
        assert_eq!(total_pages(items.len(), 5), 3);
        assert_eq!(slice(&items, 5, 3).len(), 2);

        let mut state = PageState::new(3);
        state.goto(3);
        assert_eq!(state.current(), 3);
        state.next();
        assert_eq!(state.current(), 3, "next past the last page is a no-op");
    }

    #[test]
    fn goto_current_page_is_idempotent() {
        let mut state = PageState::new(4);
        state.goto(2);
        let before = state;
        state.goto(2);
        assert_eq!(state, before);
    }

    #[test]
    fn prev_on_first_page_is_noop() {
        let mut state = PageState::new(3);
        state.prev();
        assert_eq!(state.current(), 1);
    }

    #[test]
    fn filter_shrink_resets_to_first_page() {
        let mut state = PageState::new(7);
        state.goto(5);
        state.on_filter_changed(2);
        assert_eq!(state.current(), 1);
        assert_eq!(state.total(), 2);
    }

    #[test]
    fn filter_change_keeps_valid_current_page() {
        let mut state = PageState::new(7);
        state.goto(2);
        state.on_filter_changed(3);
        assert_eq!(state.current(), 2);
    }

    #[test]
    fn visible_pages_center_and_clamp() {
        assert_eq!(visible_pages(10, 5), vec![3, 4, 5, 6, 7]);
        assert_eq!(visible_pages(10, 1), vec![1, 2, 3, 4, 5]);
        // near the right edge the window shifts back to full width
        assert_eq!(visible_pages(10, 10), vec![6, 7, 8, 9, 10]);
        assert_eq!(visible_pages(10, 9), vec![6, 7, 8, 9, 10]);
        // fewer than five pages total
        assert_eq!(visible_pages(2, 1), vec![1, 2]);
        assert_eq!(visible_pages(1, 1), vec![1]);
        assert_eq!(visible_pages(0, 3), vec![1]);
    }

    #[test]
    fn narrowed_filter_shrinks_window() {
        // current page 4 out of 2 after the filter narrowed the results
        let mut state = PageState::new(9);
        state.goto(4);
        state.on_filter_changed(2);
        assert_eq!(state.current(), 1);
        assert_eq!(visible_pages(state.total(), state.current()), vec![1, 2]);
    }

    #[test]
    fn paginated_clamps_requested_page() {
        let page: Paginated<usize> = Paginated::new(vec![], 9, 3, 11);
        assert_eq!(page.page, 3);
        assert_eq!(page.pages, vec![1, 2, 3]);
    }
}
