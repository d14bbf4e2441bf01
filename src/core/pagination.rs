//! Fixed-size pagination.

/// Rows per page.
pub const PAGE_SIZE: usize = 10;

/// One page of a list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page<T> {
    /// Items on this page
    pub items: Vec<T>,
    /// 1-based page number actually shown
    pub current_page: usize,
    /// Number of pages; 0 for an empty list
    pub page_count: usize,
    /// Size of the whole list
    pub total_items: usize,
}

impl<T> Page<T> {
    /// Whether there is a page before this one.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    /// Whether there is a page after this one.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.current_page < self.page_count
    }
}

/// `ceil(total / PAGE_SIZE)`.
#[must_use]
pub const fn page_count(total: usize) -> usize {
    total.div_ceil(PAGE_SIZE)
}

/// Clamps a requested page into `1..=max(1, page_count)`.
#[must_use]
pub fn clamp_page(requested: usize, page_count: usize) -> usize {
    requested.clamp(1, page_count.max(1))
}

/// Cuts the requested page out of `items`, clamping the page number first.
#[must_use]
pub fn paginate<T: Clone>(items: &[T], requested: usize) -> Page<T> {
    let total_items = items.len();
    let page_count = page_count(total_items);
    let current_page = clamp_page(requested, page_count);
    let start = (current_page - 1) * PAGE_SIZE;
    let items = items.iter().skip(start).take(PAGE_SIZE).cloned().collect();
    Page {
        items,
        current_page,
        page_count,
        total_items,
    }
}
