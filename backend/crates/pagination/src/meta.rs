//! Pagination metadata returned with each page.

use serde::{Deserialize, Serialize};

use crate::PageRequest;

/// The `meta` block of a paginated response.
///
/// `current_page` and `per_page` are always positive; `total_pages` is zero
/// only when `total_count` is zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationMeta {
    /// One-based page number that was served.
    pub current_page: u32,
    /// Page size that was applied.
    pub per_page: u32,
    /// Number of pages needed to cover `total_count` rows.
    pub total_pages: u64,
    /// Total rows matching the query across all pages.
    pub total_count: u64,
}

impl PaginationMeta {
    /// Derive metadata for `request` given the total row count.
    ///
    /// # Examples
    /// ```
    /// use pagination::{PageRequest, PaginationMeta};
    ///
    /// let meta = PaginationMeta::new(PageRequest::default(), 41);
    /// assert_eq!(meta.total_pages, 3);
    /// ```
    #[must_use]
    pub const fn new(request: PageRequest, total_count: u64) -> Self {
        let per_page = request.per_page();
        Self {
            current_page: request.page(),
            per_page,
            total_pages: total_count.div_ceil(per_page as u64),
            total_count,
        }
    }

    /// Whether a page exists after the current one.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        (self.current_page as u64) < self.total_pages
    }
}
