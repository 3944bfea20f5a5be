//! Validated page-number requests.

use serde::{Deserialize, Serialize};

use crate::PaginationError;

/// Page number applied when the caller omits `page`.
pub const DEFAULT_PAGE: u32 = 1;
/// Page size applied when the caller omits `per_page`.
pub const DEFAULT_PER_PAGE: u32 = 20;
/// Largest page size a caller may request.
pub const MAX_PER_PAGE: u32 = 100;

/// A one-based page number and page size.
///
/// ## Invariants
/// - `page >= 1`
/// - `1 <= per_page <= MAX_PER_PAGE`
///
/// # Examples
/// ```
/// use pagination::PageRequest;
///
/// let request = PageRequest::new(3, 25).expect("within bounds");
/// assert_eq!(request.offset(), 50);
/// assert!(PageRequest::new(1, 150).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "PageRequestDto")]
pub struct PageRequest {
    page: u32,
    per_page: u32,
}

impl PageRequest {
    /// Validate and construct a page request.
    ///
    /// Accepts `u64` so callers can pass coerced query values without
    /// truncating them first.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError::PageOutOfRange`] when `page` is zero or does
    /// not fit in `u32`, and [`PaginationError::PerPageOutOfRange`] when
    /// `per_page` is zero or above [`MAX_PER_PAGE`].
    pub fn new(page: u64, per_page: u64) -> Result<Self, PaginationError> {
        let checked_page = u32::try_from(page)
            .ok()
            .filter(|value| *value >= 1)
            .ok_or(PaginationError::PageOutOfRange { page })?;
        let checked_per_page = u32::try_from(per_page)
            .ok()
            .filter(|value| (1..=MAX_PER_PAGE).contains(value))
            .ok_or(PaginationError::PerPageOutOfRange {
                per_page,
                max: MAX_PER_PAGE,
            })?;
        Ok(Self {
            page: checked_page,
            per_page: checked_per_page,
        })
    }

    /// One-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Number of rows per page.
    #[must_use]
    pub const fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Number of rows to skip before the first row of this page.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        (self.page as u64 - 1) * self.per_page as u64
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

#[derive(Deserialize)]
struct PageRequestDto {
    page: u64,
    per_page: u64,
}

impl TryFrom<PageRequestDto> for PageRequest {
    type Error = PaginationError;

    fn try_from(value: PageRequestDto) -> Result<Self, Self::Error> {
        Self::new(value.page, value.per_page)
    }
}
