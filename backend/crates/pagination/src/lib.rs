//! Page-number pagination primitives shared by list endpoints.
//!
//! The crate owns three concerns:
//!
//! - [`PageRequest`]: a validated `(page, per_page)` pair with the defaults
//!   and bounds every list query applies.
//! - [`PaginationMeta`]: the `meta` block returned alongside a page of
//!   results, derived from a request and the total row count.
//! - [`Paginated`]: the `{status, data, meta}` success envelope.
//!
//! Nothing here knows about HTTP; adapters decide how raw query strings are
//! coerced before calling [`PageRequest::new`].

mod envelope;
mod meta;
mod request;

pub use envelope::{Paginated, SuccessStatus};
pub use meta::PaginationMeta;
pub use request::{DEFAULT_PAGE, DEFAULT_PER_PAGE, MAX_PER_PAGE, PageRequest};

/// Errors raised while building pagination values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaginationError {
    /// The requested page number is below one.
    #[error("page must be at least 1 (got {page})")]
    PageOutOfRange {
        /// Rejected page number.
        page: u64,
    },
    /// The requested page size is outside `1..=max`.
    #[error("per_page must be between 1 and {max} (got {per_page})")]
    PerPageOutOfRange {
        /// Rejected page size.
        per_page: u64,
        /// Largest accepted page size.
        max: u32,
    },
    /// More rows were supplied than the page size allows.
    #[error("page holds {len} rows but per_page is {per_page}")]
    PageOverflow {
        /// Number of rows supplied.
        len: usize,
        /// Page size of the originating request.
        per_page: u32,
    },
}
