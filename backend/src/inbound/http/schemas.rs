//! OpenAPI schema definitions for the pagination crate's types.
//!
//! The `pagination` crate stays free of utoipa. These wrappers mirror its
//! serialised shapes so the document can describe list responses.

use utoipa::ToSchema;

/// OpenAPI schema for [`pagination::SuccessStatus`].
#[derive(ToSchema)]
#[schema(as = pagination::SuccessStatus)]
pub enum SuccessStatusSchema {
    /// The only accepted value.
    #[schema(rename = "success")]
    Success,
}

/// OpenAPI schema for [`pagination::PaginationMeta`].
#[derive(ToSchema)]
#[schema(as = pagination::PaginationMeta)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct PaginationMetaSchema {
    /// One-based page number.
    #[schema(minimum = 1, example = 1)]
    current_page: u32,
    /// Rows per page.
    #[schema(minimum = 1, maximum = 100, example = 20)]
    per_page: u32,
    /// Number of pages; zero for an empty result.
    #[schema(example = 3)]
    total_pages: u64,
    /// Number of rows across all pages.
    #[schema(example = 42)]
    total_count: u64,
}
