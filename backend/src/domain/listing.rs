//! Pagination parameters shared by list queries.

use pagination::{DEFAULT_PAGE, DEFAULT_PER_PAGE, MAX_PER_PAGE, PageRequest};
use serde::{Deserialize, Serialize};

use super::validation::{Contract, Field, Violations, Whole};

const PAGE: Whole<u64> = Whole::positive("page").coerced();
const PER_PAGE: Whole<u64> = Whole::positive("per page")
    .at_most(MAX_PER_PAGE as u64)
    .coerced();

/// Read `page` and `per_page`, applying defaults for absent keys.
pub(crate) fn page_request(field: &Field<'_>, violations: &mut Violations) -> Option<PageRequest> {
    let page_field = field.key("page");
    let page = page_field.or_default(violations, &PAGE, u64::from(DEFAULT_PAGE));
    let per_page = field
        .key("per_page")
        .or_default(violations, &PER_PAGE, u64::from(DEFAULT_PER_PAGE));
    PageRequest::new(page?, per_page?)
        .map_err(|error| violations.record(page_field.path(), error.to_string()))
        .ok()
}

/// Bare `page`/`per_page` query accepted by every list endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationQuery {
    /// Requested page.
    #[serde(flatten)]
    pub page: PageRequest,
}

impl Contract for PaginationQuery {
    fn check(field: &Field<'_>, violations: &mut Violations) -> Option<Self> {
        field.object(violations)?;
        let page = page_request(field, violations);
        Some(Self { page: page? })
    }
}
