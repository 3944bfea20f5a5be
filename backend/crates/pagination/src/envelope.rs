//! Paginated success envelope.

use serde::{Deserialize, Serialize};

use crate::{PageRequest, PaginationError, PaginationMeta};

/// Literal `"success"` status tag carried by every success envelope.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SuccessStatus {
    /// The only accepted value.
    #[default]
    #[serde(rename = "success")]
    Success,
}

/// `{status: "success", data: [...], meta: {...}}` envelope for list results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paginated<T> {
    /// Always [`SuccessStatus::Success`].
    pub status: SuccessStatus,
    /// Rows on this page, in display order.
    pub data: Vec<T>,
    /// Position of this page within the full result set.
    pub meta: PaginationMeta,
}

impl<T> Paginated<T> {
    /// Wrap one page of rows.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError::PageOverflow`] when `data` holds more rows
    /// than the request's page size.
    pub fn new(
        data: Vec<T>,
        request: PageRequest,
        total_count: u64,
    ) -> Result<Self, PaginationError> {
        let per_page = request.per_page();
        let fits = u32::try_from(data.len()).is_ok_and(|len| len <= per_page);
        if !fits {
            return Err(PaginationError::PageOverflow {
                len: data.len(),
                per_page,
            });
        }
        Ok(Self {
            status: SuccessStatus::Success,
            data,
            meta: PaginationMeta::new(request, total_count),
        })
    }

    /// Transform each row while keeping the metadata.
    #[must_use]
    pub fn map<U, F>(self, f: F) -> Paginated<U>
    where
        F: FnMut(T) -> U,
    {
        Paginated {
            status: self.status,
            data: self.data.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn serialises_envelope_shape() {
        let page = Paginated::new(vec!["a", "b"], PageRequest::default(), 2)
            .expect("page fits");
        let value = serde_json::to_value(&page).expect("serialise page");
        assert_eq!(
            value,
            json!({
                "status": "success",
                "data": ["a", "b"],
                "meta": {
                    "current_page": 1,
                    "per_page": 20,
                    "total_pages": 1,
                    "total_count": 2
                }
            })
        );
    }

    #[rstest]
    fn rejects_rows_beyond_page_size() {
        let request = PageRequest::new(1, 1).expect("valid request");
        let error = Paginated::new(vec![1, 2], request, 2).expect_err("overflow");
        assert_eq!(error, PaginationError::PageOverflow { len: 2, per_page: 1 });
    }

    #[rstest]
    fn rejects_foreign_status_literal() {
        let result: Result<Paginated<u8>, _> = serde_json::from_value(json!({
            "status": "error",
            "data": [],
            "meta": {"current_page": 1, "per_page": 20, "total_pages": 0, "total_count": 0}
        }));
        assert!(result.is_err());
    }

    #[rstest]
    fn map_preserves_meta() {
        let page = Paginated::new(vec![1, 2], PageRequest::default(), 42).expect("page fits");
        let mapped = page.clone().map(|value| value * 10);
        assert_eq!(mapped.data, vec![10, 20]);
        assert_eq!(mapped.meta, page.meta);
    }
}
