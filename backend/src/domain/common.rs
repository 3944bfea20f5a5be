//! Payload shapes shared by several resources.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::primitives::RecordId;
use super::validation::{Contract, Field, Violations, Whole};

/// `{message}` body returned by logout and delete operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    /// Confirmation shown to the user.
    #[schema(example = "Deleted")]
    pub message: String,
}

impl MessageResponse {
    /// Wrap a confirmation message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

const ID: Whole<RecordId> = Whole::positive("id").coerced();

/// `{id}` path parameter of single-resource routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdParams {
    /// Resource identifier.
    pub id: RecordId,
}

impl Contract for IdParams {
    fn check(field: &Field<'_>, violations: &mut Violations) -> Option<Self> {
        field.object(violations)?;
        let id = field.key("id").required(violations, &ID);
        Some(Self { id: id? })
    }
}
