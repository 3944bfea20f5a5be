//! Success and error envelopes shared by every endpoint.

use pagination::SuccessStatus;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::error::ErrorCode;
use crate::domain::FieldError;
use crate::domain::macros::closed_set;

closed_set! {
    /// Literal `"error"` status tag of the error envelope.
    pub enum ErrorStatus {
        /// The only accepted value.
        Error => "error",
    }
}

/// `{status: "success", data}` envelope for single results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessEnvelope<T> {
    /// Always [`SuccessStatus::Success`].
    pub status: SuccessStatus,
    /// Response payload.
    pub data: T,
}

impl<T> SuccessEnvelope<T> {
    /// Wrap `data`.
    pub fn new(data: T) -> Self {
        Self {
            status: SuccessStatus::Success,
            data,
        }
    }
}

/// Body of the error envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// Error category.
    pub code: ErrorCode,
    /// Human-readable message.
    #[schema(example = "Request validation failed")]
    pub message: String,
    /// Field-level violations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

impl ErrorBody {
    /// Assemble an error body.
    pub fn new(
        code: ErrorCode,
        message: impl Into<String>,
        details: Option<Vec<FieldError>>,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            details,
        }
    }
}

/// `{status: "error", error}` envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorEnvelope {
    /// Always `error`.
    pub status: ErrorStatus,
    /// What went wrong.
    pub error: ErrorBody,
}

impl ErrorEnvelope {
    /// Wrap an error body.
    pub fn new(error: ErrorBody) -> Self {
        Self {
            status: ErrorStatus::Error,
            error,
        }
    }
}
