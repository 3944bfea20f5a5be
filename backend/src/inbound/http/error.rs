//! HTTP error envelope and status mapping.
//!
//! Purpose: give handlers one error type that renders as
//! `{status: "error", error: {code, message, details?}}` with a status code
//! derived from the error category. Validation failures keep every field
//! error so clients can highlight all offending inputs at once.

use std::fmt;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use super::envelope::{ErrorBody, ErrorEnvelope};
use crate::domain::{FieldError, ValidationErrors};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// Message carried by every validation failure.
pub const VALIDATION_MESSAGE: &str = "Request validation failed";

const INTERNAL_MESSAGE: &str = "Internal server error";

/// Stable machine-readable error category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The input failed its contract.
    ValidationError,
    /// Authentication failed or is missing.
    Unauthorized,
    /// Authenticated but not permitted.
    Forbidden,
    /// The resource does not exist.
    NotFound,
    /// The request conflicts with stored state.
    Conflict,
    /// An unexpected failure; details are never sent to clients.
    InternalError,
}

impl ErrorCode {
    /// HTTP status used for this category.
    pub const fn status(self) -> StatusCode {
        match self {
            Self::ValidationError => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Conflict => StatusCode::CONFLICT,
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error returned by HTTP handlers.
///
/// # Examples
/// ```
/// use actix_web::ResponseError;
/// use actix_web::http::StatusCode;
/// use sales_report::inbound::http::error::{ApiError, ErrorCode};
///
/// let err = ApiError::not_found("report not found");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    code: ErrorCode,
    message: String,
    details: Option<Vec<FieldError>>,
}

impl ApiError {
    /// Create an error with the given category and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Attach field-level details.
    #[must_use]
    pub fn with_details(mut self, details: Vec<FieldError>) -> Self {
        self.details = Some(details);
        self
    }

    /// Error category.
    pub const fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Field-level details, if any.
    pub fn details(&self) -> Option<&[FieldError]> {
        self.details.as_deref()
    }

    /// Convenience constructor for [`ErrorCode::ValidationError`].
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationError, message)
    }

    /// Convenience constructor for [`ErrorCode::Unauthorized`].
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    /// Convenience constructor for [`ErrorCode::Forbidden`].
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Forbidden, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::Conflict`].
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Conflict, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Envelope sent to clients; internal errors lose message and details.
    pub fn envelope(&self) -> ErrorEnvelope {
        let body = if self.code == ErrorCode::InternalError {
            ErrorBody::new(self.code, INTERNAL_MESSAGE, None)
        } else {
            ErrorBody::new(self.code, self.message.clone(), self.details.clone())
        };
        ErrorEnvelope::new(body)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        Self::validation(VALIDATION_MESSAGE).with_details(errors.into_vec())
    }
}

impl From<actix_web::Error> for ApiError {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to API error");
        Self::internal(INTERNAL_MESSAGE)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.code.status()
    }

    fn error_response(&self) -> HttpResponse {
        if self.code == ErrorCode::InternalError {
            error!(message = %self.message, "internal error returned to client");
        }
        HttpResponse::build(self.status_code()).json(self.envelope())
    }
}
