//! HTTP inbound adapter: envelopes, error mapping, and request validation.

pub mod envelope;
pub mod error;
pub mod schemas;
pub mod validation;

pub use error::{ApiError, ApiResult, ErrorCode};
