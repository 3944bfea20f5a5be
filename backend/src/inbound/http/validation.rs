//! Validation helpers for HTTP handlers.
//!
//! Handlers hand the raw request parts to [`body`], [`query`], or [`params`]
//! and receive either the typed contract or an [`ApiError`] ready to render.

use std::any::type_name;
use std::collections::HashMap;

use actix_web::HttpResponse;
use pagination::Paginated;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use super::envelope::SuccessEnvelope;
use super::error::ApiError;
use crate::domain::{Contract, ValidationErrors, validate_body, validate_params, validate_query};

fn rejected<T>(part: &'static str, errors: ValidationErrors) -> ApiError {
    debug!(
        contract = type_name::<T>(),
        part,
        error_count = errors.len(),
        fields = ?errors.fields().collect::<Vec<_>>(),
        "request rejected by contract"
    );
    ApiError::from(errors)
}

/// Convert string pairs into a JSON object, treating empty values as absent.
fn string_map(pairs: &HashMap<String, String>) -> Value {
    let members: Map<String, Value> = pairs
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(key, value)| (key.clone(), Value::String(value.clone())))
        .collect();
    Value::Object(members)
}

/// Validate a JSON request body.
///
/// # Errors
///
/// Returns a validation [`ApiError`] listing every violation.
pub fn body<T: Contract>(payload: &Value) -> Result<T, ApiError> {
    validate_body(payload).map_err(|errors| rejected::<T>("body", errors))
}

/// Validate query-string parameters.
///
/// # Errors
///
/// Returns a validation [`ApiError`] listing every violation.
pub fn query<T: Contract>(pairs: &HashMap<String, String>) -> Result<T, ApiError> {
    validate_query(&string_map(pairs)).map_err(|errors| rejected::<T>("query", errors))
}

/// Validate route parameters.
///
/// # Errors
///
/// Returns a validation [`ApiError`] listing every violation.
pub fn params<T: Contract>(pairs: &HashMap<String, String>) -> Result<T, ApiError> {
    validate_params(&string_map(pairs)).map_err(|errors| rejected::<T>("params", errors))
}

/// `200 OK` with `{status: "success", data}`.
pub fn ok<T: Serialize>(data: T) -> HttpResponse {
    HttpResponse::Ok().json(SuccessEnvelope::new(data))
}

/// `200 OK` with the paginated envelope.
pub fn paginated<T: Serialize>(page: &Paginated<T>) -> HttpResponse {
    HttpResponse::Ok().json(page)
}
