//! Contract validation engine.
//!
//! A contract is a type implementing [`Contract`]. Validation walks an
//! untyped [`serde_json::Value`] with a [`Field`] cursor, records every
//! violated rule with its dotted path, and only yields a typed value when no
//! rule failed anywhere in the input.
//!
//! The entry points never panic on malformed input:
//!
//! ```
//! use sales_report::domain::validation::validate;
//! use sales_report::domain::customer::CreateCustomerRequest;
//! use serde_json::json;
//!
//! let errors = validate::<CreateCustomerRequest>(&json!({ "name": 42 }))
//!     .expect_err("missing code and wrong name type");
//! assert_eq!(errors.len(), 2);
//! ```

mod field;
mod patch;
mod path;
mod rules;

#[cfg(test)]
mod tests;

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

pub use field::Field;
pub use patch::Patch;
pub use path::FieldPath;
pub use rules::{
    ClosedSet, DateRule, EmailRule, Flag, OneOf, Pattern, Rejection, Rule, Text, TimeRule, Whole,
};

/// A single violated rule.
///
/// `field` is the dotted path of the offending value (`visits.0.content`);
/// it is `None` when the input as a whole has the wrong shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldError {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "visits.0.customer_id")]
    field: Option<String>,
    #[schema(example = "Required")]
    message: String,
}

impl FieldError {
    /// Construct an error attached to `field`.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: Some(field.into()),
            message: message.into(),
        }
    }

    /// Construct an error describing the whole input.
    pub fn root(message: impl Into<String>) -> Self {
        Self {
            field: None,
            message: message.into(),
        }
    }

    /// Dotted path of the offending field, if any.
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    /// Human-readable description of the violation.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.field {
            Some(field) => write!(f, "{field}: {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// Every rule an input violated, in traversal order. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("input failed validation with {} error(s)", .0.len())]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    /// Number of violations.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no violation was recorded. Never true for a returned error.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the violations.
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// Iterate over the dotted paths of field-level violations.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.iter().filter_map(FieldError::field)
    }

    /// Take ownership of the violations.
    pub fn into_vec(self) -> Vec<FieldError> {
        self.0
    }
}

impl IntoIterator for ValidationErrors {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Accumulates violations during a single validation pass.
#[derive(Debug, Default)]
pub struct Violations {
    errors: Vec<FieldError>,
}

impl Violations {
    /// Record a violation at `path`.
    pub fn record(&mut self, path: &FieldPath, message: impl Into<String>) {
        let error = if path.is_root() {
            FieldError::root(message)
        } else {
            FieldError::new(path.to_string(), message)
        };
        self.errors.push(error);
    }

    /// Number of violations recorded so far.
    pub fn count(&self) -> usize {
        self.errors.len()
    }

    fn finish(mut self) -> ValidationErrors {
        if self.errors.is_empty() {
            self.errors.push(FieldError::root("Invalid input"));
        }
        ValidationErrors(self.errors)
    }
}

/// A typed request shape that can be checked against untyped input.
///
/// Implementations read every field before combining the results so that a
/// single pass reports all violations. Returning `None` without recording a
/// violation is treated as a root-level failure.
pub trait Contract: Sized {
    /// Check `field` and build the typed value, or record why it cannot be
    /// built.
    fn check(field: &Field<'_>, violations: &mut Violations) -> Option<Self>;
}

/// Validate `input` against contract `T`.
///
/// # Errors
///
/// Returns every violated rule when the input does not satisfy `T`.
pub fn validate<T: Contract>(input: &Value) -> Result<T, ValidationErrors> {
    let mut violations = Violations::default();
    let checked = T::check(&Field::root(input), &mut violations);
    match checked {
        Some(value) if violations.count() == 0 => Ok(value),
        _ => Err(violations.finish()),
    }
}

/// Validate query-string parameters. Identical to [`validate`].
///
/// # Errors
///
/// See [`validate`].
pub fn validate_query<T: Contract>(query: &Value) -> Result<T, ValidationErrors> {
    validate(query)
}

/// Validate a request body. Identical to [`validate`].
///
/// # Errors
///
/// See [`validate`].
pub fn validate_body<T: Contract>(body: &Value) -> Result<T, ValidationErrors> {
    validate(body)
}

/// Validate path parameters. Identical to [`validate`].
///
/// # Errors
///
/// See [`validate`].
pub fn validate_params<T: Contract>(params: &Value) -> Result<T, ValidationErrors> {
    validate(params)
}
