//! Validated scalar types shared across contracts.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Validation errors raised by the scalar constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PrimitiveValidationError {
    /// Identifiers start at one.
    #[error("identifier must be a positive integer")]
    ZeroId,
    /// The address is not shaped like `local@domain.tld`.
    #[error("email address is malformed")]
    InvalidEmail,
    /// The time is not a 24-hour `HH:MM` value.
    #[error("visit time must use the HH:MM format")]
    InvalidVisitTime,
}

/// Positive integer primary key.
///
/// # Examples
/// ```
/// use sales_report::domain::primitives::RecordId;
///
/// assert!(RecordId::new(0).is_err());
/// assert_eq!(RecordId::new(7).expect("positive").get(), 7);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(try_from = "u64", into = "u64")]
#[schema(example = 1)]
pub struct RecordId(u64);

impl RecordId {
    /// Validate and wrap a raw identifier.
    pub const fn new(raw: u64) -> Result<Self, PrimitiveValidationError> {
        if raw == 0 {
            return Err(PrimitiveValidationError::ZeroId);
        }
        Ok(Self(raw))
    }

    /// Raw identifier value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl TryFrom<u64> for RecordId {
    type Error = PrimitiveValidationError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RecordId> for u64 {
    fn from(value: RecordId) -> Self {
        value.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // Leading dots and consecutive dots are rejected separately.
        let pattern = r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Syntactically valid email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
#[schema(value_type = String, example = "yamada@example.com")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an [`EmailAddress`].
    pub fn new(address: impl Into<String>) -> Result<Self, PrimitiveValidationError> {
        let address = address.into();
        let local_part = address.split('@').next().unwrap_or_default();
        let well_formed = !local_part.starts_with('.')
            && !address.contains("..")
            && email_regex().is_match(&address);
        if !well_formed {
            return Err(PrimitiveValidationError::InvalidEmail);
        }
        Ok(Self(address))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = PrimitiveValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Time of day of a customer visit, `HH:MM` on a 24-hour clock.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
#[schema(value_type = String, example = "14:30")]
pub struct VisitTime(String);

impl VisitTime {
    /// Validate and construct a [`VisitTime`].
    pub fn new(raw: impl Into<String>) -> Result<Self, PrimitiveValidationError> {
        let raw = raw.into();
        let (hours, minutes) = raw
            .split_once(':')
            .ok_or(PrimitiveValidationError::InvalidVisitTime)?;
        let two_digits = |part: &str| part.len() == 2 && part.bytes().all(|b| b.is_ascii_digit());
        if !two_digits(hours) || !two_digits(minutes) {
            return Err(PrimitiveValidationError::InvalidVisitTime);
        }
        let in_range = hours.parse::<u8>().is_ok_and(|h| h < 24)
            && minutes.parse::<u8>().is_ok_and(|m| m < 60);
        if !in_range {
            return Err(PrimitiveValidationError::InvalidVisitTime);
        }
        Ok(Self(raw))
    }
}

impl AsRef<str> for VisitTime {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<VisitTime> for String {
    fn from(value: VisitTime) -> Self {
        value.0
    }
}

impl TryFrom<String> for VisitTime {
    type Error = PrimitiveValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
