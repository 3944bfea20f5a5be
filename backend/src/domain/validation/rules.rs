//! Field-level rules.
//!
//! Each rule turns one JSON value into a typed output or a [`Rejection`]
//! listing every constraint the value broke.

use std::marker::PhantomData;
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use serde_json::Value;

use crate::domain::primitives::{EmailAddress, VisitTime};

/// Largest integer a JSON float can carry without losing precision.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Messages explaining why a value was rejected. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection(Vec<String>);

impl Rejection {
    /// Reject with a single message.
    pub fn new(message: impl Into<String>) -> Self {
        Self(vec![message.into()])
    }

    /// Messages in the order the constraints were checked.
    pub fn messages(&self) -> &[String] {
        &self.0
    }

    pub(super) fn into_messages(self) -> Vec<String> {
        self.0
    }

    fn from_messages(messages: Vec<String>) -> Result<(), Self> {
        if messages.is_empty() {
            Ok(())
        } else {
            Err(Self(messages))
        }
    }
}

impl From<String> for Rejection {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// A constraint applied to a single present, non-null value.
pub trait Rule {
    /// Typed value produced when the constraint holds.
    type Output;

    /// Check `value` and convert it.
    ///
    /// # Errors
    ///
    /// Returns a [`Rejection`] describing every broken constraint.
    fn apply(&self, value: &Value) -> Result<Self::Output, Rejection>;
}

pub(super) fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

pub(super) fn type_mismatch(expected: &str, value: &Value) -> Rejection {
    Rejection::new(format!("Expected {expected}, received {}", kind(value)))
}

/// A lazily compiled regular expression with a failure hint.
pub struct Pattern {
    source: &'static str,
    hint: &'static str,
    compiled: OnceLock<Regex>,
}

impl Pattern {
    /// Declare a pattern; compilation happens on first use.
    pub const fn new(source: &'static str, hint: &'static str) -> Self {
        Self {
            source,
            hint,
            compiled: OnceLock::new(),
        }
    }

    /// Whether `candidate` matches the whole pattern.
    pub fn is_match(&self, candidate: &str) -> bool {
        self.compiled
            .get_or_init(|| {
                Regex::new(self.source).unwrap_or_else(|error| {
                    panic!("pattern {} failed to compile: {error}", self.source)
                })
            })
            .is_match(candidate)
    }

    /// Message reported when a value does not match.
    pub const fn hint(&self) -> &'static str {
        self.hint
    }
}

/// String length and format constraints.
///
/// Lengths count Unicode scalar values, not UTF-16 code units: an emoji
/// outside the Basic Multilingual Plane counts as one character.
#[derive(Clone, Copy)]
pub struct Text {
    label: &'static str,
    min: usize,
    max: Option<usize>,
    pattern: Option<&'static Pattern>,
}

impl Text {
    /// Any string is accepted until limits are added.
    pub const fn new(label: &'static str) -> Self {
        Self {
            label,
            min: 0,
            max: None,
            pattern: None,
        }
    }

    /// Require at least `min` characters.
    pub const fn min(self, min: usize) -> Self {
        Self { min, ..self }
    }

    /// Allow at most `max` characters.
    pub const fn max(self, max: usize) -> Self {
        Self {
            max: Some(max),
            ..self
        }
    }

    /// Require the whole string to match `pattern`.
    pub const fn pattern(self, pattern: &'static Pattern) -> Self {
        Self {
            pattern: Some(pattern),
            ..self
        }
    }
}

impl Rule for Text {
    type Output = String;

    fn apply(&self, value: &Value) -> Result<String, Rejection> {
        let Value::String(text) = value else {
            return Err(type_mismatch("string", value));
        };
        let length = text.chars().count();
        let mut messages = Vec::new();
        if length < self.min {
            messages.push(if self.min == 1 {
                format!("{} must not be empty", self.label)
            } else {
                format!("{} must be at least {} characters", self.label, self.min)
            });
        }
        if let Some(max) = self.max.filter(|max| length > *max) {
            messages.push(format!("{} must be at most {max} characters", self.label));
        }
        if let Some(pattern) = self.pattern.filter(|pattern| !pattern.is_match(text)) {
            messages.push(pattern.hint().to_owned());
        }
        Rejection::from_messages(messages)?;
        Ok(text.clone())
    }
}

/// Whole-number constraint producing `T`.
///
/// Coerced rules also accept decimal strings, as query strings carry every
/// value as text.
pub struct Whole<T> {
    label: &'static str,
    min: u64,
    max: u64,
    coerce: bool,
    output: PhantomData<fn() -> T>,
}

impl<T> Whole<T> {
    /// Accept any non-negative integer.
    pub const fn non_negative(label: &'static str) -> Self {
        Self {
            label,
            min: 0,
            max: u64::MAX,
            coerce: false,
            output: PhantomData,
        }
    }

    /// Accept integers of at least one.
    pub const fn positive(label: &'static str) -> Self {
        Self {
            min: 1,
            ..Self::non_negative(label)
        }
    }

    /// Reject values above `max`.
    pub const fn at_most(self, max: u64) -> Self {
        Self { max, ..self }
    }

    /// Accept decimal strings as well as numbers.
    pub const fn coerced(self) -> Self {
        Self {
            coerce: true,
            ..self
        }
    }

    fn whole_number(&self, value: &Value) -> Result<i128, Rejection> {
        match value {
            Value::Number(number) => {
                if let Some(unsigned) = number.as_u64() {
                    return Ok(i128::from(unsigned));
                }
                if let Some(signed) = number.as_i64() {
                    return Ok(i128::from(signed));
                }
                number
                    .as_f64()
                    .filter(|float| float.fract() == 0.0 && float.abs() <= MAX_SAFE_INTEGER)
                    .map(|float| float as i128)
                    .ok_or_else(|| Rejection::new("Expected integer, received float"))
            }
            Value::String(raw) if self.coerce => raw
                .trim()
                .parse::<i128>()
                .map_err(|_| Rejection::new(format!("{} must be a whole number", self.label))),
            other => Err(type_mismatch("number", other)),
        }
    }
}

impl<T: TryFrom<u64>> Rule for Whole<T> {
    type Output = T;

    fn apply(&self, value: &Value) -> Result<T, Rejection> {
        let number = self.whole_number(value)?;
        if number < i128::from(self.min) {
            return Err(Rejection::new(match self.min {
                0 => format!("{} must not be negative", self.label),
                1 => format!("{} must be a positive integer", self.label),
                min => format!("{} must be at least {min}", self.label),
            }));
        }
        if number > i128::from(self.max) {
            return Err(Rejection::new(format!(
                "{} must be at most {}",
                self.label, self.max
            )));
        }
        u64::try_from(number)
            .ok()
            .and_then(|unsigned| T::try_from(unsigned).ok())
            .ok_or_else(|| Rejection::new(format!("{} is out of range", self.label)))
    }
}

/// Boolean constraint; coerced flags accept `true|false|1|0` strings.
#[derive(Clone, Copy)]
pub struct Flag {
    coerce: bool,
}

impl Flag {
    /// Accept JSON booleans only.
    pub const STRICT: Self = Self { coerce: false };
    /// Accept JSON booleans and their query-string spellings.
    pub const COERCED: Self = Self { coerce: true };
}

impl Rule for Flag {
    type Output = bool;

    fn apply(&self, value: &Value) -> Result<bool, Rejection> {
        match value {
            Value::Bool(flag) => Ok(*flag),
            Value::String(raw) if self.coerce => match raw.trim().to_ascii_lowercase().as_str() {
                "true" | "1" => Ok(true),
                "false" | "0" => Ok(false),
                _ => Err(Rejection::new(format!(
                    "Expected boolean, received '{raw}'"
                ))),
            },
            other => Err(type_mismatch("boolean", other)),
        }
    }
}

/// A closed set of string tags.
pub trait ClosedSet: Copy + 'static {
    /// Every member, in declaration order.
    const ALL: &'static [Self];

    /// Wire tag of this member.
    fn as_str(self) -> &'static str;

    /// Look up a member by its wire tag.
    fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|member| member.as_str() == tag)
    }
}

/// Enum-membership constraint.
pub struct OneOf<E>(PhantomData<fn() -> E>);

impl<E> OneOf<E> {
    /// Accept exactly the tags of `E`.
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<E: ClosedSet> OneOf<E> {
    fn expected() -> String {
        E::ALL
            .iter()
            .map(|member| format!("'{}'", member.as_str()))
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

impl<E: ClosedSet> Rule for OneOf<E> {
    type Output = E;

    fn apply(&self, value: &Value) -> Result<E, Rejection> {
        let Value::String(tag) = value else {
            return Err(type_mismatch(&Self::expected(), value));
        };
        E::from_tag(tag).ok_or_else(|| {
            Rejection::new(format!(
                "Invalid enum value. Expected {}, received '{tag}'",
                Self::expected()
            ))
        })
    }
}

/// Email address constraint.
#[derive(Clone, Copy)]
pub struct EmailRule {
    label: &'static str,
}

impl EmailRule {
    /// Reject strings that are not email addresses.
    pub const fn new(label: &'static str) -> Self {
        Self { label }
    }
}

impl Rule for EmailRule {
    type Output = EmailAddress;

    fn apply(&self, value: &Value) -> Result<EmailAddress, Rejection> {
        let Value::String(raw) = value else {
            return Err(type_mismatch("string", value));
        };
        EmailAddress::new(raw.as_str())
            .map_err(|_| Rejection::new(format!("{} must be a valid email address", self.label)))
    }
}

static CALENDAR_DATE: Pattern = Pattern::new(r"^\d{4}-\d{2}-\d{2}$", "");

/// `YYYY-MM-DD` calendar date constraint.
#[derive(Clone, Copy)]
pub struct DateRule {
    label: &'static str,
}

impl DateRule {
    /// Accept real calendar dates in `YYYY-MM-DD` form.
    pub const fn new(label: &'static str) -> Self {
        Self { label }
    }
}

impl Rule for DateRule {
    type Output = NaiveDate;

    fn apply(&self, value: &Value) -> Result<NaiveDate, Rejection> {
        let Value::String(raw) = value else {
            return Err(type_mismatch("string", value));
        };
        if !CALENDAR_DATE.is_match(raw) {
            return Err(Rejection::new(format!(
                "{} must use the YYYY-MM-DD format",
                self.label
            )));
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map_err(|_| Rejection::new(format!("{} is not a valid calendar date", self.label)))
    }
}

/// `HH:MM` time-of-day constraint.
#[derive(Clone, Copy)]
pub struct TimeRule {
    label: &'static str,
}

impl TimeRule {
    /// Accept 24-hour `HH:MM` times.
    pub const fn new(label: &'static str) -> Self {
        Self { label }
    }
}

impl Rule for TimeRule {
    type Output = VisitTime;

    fn apply(&self, value: &Value) -> Result<VisitTime, Rejection> {
        let Value::String(raw) = value else {
            return Err(type_mismatch("string", value));
        };
        VisitTime::new(raw.as_str())
            .map_err(|_| Rejection::new(format!("{} must use the HH:MM format", self.label)))
    }
}
