//! Cursor over untyped input.

use serde_json::{Map, Value};

use super::rules::{Rule, type_mismatch};
use super::{Contract, FieldPath, Patch, Violations};

const REQUIRED: &str = "Required";

/// A position in the input together with the value found there, if any.
///
/// Readers return `None` when the value is unusable and record the reason in
/// [`Violations`]; callers should read every field before combining results.
#[derive(Debug, Clone)]
pub struct Field<'a> {
    value: Option<&'a Value>,
    path: FieldPath,
}

impl<'a> Field<'a> {
    /// Cursor over the whole input.
    pub fn root(value: &'a Value) -> Self {
        Self {
            value: Some(value),
            path: FieldPath::root(),
        }
    }

    /// Cursor over the member `name` of this object.
    ///
    /// The child is absent when this value is absent or not an object.
    pub fn key(&self, name: &'static str) -> Self {
        Self {
            value: self.value.and_then(|value| value.get(name)),
            path: self.path.key(name),
        }
    }

    /// Path of this cursor.
    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    /// Whether the key is missing from the input.
    pub fn is_absent(&self) -> bool {
        self.value.is_none()
    }

    /// Require an object at this position.
    pub fn object(&self, violations: &mut Violations) -> Option<&'a Map<String, Value>> {
        match self.value {
            Some(Value::Object(members)) => Some(members),
            Some(other) => {
                self.reject(violations, type_mismatch("object", other).into_messages());
                None
            }
            None => {
                violations.record(&self.path, REQUIRED);
                None
            }
        }
    }

    /// Apply `rule` to a value that must be present and non-null.
    pub fn required<R: Rule>(&self, violations: &mut Violations, rule: &R) -> Option<R::Output> {
        match self.value {
            None | Some(Value::Null) => {
                violations.record(&self.path, REQUIRED);
                None
            }
            Some(value) => self.apply(violations, rule, value),
        }
    }

    /// Apply `rule` when present; `null` is rejected.
    ///
    /// The outer `None` signals a violation, the inner one an absent key.
    pub fn optional<R: Rule>(
        &self,
        violations: &mut Violations,
        rule: &R,
    ) -> Option<Option<R::Output>> {
        match self.value {
            None => Some(None),
            Some(value) => self.apply(violations, rule, value).map(Some),
        }
    }

    /// Apply `rule` when present and non-null.
    pub fn nullable<R: Rule>(
        &self,
        violations: &mut Violations,
        rule: &R,
    ) -> Option<Option<R::Output>> {
        match self.value {
            None | Some(Value::Null) => Some(None),
            Some(value) => self.apply(violations, rule, value).map(Some),
        }
    }

    /// Apply `rule` when present, substituting `default` for an absent key.
    pub fn or_default<R: Rule>(
        &self,
        violations: &mut Violations,
        rule: &R,
        default: R::Output,
    ) -> Option<R::Output> {
        match self.value {
            None => Some(default),
            Some(value) => self.apply(violations, rule, value),
        }
    }

    /// Read a nullable column of an update request.
    pub fn patch<R: Rule>(&self, violations: &mut Violations, rule: &R) -> Option<Patch<R::Output>> {
        match self.value {
            None => Some(Patch::Keep),
            Some(Value::Null) => Some(Patch::Clear),
            Some(value) => self.apply(violations, rule, value).map(Patch::Set),
        }
    }

    /// Check a nested contract that must be present.
    pub fn nested<T: Contract>(&self, violations: &mut Violations) -> Option<T> {
        match self.value {
            None | Some(Value::Null) => {
                violations.record(&self.path, REQUIRED);
                None
            }
            Some(_) => T::check(self, violations),
        }
    }

    /// Check every element of a required array against contract `T`.
    pub fn list<T: Contract>(&self, violations: &mut Violations) -> Option<Vec<T>> {
        let elements = match self.value {
            None | Some(Value::Null) => {
                violations.record(&self.path, REQUIRED);
                return None;
            }
            Some(Value::Array(elements)) => elements,
            Some(other) => {
                self.reject(violations, type_mismatch("array", other).into_messages());
                return None;
            }
        };
        let checked: Vec<Option<T>> = elements
            .iter()
            .enumerate()
            .map(|(position, element)| {
                let item = Self {
                    value: Some(element),
                    path: self.path.index(position),
                };
                item.nested(violations)
            })
            .collect();
        checked.into_iter().collect()
    }

    /// Check an array that may be absent.
    pub fn optional_list<T: Contract>(&self, violations: &mut Violations) -> Option<Option<Vec<T>>> {
        if self.is_absent() {
            return Some(None);
        }
        self.list(violations).map(Some)
    }

    fn apply<R: Rule>(
        &self,
        violations: &mut Violations,
        rule: &R,
        value: &Value,
    ) -> Option<R::Output> {
        rule.apply(value)
            .map_err(|rejection| self.reject(violations, rejection.into_messages()))
            .ok()
    }

    fn reject(&self, violations: &mut Violations, messages: Vec<String>) {
        for message in messages {
            violations.record(&self.path, message);
        }
    }
}
