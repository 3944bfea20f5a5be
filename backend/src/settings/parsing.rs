//! Variable readers that collect issues instead of stopping at the first.

use std::num::NonZeroU32;
use std::ops::RangeInclusive;
use std::time::Duration;

use tracing::debug;
use url::Url;
use zeroize::Zeroizing;

use super::{AppEnvironment, SECRET_MIN_LEN, SettingsEnv, SettingsIssue};
use crate::domain::validation::ClosedSet;

const URL_EXPECTED: &str = "an absolute URL";
const DURATION_EXPECTED: &str = "a positive duration such as 30s, 15m, 1h, or 30d";
const ROUNDS_EXPECTED: &str = "an integer between 4 and 12";
const POSITIVE_EXPECTED: &str = "a positive integer";
const ENVIRONMENT_EXPECTED: &str = "development|test|production";

/// Parse `<digits><unit>` with unit `s`, `m`, `h`, or `d`.
///
/// Zero and overflowing durations are rejected.
pub(super) fn parse_duration(raw: &str) -> Option<Duration> {
    let split = raw.len().checked_sub(1)?;
    let (amount, unit) = (raw.get(..split)?, raw.get(split..)?);
    if amount.is_empty() || !amount.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    let amount: u64 = amount.parse().ok()?;
    let scale: u64 = match unit {
        "s" => 1,
        "m" => 60,
        "h" => 60 * 60,
        "d" => 24 * 60 * 60,
        _ => return None,
    };
    amount
        .checked_mul(scale)
        .filter(|seconds| *seconds > 0)
        .map(Duration::from_secs)
}

pub(super) struct Reader<'a, E> {
    env: &'a E,
    issues: Vec<SettingsIssue>,
}

impl<'a, E: SettingsEnv> Reader<'a, E> {
    pub(super) fn new(env: &'a E) -> Self {
        Self {
            env,
            issues: Vec::new(),
        }
    }

    pub(super) fn into_issues(self) -> Vec<SettingsIssue> {
        self.issues
    }

    /// Read a variable, treating an empty value as unset.
    fn raw(&self, name: &'static str) -> Option<String> {
        self.env.string(name).filter(|value| !value.is_empty())
    }

    fn invalid(&mut self, name: &'static str, value: String, expected: &'static str) {
        self.issues.push(SettingsIssue::Invalid {
            name,
            value,
            expected,
        });
    }

    fn parsed_or<T>(
        &mut self,
        name: &'static str,
        default: T,
        expected: &'static str,
        parse: impl FnOnce(&str) -> Option<T>,
    ) -> Option<T> {
        let Some(value) = self.raw(name) else {
            debug!(variable = name, "using default");
            return Some(default);
        };
        let parsed = parse(&value);
        if parsed.is_none() {
            self.invalid(name, value, expected);
        }
        parsed
    }

    pub(super) fn required_url(&mut self, name: &'static str) -> Option<Url> {
        let Some(value) = self.raw(name) else {
            self.issues.push(SettingsIssue::Missing { name });
            return None;
        };
        match Url::parse(&value) {
            Ok(url) => Some(url),
            Err(_) => {
                self.invalid(name, value, URL_EXPECTED);
                None
            }
        }
    }

    pub(super) fn url_or(&mut self, name: &'static str, default: &str) -> Option<Url> {
        let Some(value) = self.raw(name) else {
            return Url::parse(default).ok();
        };
        match Url::parse(&value) {
            Ok(url) => Some(url),
            Err(_) => {
                self.invalid(name, value, URL_EXPECTED);
                None
            }
        }
    }

    pub(super) fn secret(&mut self, name: &'static str) -> Option<Zeroizing<String>> {
        let Some(value) = self.raw(name) else {
            self.issues.push(SettingsIssue::Missing { name });
            return None;
        };
        let secret = Zeroizing::new(value);
        let length = secret.chars().count();
        if length < SECRET_MIN_LEN {
            self.issues.push(SettingsIssue::SecretTooShort { name, length });
            return None;
        }
        Some(secret)
    }

    pub(super) fn duration_or(&mut self, name: &'static str, default: Duration) -> Option<Duration> {
        self.parsed_or(name, default, DURATION_EXPECTED, parse_duration)
    }

    pub(super) fn environment_or(
        &mut self,
        name: &'static str,
        default: AppEnvironment,
    ) -> Option<AppEnvironment> {
        self.parsed_or(name, default, ENVIRONMENT_EXPECTED, AppEnvironment::from_tag)
    }

    pub(super) fn bounded_or(
        &mut self,
        name: &'static str,
        range: RangeInclusive<u32>,
        default: u32,
    ) -> Option<u32> {
        self.parsed_or(name, default, ROUNDS_EXPECTED, |value| {
            value.parse().ok().filter(|rounds| range.contains(rounds))
        })
    }

    pub(super) fn positive_or(&mut self, name: &'static str, default: u32) -> Option<NonZeroU32> {
        let default = NonZeroU32::new(default)?;
        self.parsed_or(name, default, POSITIVE_EXPECTED, |value| value.parse().ok())
    }
}
