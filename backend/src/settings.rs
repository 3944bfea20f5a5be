//! Start-up settings read from the process environment.
//!
//! Settings are validated once, as a whole, and every problem is reported
//! together so an operator can fix a deployment in one pass. The result is an
//! explicit value handed to whatever needs it; nothing here is global.

mod parsing;

use std::fmt;
use std::num::NonZeroU32;
use std::time::Duration;

use tracing::debug;
use url::Url;
use zeroize::Zeroizing;

use crate::domain::macros::closed_set;
use parsing::Reader;

/// PostgreSQL connection string.
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";
/// Access-token signing secret.
pub const JWT_SECRET_ENV: &str = "JWT_SECRET";
/// Access-token lifetime, e.g. `1h`.
pub const JWT_EXPIRES_IN_ENV: &str = "JWT_EXPIRES_IN";
/// Refresh-token signing secret.
pub const JWT_REFRESH_SECRET_ENV: &str = "JWT_REFRESH_SECRET";
/// Refresh-token lifetime, e.g. `30d`.
pub const JWT_REFRESH_EXPIRES_IN_ENV: &str = "JWT_REFRESH_EXPIRES_IN";
/// Deployment environment name.
pub const APP_ENV_ENV: &str = "APP_ENV";
/// Public base URL of the application.
pub const APP_URL_ENV: &str = "APP_URL";
/// Password hashing cost factor.
pub const BCRYPT_ROUNDS_ENV: &str = "BCRYPT_ROUNDS";
/// Login attempts allowed per window.
pub const RATE_LIMIT_LOGIN_ENV: &str = "RATE_LIMIT_LOGIN";
/// API requests allowed per window.
pub const RATE_LIMIT_API_ENV: &str = "RATE_LIMIT_API";

/// Minimum length of either signing secret.
pub const SECRET_MIN_LEN: usize = 32;

const DEFAULT_APP_URL: &str = "http://localhost:3000";
const DEFAULT_ACCESS_TTL: Duration = Duration::from_secs(60 * 60);
const DEFAULT_REFRESH_TTL: Duration = Duration::from_secs(30 * 24 * 60 * 60);
const BCRYPT_ROUNDS_RANGE: std::ops::RangeInclusive<u32> = 4..=12;
const DEFAULT_BCRYPT_ROUNDS: u32 = 10;
const DEFAULT_RATE_LIMIT_LOGIN: u32 = 10;
const DEFAULT_RATE_LIMIT_API: u32 = 100;

/// Source of environment variables.
///
/// Implemented for every [`mockable::Env`], so production code passes
/// `mockable::DefaultEnv` and tests pass a `MockEnv`.
pub trait SettingsEnv {
    /// Read a variable; `None` when unset.
    fn string(&self, name: &str) -> Option<String>;
}

impl<T: mockable::Env> SettingsEnv for T {
    fn string(&self, name: &str) -> Option<String> {
        mockable::Env::string(self, name)
    }
}

closed_set! {
    /// Deployment environment.
    pub enum AppEnvironment {
        /// Local development.
        Development => "development",
        /// Automated tests.
        Test => "test",
        /// Live deployment.
        Production => "production",
    }
}

/// Token signing settings. Secrets are wiped from memory on drop.
pub struct JwtSettings {
    /// Access-token signing secret.
    pub secret: Zeroizing<String>,
    /// Access-token lifetime.
    pub expires_in: Duration,
    /// Refresh-token signing secret.
    pub refresh_secret: Zeroizing<String>,
    /// Refresh-token lifetime.
    pub refresh_expires_in: Duration,
}

impl fmt::Debug for JwtSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtSettings")
            .field("secret", &"<redacted>")
            .field("expires_in", &self.expires_in)
            .field("refresh_secret", &"<redacted>")
            .field("refresh_expires_in", &self.refresh_expires_in)
            .finish()
    }
}

/// Validated application settings.
#[derive(Debug)]
pub struct AppSettings {
    /// Database connection string.
    pub database_url: Url,
    /// Token signing settings.
    pub jwt: JwtSettings,
    /// Deployment environment.
    pub environment: AppEnvironment,
    /// Public base URL.
    pub app_url: Url,
    /// Password hashing cost factor, 4–12.
    pub bcrypt_rounds: u32,
    /// Login attempts allowed per window.
    pub rate_limit_login: NonZeroU32,
    /// API requests allowed per window.
    pub rate_limit_api: NonZeroU32,
}

/// One invalid or missing variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsIssue {
    /// A required variable is unset or empty.
    Missing {
        /// Variable name.
        name: &'static str,
    },
    /// A variable holds a value of the wrong shape.
    Invalid {
        /// Variable name.
        name: &'static str,
        /// Offending value.
        value: String,
        /// Accepted form.
        expected: &'static str,
    },
    /// A secret is shorter than [`SECRET_MIN_LEN`]; its value is withheld.
    SecretTooShort {
        /// Variable name.
        name: &'static str,
        /// Observed length.
        length: usize,
    },
}

impl SettingsIssue {
    /// Name of the variable at fault.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Missing { name } | Self::Invalid { name, .. } | Self::SecretTooShort { name, .. } => {
                name
            }
        }
    }
}

impl fmt::Display for SettingsIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { name } => write!(f, "missing required environment variable: {name}"),
            Self::Invalid {
                name,
                value,
                expected,
            } => write!(f, "invalid value for {name}='{value}'; expected {expected}"),
            Self::SecretTooShort { name, length } => write!(
                f,
                "{name} too short: need >= {SECRET_MIN_LEN} characters, got {length}"
            ),
        }
    }
}

/// Every problem found while reading the settings. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid configuration: {}", join_issues(.issues))]
pub struct SettingsError {
    issues: Vec<SettingsIssue>,
}

impl SettingsError {
    /// Problems in the order the variables were read.
    pub fn issues(&self) -> &[SettingsIssue] {
        &self.issues
    }
}

fn join_issues(issues: &[SettingsIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl AppSettings {
    /// Read and validate every setting from `env`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] listing every missing or invalid variable.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mockable::MockEnv;
    /// use sales_report::settings::AppSettings;
    ///
    /// let mut env = MockEnv::new();
    /// env.expect_string().returning(|name| match name {
    ///     "DATABASE_URL" => Some("postgres://localhost/sales".to_owned()),
    ///     "JWT_SECRET" | "JWT_REFRESH_SECRET" => Some("s".repeat(32)),
    ///     _ => None,
    /// });
    ///
    /// let settings = AppSettings::from_env(&env).expect("valid settings");
    /// assert_eq!(settings.bcrypt_rounds, 10);
    /// ```
    pub fn from_env<E: SettingsEnv>(env: &E) -> Result<Self, SettingsError> {
        let mut reader = Reader::new(env);
        let database_url = reader.required_url(DATABASE_URL_ENV);
        let secret = reader.secret(JWT_SECRET_ENV);
        let expires_in = reader.duration_or(JWT_EXPIRES_IN_ENV, DEFAULT_ACCESS_TTL);
        let refresh_secret = reader.secret(JWT_REFRESH_SECRET_ENV);
        let refresh_expires_in =
            reader.duration_or(JWT_REFRESH_EXPIRES_IN_ENV, DEFAULT_REFRESH_TTL);
        let environment = reader.environment_or(APP_ENV_ENV, AppEnvironment::Development);
        let app_url = reader.url_or(APP_URL_ENV, DEFAULT_APP_URL);
        let bcrypt_rounds =
            reader.bounded_or(BCRYPT_ROUNDS_ENV, BCRYPT_ROUNDS_RANGE, DEFAULT_BCRYPT_ROUNDS);
        let rate_limit_login = reader.positive_or(RATE_LIMIT_LOGIN_ENV, DEFAULT_RATE_LIMIT_LOGIN);
        let rate_limit_api = reader.positive_or(RATE_LIMIT_API_ENV, DEFAULT_RATE_LIMIT_API);

        let issues = reader.into_issues();
        let settings = match (
            database_url,
            secret,
            expires_in,
            refresh_secret,
            refresh_expires_in,
            environment,
            app_url,
            bcrypt_rounds,
            rate_limit_login,
            rate_limit_api,
        ) {
            (
                Some(database_url),
                Some(secret),
                Some(expires_in),
                Some(refresh_secret),
                Some(refresh_expires_in),
                Some(environment),
                Some(app_url),
                Some(bcrypt_rounds),
                Some(rate_limit_login),
                Some(rate_limit_api),
            ) if issues.is_empty() => Self {
                database_url,
                jwt: JwtSettings {
                    secret,
                    expires_in,
                    refresh_secret,
                    refresh_expires_in,
                },
                environment,
                app_url,
                bcrypt_rounds,
                rate_limit_login,
                rate_limit_api,
            },
            _ => return Err(SettingsError { issues }),
        };
        debug!(
            environment = %settings.environment,
            app_url = %settings.app_url,
            "settings loaded"
        );
        Ok(settings)
    }

    /// Whether the application runs in production.
    pub fn is_production(&self) -> bool {
        self.environment == AppEnvironment::Production
    }
}

#[cfg(test)]
mod tests;
