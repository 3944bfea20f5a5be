//! Login, refresh, and logout payloads.

use std::fmt;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::macros::closed_set;
use super::primitives::{EmailAddress, RecordId};
use super::validation::{Contract, EmailRule, Field, Text, Violations};

const EMAIL: EmailRule = EmailRule::new("email");
const PASSWORD: Text = Text::new("password").min(1);
const REFRESH_TOKEN: Text = Text::new("refresh token").min(1);

/// Credentials submitted to log in.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    /// Account email address.
    pub email: EmailAddress,
    /// Plain-text password; never logged.
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Contract for LoginRequest {
    fn check(field: &Field<'_>, violations: &mut Violations) -> Option<Self> {
        field.object(violations)?;
        let email = field.key("email").required(violations, &EMAIL);
        let password = field.key("password").required(violations, &PASSWORD);
        Some(Self {
            email: email?,
            password: password?,
        })
    }
}

/// Request to exchange a refresh token for a new access token.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RefreshRequest {
    /// Refresh token issued at login.
    pub refresh_token: String,
}

impl fmt::Debug for RefreshRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefreshRequest")
            .field("refresh_token", &"<redacted>")
            .finish()
    }
}

impl Contract for RefreshRequest {
    fn check(field: &Field<'_>, violations: &mut Violations) -> Option<Self> {
        field.object(violations)?;
        let refresh_token = field.key("refresh_token").required(violations, &REFRESH_TOKEN);
        Some(Self {
            refresh_token: refresh_token?,
        })
    }
}

closed_set! {
    /// Token scheme; only bearer tokens are issued.
    pub enum TokenType {
        /// `Authorization: Bearer <token>`.
        Bearer => "Bearer",
    }
}

/// Authenticated user summary embedded in the login response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AuthUser {
    /// Salesperson identifier.
    pub id: RecordId,
    /// Employee number.
    #[schema(example = "E0001")]
    pub employee_code: String,
    /// Full name.
    pub name: String,
    /// Login email address.
    pub email: EmailAddress,
    /// Department name.
    pub department: String,
    /// Whether the user manages at least one salesperson.
    pub is_manager: bool,
}

/// Tokens issued by a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LoginResponseData {
    /// Short-lived access token.
    pub access_token: String,
    /// Long-lived refresh token.
    pub refresh_token: String,
    /// Always `Bearer`.
    pub token_type: TokenType,
    /// Access token lifetime in seconds.
    #[schema(value_type = u32, minimum = 1, example = 3600)]
    pub expires_in: NonZeroU32,
    /// The authenticated user.
    pub user: AuthUser,
}

impl LoginResponseData {
    /// Build a bearer-token login response.
    pub fn bearer(
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
        expires_in: NonZeroU32,
        user: AuthUser,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
            token_type: TokenType::Bearer,
            expires_in,
            user,
        }
    }
}

/// Access token issued by a successful refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RefreshResponseData {
    /// Short-lived access token.
    pub access_token: String,
    /// Always `Bearer`.
    pub token_type: TokenType,
    /// Access token lifetime in seconds.
    #[schema(value_type = u32, minimum = 1, example = 3600)]
    pub expires_in: NonZeroU32,
}

impl RefreshResponseData {
    /// Build a bearer-token refresh response.
    pub fn bearer(access_token: impl Into<String>, expires_in: NonZeroU32) -> Self {
        Self {
            access_token: access_token.into(),
            token_type: TokenType::Bearer,
            expires_in,
        }
    }
}
