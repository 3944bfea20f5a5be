//! Salesperson contracts.
//!
//! A salesperson may name another salesperson as their manager; the
//! resulting hierarchy is not checked for cycles here.

use std::fmt;

use pagination::PageRequest;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::listing::page_request;
use super::primitives::{EmailAddress, RecordId};
use super::validation::{Contract, EmailRule, Field, Flag, Patch, Text, Violations, Whole};

/// Minimum password length.
pub const PASSWORD_MIN: usize = 8;
/// Maximum password length.
pub const PASSWORD_MAX: usize = 128;

const EMPLOYEE_CODE: Text = Text::new("employee code").min(1).max(10);
const NAME: Text = Text::new("name").min(1).max(50);
const EMAIL: EmailRule = EmailRule::new("email");
const PASSWORD: Text = Text::new("password").min(PASSWORD_MIN).max(PASSWORD_MAX);
const DEPARTMENT: Text = Text::new("department").min(1);
const MANAGER_ID: Whole<RecordId> = Whole::positive("manager");
const FILTER: Text = Text::new("filter");

/// Manager reference embedded in salesperson payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Manager {
    /// Manager's salesperson identifier.
    pub id: RecordId,
    /// Manager's name.
    pub name: String,
}

/// Salesperson as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Salesperson {
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
    /// Direct manager, if any.
    pub manager: Option<Manager>,
    /// Whether the account may log in.
    pub is_active: bool,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

/// The signed-in salesperson, with hierarchy details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SalespersonMe {
    /// Common salesperson fields.
    #[serde(flatten)]
    pub salesperson: Salesperson,
    /// Whether anyone reports to this salesperson.
    pub is_manager: bool,
    /// Number of direct reports.
    pub subordinate_count: u32,
}

/// Direct report of a manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Subordinate {
    /// Salesperson identifier.
    pub id: RecordId,
    /// Employee number.
    pub employee_code: String,
    /// Full name.
    pub name: String,
    /// Login email address.
    pub email: EmailAddress,
    /// Department name.
    pub department: String,
    /// Whether the account may log in.
    pub is_active: bool,
}

/// Filters for the salesperson list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalespersonListQuery {
    /// Requested page.
    #[serde(flatten)]
    pub page: PageRequest,
    /// Match on employee number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_code: Option<String>,
    /// Match on name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Match on department.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    /// Restrict to active (default) or inactive accounts.
    pub is_active: bool,
}

impl Contract for SalespersonListQuery {
    fn check(field: &Field<'_>, violations: &mut Violations) -> Option<Self> {
        field.object(violations)?;
        let page = page_request(field, violations);
        let employee_code = field.key("employee_code").optional(violations, &FILTER);
        let name = field.key("name").optional(violations, &FILTER);
        let department = field.key("department").optional(violations, &FILTER);
        let is_active = field
            .key("is_active")
            .or_default(violations, &Flag::COERCED, true);
        Some(Self {
            page: page?,
            employee_code: employee_code?,
            name: name?,
            department: department?,
            is_active: is_active?,
        })
    }
}

/// Request to register a salesperson.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CreateSalespersonRequest {
    /// Employee number, 1–10 characters.
    #[schema(min_length = 1, max_length = 10)]
    pub employee_code: String,
    /// Full name, 1–50 characters.
    #[schema(min_length = 1, max_length = 50)]
    pub name: String,
    /// Login email address.
    pub email: EmailAddress,
    /// Initial password, 8–128 characters.
    #[schema(min_length = 8, max_length = 128, format = Password)]
    pub password: String,
    /// Department name.
    #[schema(min_length = 1)]
    pub department: String,
    /// Direct manager.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager_id: Option<RecordId>,
    /// Defaults to `true` when omitted.
    #[serde(default = "active_by_default")]
    pub is_active: bool,
}

const fn active_by_default() -> bool {
    true
}

impl fmt::Debug for CreateSalespersonRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreateSalespersonRequest")
            .field("employee_code", &self.employee_code)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("department", &self.department)
            .field("manager_id", &self.manager_id)
            .field("is_active", &self.is_active)
            .finish()
    }
}

impl Contract for CreateSalespersonRequest {
    fn check(field: &Field<'_>, violations: &mut Violations) -> Option<Self> {
        field.object(violations)?;
        let employee_code = field.key("employee_code").required(violations, &EMPLOYEE_CODE);
        let name = field.key("name").required(violations, &NAME);
        let email = field.key("email").required(violations, &EMAIL);
        let password = field.key("password").required(violations, &PASSWORD);
        let department = field.key("department").required(violations, &DEPARTMENT);
        let manager_id = field.key("manager_id").nullable(violations, &MANAGER_ID);
        let is_active = field
            .key("is_active")
            .or_default(violations, &Flag::STRICT, true);
        Some(Self {
            employee_code: employee_code?,
            name: name?,
            email: email?,
            password: password?,
            department: department?,
            manager_id: manager_id?,
            is_active: is_active?,
        })
    }
}

/// Partial update of a salesperson.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UpdateSalespersonRequest {
    /// New employee number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_code: Option<String>,
    /// New name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New email address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<EmailAddress>,
    /// New password, 8–128 characters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(min_length = 8, max_length = 128, format = Password)]
    pub password: Option<String>,
    /// New department.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    /// New manager, or `null` to detach.
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    #[schema(value_type = Option<u64>)]
    pub manager_id: Patch<RecordId>,
    /// New active flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl fmt::Debug for UpdateSalespersonRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdateSalespersonRequest")
            .field("employee_code", &self.employee_code)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("department", &self.department)
            .field("manager_id", &self.manager_id)
            .field("is_active", &self.is_active)
            .finish()
    }
}

impl Contract for UpdateSalespersonRequest {
    fn check(field: &Field<'_>, violations: &mut Violations) -> Option<Self> {
        field.object(violations)?;
        let employee_code = field.key("employee_code").optional(violations, &EMPLOYEE_CODE);
        let name = field.key("name").optional(violations, &NAME);
        let email = field.key("email").optional(violations, &EMAIL);
        let password = field.key("password").optional(violations, &PASSWORD);
        let department = field.key("department").optional(violations, &DEPARTMENT);
        let manager_id = field.key("manager_id").patch(violations, &MANAGER_ID);
        let is_active = field.key("is_active").optional(violations, &Flag::STRICT);
        Some(Self {
            employee_code: employee_code?,
            name: name?,
            email: email?,
            password: password?,
            department: department?,
            manager_id: manager_id?,
            is_active: is_active?,
        })
    }
}

#[cfg(test)]
mod tests {
    //! Salesperson contract checks.

    use super::*;
    use crate::domain::validation::{validate_body, validate_query};
    use rstest::{fixture, rstest};
    use serde_json::{Value, json};

    #[fixture]
    fn new_salesperson() -> Value {
        json!({
            "employee_code": "E0001",
            "name": "Yamada Taro",
            "email": "yamada@example.com",
            "password": "password123",
            "department": "Sales 1"
        })
    }

    #[rstest]
    fn create_applies_defaults(new_salesperson: Value) {
        let request: CreateSalespersonRequest =
            validate_body(&new_salesperson).expect("valid salesperson");
        assert!(request.is_active);
        assert_eq!(request.manager_id, None);
    }

    #[rstest]
    #[case(7, false)]
    #[case(8, true)]
    #[case(128, true)]
    #[case(129, false)]
    fn create_password_bounds(
        mut new_salesperson: Value,
        #[case] length: usize,
        #[case] accepted: bool,
    ) {
        new_salesperson["password"] = json!("x".repeat(length));
        let result = validate_body::<CreateSalespersonRequest>(&new_salesperson);
        assert_eq!(result.is_ok(), accepted);
    }

    #[rstest]
    #[case(json!(0))]
    #[case(json!(-3))]
    #[case(json!("2"))]
    fn create_rejects_bad_manager(mut new_salesperson: Value, #[case] manager_id: Value) {
        new_salesperson["manager_id"] = manager_id;
        let errors = validate_body::<CreateSalespersonRequest>(&new_salesperson)
            .expect_err("invalid manager");
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["manager_id"]);
    }

    #[rstest]
    fn create_accepts_null_manager(mut new_salesperson: Value) {
        new_salesperson["manager_id"] = Value::Null;
        let request: CreateSalespersonRequest =
            validate_body(&new_salesperson).expect("null manager");
        assert_eq!(request.manager_id, None);
    }

    #[rstest]
    fn update_checks_password_when_present() {
        let errors = validate_body::<UpdateSalespersonRequest>(&json!({"password": "short"}))
            .expect_err("short password");
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["password"]);
        let empty: UpdateSalespersonRequest = validate_body(&json!({})).expect("empty update");
        assert_eq!(empty, UpdateSalespersonRequest::default());
    }

    #[rstest]
    fn update_detaches_manager_on_null() {
        let request: UpdateSalespersonRequest =
            validate_body(&json!({"manager_id": null})).expect("detach");
        assert_eq!(request.manager_id, Patch::Clear);
    }

    #[rstest]
    fn debug_output_hides_password(new_salesperson: Value) {
        let request: CreateSalespersonRequest =
            validate_body(&new_salesperson).expect("valid salesperson");
        assert!(!format!("{request:?}").contains("password123"));
    }

    #[rstest]
    fn list_query_defaults() {
        let query: SalespersonListQuery = validate_query(&json!({"department": "Sales 1"}))
            .expect("valid query");
        assert!(query.is_active);
        assert_eq!(query.page.per_page(), 20);
        assert_eq!(query.department.as_deref(), Some("Sales 1"));
    }

    #[rstest]
    fn me_flattens_salesperson_fields() {
        let me: SalespersonMe = serde_json::from_value(json!({
            "id": 2,
            "employee_code": "E0002",
            "name": "Sato",
            "email": "sato@example.com",
            "department": "Sales 1",
            "manager": {"id": 1, "name": "Suzuki"},
            "is_active": true,
            "created_at": "2024-01-15T09:00:00Z",
            "updated_at": "2024-01-15T09:00:00Z",
            "is_manager": false,
            "subordinate_count": 0
        }))
        .expect("valid payload");
        assert_eq!(me.salesperson.manager.map(|manager| manager.name), Some("Suzuki".to_owned()));
    }
}
