//! Customer contracts.

use pagination::PageRequest;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::listing::page_request;
use super::primitives::RecordId;
use super::validation::{Contract, Field, Flag, Patch, Pattern, Text, Violations};

/// Maximum length of a customer code.
pub const CUSTOMER_CODE_MAX: usize = 10;
/// Maximum length of a customer name.
pub const CUSTOMER_NAME_MAX: usize = 100;
/// Maximum length of a postal address.
pub const ADDRESS_MAX: usize = 255;
/// Maximum length of a phone number.
pub const PHONE_MAX: usize = 20;

static POSTAL_CODE_PATTERN: Pattern =
    Pattern::new(r"^\d{3}-\d{4}$", "postal code must use the 123-4567 format");

const CUSTOMER_CODE: Text = Text::new("customer code").min(1).max(CUSTOMER_CODE_MAX);
const NAME: Text = Text::new("customer name").min(1).max(CUSTOMER_NAME_MAX);
const INDUSTRY: Text = Text::new("industry");
static POSTAL_CODE: Text = Text::new("postal code").pattern(&POSTAL_CODE_PATTERN);
const ADDRESS: Text = Text::new("address").max(ADDRESS_MAX);
const PHONE: Text = Text::new("phone").max(PHONE_MAX);
const FILTER: Text = Text::new("filter");

/// Customer as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Customer {
    /// Customer identifier.
    pub id: RecordId,
    /// Business code, unique per customer.
    #[schema(example = "C0001")]
    pub customer_code: String,
    /// Company name.
    pub name: String,
    /// Industry classification.
    pub industry: Option<String>,
    /// Postal code in `123-4567` form.
    #[schema(example = "100-0001")]
    pub postal_code: Option<String>,
    /// Street address.
    pub address: Option<String>,
    /// Contact phone number.
    pub phone: Option<String>,
    /// Whether the customer appears in pickers.
    pub is_active: bool,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

/// Filters for the customer list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerListQuery {
    /// Requested page.
    #[serde(flatten)]
    pub page: PageRequest,
    /// Match on customer code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_code: Option<String>,
    /// Match on customer name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Match on industry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    /// Restrict to active (default) or inactive customers.
    pub is_active: bool,
}

impl Contract for CustomerListQuery {
    fn check(field: &Field<'_>, violations: &mut Violations) -> Option<Self> {
        field.object(violations)?;
        let page = page_request(field, violations);
        let customer_code = field.key("customer_code").optional(violations, &FILTER);
        let name = field.key("name").optional(violations, &FILTER);
        let industry = field.key("industry").optional(violations, &FILTER);
        let is_active = field
            .key("is_active")
            .or_default(violations, &Flag::COERCED, true);
        Some(Self {
            page: page?,
            customer_code: customer_code?,
            name: name?,
            industry: industry?,
            is_active: is_active?,
        })
    }
}

/// Request to register a customer.
///
/// An explicit `null` on an optional field reads as absent and is omitted
/// when the request is serialised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CreateCustomerRequest {
    /// Business code, 1–10 characters.
    #[schema(example = "C0001", min_length = 1, max_length = 10)]
    pub customer_code: String,
    /// Company name, 1–100 characters.
    #[schema(min_length = 1, max_length = 100)]
    pub name: String,
    /// Industry classification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    /// Postal code in `123-4567` form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(pattern = r"^\d{3}-\d{4}$")]
    pub postal_code: Option<String>,
    /// Street address, at most 255 characters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(max_length = 255)]
    pub address: Option<String>,
    /// Contact phone number, at most 20 characters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(max_length = 20)]
    pub phone: Option<String>,
    /// Defaults to `true` when omitted.
    #[serde(default = "active_by_default")]
    pub is_active: bool,
}

const fn active_by_default() -> bool {
    true
}

impl Contract for CreateCustomerRequest {
    fn check(field: &Field<'_>, violations: &mut Violations) -> Option<Self> {
        field.object(violations)?;
        let customer_code = field.key("customer_code").required(violations, &CUSTOMER_CODE);
        let name = field.key("name").required(violations, &NAME);
        let industry = field.key("industry").nullable(violations, &INDUSTRY);
        let postal_code = field.key("postal_code").nullable(violations, &POSTAL_CODE);
        let address = field.key("address").nullable(violations, &ADDRESS);
        let phone = field.key("phone").nullable(violations, &PHONE);
        let is_active = field
            .key("is_active")
            .or_default(violations, &Flag::STRICT, true);
        Some(Self {
            customer_code: customer_code?,
            name: name?,
            industry: industry?,
            postal_code: postal_code?,
            address: address?,
            phone: phone?,
            is_active: is_active?,
        })
    }
}

/// Partial update of a customer.
///
/// Nullable columns use [`Patch`] so that an explicit `null` clears the
/// stored value while an absent key leaves it unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UpdateCustomerRequest {
    /// New business code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_code: Option<String>,
    /// New company name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New industry, or `null` to clear.
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    #[schema(value_type = Option<String>)]
    pub industry: Patch<String>,
    /// New postal code, or `null` to clear.
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    #[schema(value_type = Option<String>)]
    pub postal_code: Patch<String>,
    /// New address, or `null` to clear.
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    #[schema(value_type = Option<String>)]
    pub address: Patch<String>,
    /// New phone number, or `null` to clear.
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    #[schema(value_type = Option<String>)]
    pub phone: Patch<String>,
    /// New active flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl Contract for UpdateCustomerRequest {
    fn check(field: &Field<'_>, violations: &mut Violations) -> Option<Self> {
        field.object(violations)?;
        let customer_code = field.key("customer_code").optional(violations, &CUSTOMER_CODE);
        let name = field.key("name").optional(violations, &NAME);
        let industry = field.key("industry").patch(violations, &INDUSTRY);
        let postal_code = field.key("postal_code").patch(violations, &POSTAL_CODE);
        let address = field.key("address").patch(violations, &ADDRESS);
        let phone = field.key("phone").patch(violations, &PHONE);
        let is_active = field.key("is_active").optional(violations, &Flag::STRICT);
        Some(Self {
            customer_code: customer_code?,
            name: name?,
            industry: industry?,
            postal_code: postal_code?,
            address: address?,
            phone: phone?,
            is_active: is_active?,
        })
    }
}
