//! Visit record contracts.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::macros::closed_set;
use super::primitives::{RecordId, VisitTime};
use super::validation::{Contract, Field, OneOf, Text, TimeRule, Violations, Whole};

/// Maximum length of visit notes.
pub const VISIT_CONTENT_MAX: usize = 2000;

const CUSTOMER_ID: Whole<RecordId> = Whole::positive("customer");
const VISIT_TIME: TimeRule = TimeRule::new("visit time");
const RESULT: OneOf<VisitResult> = OneOf::new();
const CONTENT: Text = Text::new("visit content").min(1).max(VISIT_CONTENT_MAX);

closed_set! {
    /// Outcome of a customer visit.
    pub enum VisitResult {
        /// Talks are ongoing.
        Negotiating => "negotiating",
        /// The deal was won.
        Closed => "closed",
        /// The customer declined.
        Rejected => "rejected",
        /// The visit only collected information.
        InfoGathering => "info_gathering",
    }
}

impl VisitResult {
    /// Human-readable label shown next to the result.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Negotiating => "Negotiating",
            Self::Closed => "Closed",
            Self::Rejected => "Rejected",
            Self::InfoGathering => "Information gathering",
        }
    }
}

/// Customer reference shown in pickers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CustomerBasic {
    /// Customer identifier.
    pub id: RecordId,
    /// Business code.
    pub customer_code: String,
    /// Company name.
    pub name: String,
}

/// Customer reference embedded in visit records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CustomerDetail {
    /// Basic customer fields.
    #[serde(flatten)]
    pub customer: CustomerBasic,
    /// Industry classification.
    pub industry: Option<String>,
}

/// A visit as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct VisitRecord {
    /// Visit identifier.
    pub id: RecordId,
    /// Visited customer.
    pub customer: CustomerDetail,
    /// Time of the visit.
    pub visit_time: Option<VisitTime>,
    /// Outcome, if recorded.
    pub result: Option<VisitResult>,
    /// Display label of `result`.
    pub result_label: Option<String>,
    /// Visit notes.
    #[schema(max_length = 2000)]
    pub content: String,
}

impl VisitRecord {
    /// Build a record, deriving `result_label` from `result`.
    pub fn new(
        id: RecordId,
        customer: CustomerDetail,
        visit_time: Option<VisitTime>,
        result: Option<VisitResult>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id,
            customer,
            visit_time,
            result,
            result_label: result.map(|result| result.label().to_owned()),
            content: content.into(),
        }
    }
}

/// Visit fields submitted on create and on update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct VisitRecordRequest {
    /// Visited customer.
    pub customer_id: RecordId,
    /// Time of the visit, `HH:MM`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visit_time: Option<VisitTime>,
    /// Outcome, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<VisitResult>,
    /// Visit notes, 1–2000 characters.
    #[schema(min_length = 1, max_length = 2000)]
    pub content: String,
}

/// Request to add a visit.
pub type CreateVisitRecordRequest = VisitRecordRequest;
/// Request to replace a visit; same constraints as creation.
pub type UpdateVisitRecordRequest = VisitRecordRequest;

impl Contract for VisitRecordRequest {
    fn check(field: &Field<'_>, violations: &mut Violations) -> Option<Self> {
        field.object(violations)?;
        let customer_id = field.key("customer_id").required(violations, &CUSTOMER_ID);
        let visit_time = field.key("visit_time").nullable(violations, &VISIT_TIME);
        let result = field.key("result").nullable(violations, &RESULT);
        let content = field.key("content").required(violations, &CONTENT);
        Some(Self {
            customer_id: customer_id?,
            visit_time: visit_time?,
            result: result?,
            content: content?,
        })
    }
}
