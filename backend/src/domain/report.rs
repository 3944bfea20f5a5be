//! Daily report contracts.
//!
//! A report belongs to one salesperson and one calendar date, moves through
//! `draft → submitted → confirmed`, and owns ordered visits, problems, and
//! plans. The composite create and update requests live in [`composite`].

mod composite;

use chrono::{DateTime, NaiveDate, Utc};
use pagination::PageRequest;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::listing::page_request;
use super::macros::closed_set;
use super::primitives::RecordId;
use super::salesperson::Manager;
use super::validation::{Contract, DateRule, Field, OneOf, Violations, Whole};

pub use composite::{
    CreateReportRequest, ItemChange, PlanChange, ProblemChange, ReportDetail, UpdateReportRequest,
    VisitChange,
};

const SALESPERSON_ID: Whole<RecordId> = Whole::positive("salesperson").coerced();
const STATUS: OneOf<ReportStatus> = OneOf::new();
const SCOPE: OneOf<ReportScope> = OneOf::new();
const DATE_FROM: DateRule = DateRule::new("start date");
const DATE_TO: DateRule = DateRule::new("end date");

closed_set! {
    /// Workflow state of a daily report.
    pub enum ReportStatus {
        /// Still being written.
        Draft => "draft",
        /// Sent to the manager.
        Submitted => "submitted",
        /// Reviewed by the manager.
        Confirmed => "confirmed",
    }
}

closed_set! {
    /// Whose reports a list request covers.
    pub enum ReportScope {
        /// The caller's own reports.
        Own => "own",
        /// Reports of the caller's direct reports.
        Subordinates => "subordinates",
    }
}

impl Default for ReportScope {
    fn default() -> Self {
        Self::Own
    }
}

closed_set! {
    /// Status literal carried by a submit response.
    pub enum SubmittedStatus {
        /// Always `submitted`.
        Submitted => "submitted",
    }
}

closed_set! {
    /// Status literal carried by a confirm response.
    pub enum ConfirmedStatus {
        /// Always `confirmed`.
        Confirmed => "confirmed",
    }
}

/// Salesperson reference shown in report lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SalespersonBasic {
    /// Salesperson identifier.
    pub id: RecordId,
    /// Salesperson name.
    pub name: String,
}

/// Salesperson reference shown on a report page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SalespersonDetail {
    /// Salesperson identifier.
    pub id: RecordId,
    /// Employee number.
    pub employee_code: String,
    /// Salesperson name.
    pub name: String,
    /// Department name.
    pub department: String,
    /// Direct manager, if any.
    pub manager: Option<Manager>,
}

/// Row of the report list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ReportListItem {
    /// Report identifier.
    pub id: RecordId,
    /// Reported day.
    pub report_date: NaiveDate,
    /// Workflow state.
    pub status: ReportStatus,
    /// When the report was submitted.
    pub submitted_at: Option<DateTime<Utc>>,
    /// Number of visits recorded.
    pub visit_count: u32,
    /// Author.
    pub salesperson: SalespersonBasic,
    /// Whether comments exist that the viewer has not read.
    pub has_unread_comments: bool,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

/// Filters for the report list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportListQuery {
    /// Requested page.
    #[serde(flatten)]
    pub page: PageRequest,
    /// Restrict to one author.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salesperson_id: Option<RecordId>,
    /// Restrict to one workflow state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ReportStatus>,
    /// First day included.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_from: Option<NaiveDate>,
    /// Last day included.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_to: Option<NaiveDate>,
    /// Whose reports to list; `own` when omitted.
    #[serde(default)]
    pub scope: ReportScope,
}

impl Contract for ReportListQuery {
    fn check(field: &Field<'_>, violations: &mut Violations) -> Option<Self> {
        field.object(violations)?;
        let page = page_request(field, violations);
        let salesperson_id = field
            .key("salesperson_id")
            .optional(violations, &SALESPERSON_ID);
        let status = field.key("status").optional(violations, &STATUS);
        let date_from = field.key("date_from").optional(violations, &DATE_FROM);
        let date_to = field.key("date_to").optional(violations, &DATE_TO);
        let scope = field
            .key("scope")
            .or_default(violations, &SCOPE, ReportScope::Own);
        Some(Self {
            page: page?,
            salesperson_id: salesperson_id?,
            status: status?,
            date_from: date_from?,
            date_to: date_to?,
            scope: scope?,
        })
    }
}

/// Response to a successful submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SubmitReportResponse {
    /// Report identifier.
    pub id: RecordId,
    /// Always `submitted`.
    pub status: SubmittedStatus,
    /// Submission time.
    pub submitted_at: DateTime<Utc>,
}

impl SubmitReportResponse {
    /// Build the response for a report submitted at `submitted_at`.
    pub fn new(id: RecordId, submitted_at: DateTime<Utc>) -> Self {
        Self {
            id,
            status: SubmittedStatus::Submitted,
            submitted_at,
        }
    }
}

/// Response to a successful confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ConfirmReportResponse {
    /// Report identifier.
    pub id: RecordId,
    /// Always `confirmed`.
    pub status: ConfirmedStatus,
    /// Confirmation time.
    pub confirmed_at: DateTime<Utc>,
}

impl ConfirmReportResponse {
    /// Build the response for a report confirmed at `confirmed_at`.
    pub fn new(id: RecordId, confirmed_at: DateTime<Utc>) -> Self {
        Self {
            id,
            status: ConfirmedStatus::Confirmed,
            confirmed_at,
        }
    }
}

#[cfg(test)]
mod tests;
