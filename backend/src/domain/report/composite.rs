//! Report create, update, and detail payloads with their nested items.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use utoipa::ToSchema;

use super::{ReportStatus, SalespersonDetail};
use crate::domain::plan::{Plan, PlanRequest};
use crate::domain::primitives::RecordId;
use crate::domain::problem::{Problem, ProblemRequest};
use crate::domain::validation::{Contract, DateRule, Field, Violations, Whole};
use crate::domain::visit::{VisitRecord, VisitRecordRequest};

const REPORT_DATE: DateRule = DateRule::new("report date");
const ITEM_ID: Whole<RecordId> = Whole::positive("item id");

/// A report with its visits, problems, and plans resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ReportDetail {
    /// Report identifier.
    pub id: RecordId,
    /// Reported day.
    pub report_date: NaiveDate,
    /// Workflow state.
    pub status: ReportStatus,
    /// When the report was submitted.
    pub submitted_at: Option<DateTime<Utc>>,
    /// Author with their manager.
    pub salesperson: SalespersonDetail,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
    /// Visits in display order.
    pub visits: Vec<VisitRecord>,
    /// Problems in display order.
    pub problems: Vec<Problem>,
    /// Plans in display order.
    pub plans: Vec<Plan>,
}

/// Request to create a report together with its items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CreateReportRequest {
    /// Reported day, `YYYY-MM-DD`.
    #[schema(example = "2024-01-15")]
    pub report_date: NaiveDate,
    /// Visits; empty when omitted.
    #[serde(default)]
    pub visits: Vec<VisitRecordRequest>,
    /// Problems; empty when omitted.
    #[serde(default)]
    pub problems: Vec<ProblemRequest>,
    /// Plans; empty when omitted.
    #[serde(default)]
    pub plans: Vec<PlanRequest>,
}

impl Contract for CreateReportRequest {
    fn check(field: &Field<'_>, violations: &mut Violations) -> Option<Self> {
        field.object(violations)?;
        let report_date = field.key("report_date").required(violations, &REPORT_DATE);
        let visits = field.key("visits").optional_list(violations);
        let problems = field.key("problems").optional_list(violations);
        let plans = field.key("plans").optional_list(violations);
        Some(Self {
            report_date: report_date?,
            visits: visits?.unwrap_or_default(),
            problems: problems?.unwrap_or_default(),
            plans: plans?.unwrap_or_default(),
        })
    }
}

/// What an update request asks for one nested item.
///
/// Items without an `id` are new; items with one replace the stored item.
/// Stored items missing from the list are not implied to be deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemChange<T> {
    /// Insert a new item.
    Create(T),
    /// Replace the item with identifier `id`.
    Update {
        /// Existing item.
        id: RecordId,
        /// Replacement fields.
        item: T,
    },
}

impl<T> ItemChange<T> {
    /// Identifier of the item being replaced, if any.
    pub const fn id(&self) -> Option<RecordId> {
        match self {
            Self::Create(_) => None,
            Self::Update { id, .. } => Some(*id),
        }
    }

    /// Submitted fields.
    pub const fn item(&self) -> &T {
        match self {
            Self::Create(item) | Self::Update { item, .. } => item,
        }
    }

    /// Take the submitted fields.
    pub fn into_item(self) -> T {
        match self {
            Self::Create(item) | Self::Update { item, .. } => item,
        }
    }
}

impl<T: Contract> Contract for ItemChange<T> {
    fn check(field: &Field<'_>, violations: &mut Violations) -> Option<Self> {
        let id = field.key("id").optional(violations, &ITEM_ID);
        let item = T::check(field, violations);
        Some(match id? {
            Some(id) => Self::Update { id, item: item? },
            None => Self::Create(item?),
        })
    }
}

#[derive(Serialize)]
struct ItemChangeRef<'a, T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<RecordId>,
    #[serde(flatten)]
    item: &'a T,
}

#[derive(Deserialize)]
struct ItemChangeBody<T> {
    #[serde(default)]
    id: Option<RecordId>,
    #[serde(flatten)]
    item: T,
}

impl<T: Serialize> Serialize for ItemChange<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ItemChangeRef {
            id: self.id(),
            item: self.item(),
        }
        .serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for ItemChange<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let ItemChangeBody { id, item } = ItemChangeBody::deserialize(deserializer)?;
        Ok(match id {
            Some(id) => Self::Update { id, item },
            None => Self::Create(item),
        })
    }
}

/// Wire form of a visit inside an update request.
#[derive(Serialize, ToSchema)]
pub struct VisitChange {
    /// Existing visit to replace; omit to add a visit.
    id: Option<RecordId>,
    #[serde(flatten)]
    item: VisitRecordRequest,
}

/// Wire form of a problem inside an update request.
#[derive(Serialize, ToSchema)]
pub struct ProblemChange {
    /// Existing problem to replace; omit to add a problem.
    id: Option<RecordId>,
    #[serde(flatten)]
    item: ProblemRequest,
}

/// Wire form of a plan inside an update request.
#[derive(Serialize, ToSchema)]
pub struct PlanChange {
    /// Existing plan to replace; omit to add a plan.
    id: Option<RecordId>,
    #[serde(flatten)]
    item: PlanRequest,
}

/// Request to edit a report's items.
///
/// Absent lists leave the stored items untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UpdateReportRequest {
    /// Visits to add or replace.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Vec<VisitChange>>)]
    pub visits: Option<Vec<ItemChange<VisitRecordRequest>>>,
    /// Problems to add or replace.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Vec<ProblemChange>>)]
    pub problems: Option<Vec<ItemChange<ProblemRequest>>>,
    /// Plans to add or replace.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Vec<PlanChange>>)]
    pub plans: Option<Vec<ItemChange<PlanRequest>>>,
}

impl Contract for UpdateReportRequest {
    fn check(field: &Field<'_>, violations: &mut Violations) -> Option<Self> {
        field.object(violations)?;
        let visits = field.key("visits").optional_list(violations);
        let problems = field.key("problems").optional_list(violations);
        let plans = field.key("plans").optional_list(violations);
        Some(Self {
            visits: visits?,
            problems: problems?,
            plans: plans?,
        })
    }
}
