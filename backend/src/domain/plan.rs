//! Plan (next-day task) contracts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::comment::Comment;
use super::note::{NOTE_CONTENT_MAX, note_fields};
use super::primitives::RecordId;
use super::validation::{Contract, Field, Text, Violations};

const CONTENT: Text = Text::new("plan").min(1).max(NOTE_CONTENT_MAX);

/// A plan as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Plan {
    /// Plan identifier.
    pub id: RecordId,
    /// Plan text.
    #[schema(max_length = 2000)]
    pub content: String,
    /// Position within the report.
    pub display_order: u32,
    /// Manager comments, oldest first.
    pub comments: Vec<Comment>,
    /// Creation time, when loaded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Plan fields submitted on create and on update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PlanRequest {
    /// Plan text, 1–2000 characters.
    #[schema(min_length = 1, max_length = 2000)]
    pub content: String,
    /// Position within the report.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_order: Option<u32>,
}

/// Request to add a plan.
pub type CreatePlanRequest = PlanRequest;
/// Request to replace a plan.
pub type UpdatePlanRequest = PlanRequest;

impl Contract for PlanRequest {
    fn check(field: &Field<'_>, violations: &mut Violations) -> Option<Self> {
        let fields = note_fields(field, violations, &CONTENT)?;
        Some(Self {
            content: fields.content,
            display_order: fields.display_order,
        })
    }
}
