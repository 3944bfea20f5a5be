//! Comment contracts.
//!
//! Managers comment on a problem or a plan. On the wire the target is the
//! pair `commentable_type` + `commentable_id`; in Rust it is a
//! [`CommentTarget`] so the pair cannot disagree.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::macros::closed_set;
use super::primitives::RecordId;
use super::validation::{Contract, Field, OneOf, Text, Violations, Whole};

/// Maximum length of a comment.
pub const COMMENT_CONTENT_MAX: usize = 1000;

const COMMENTABLE_TYPE: OneOf<CommentableType> = OneOf::new();
const COMMENTABLE_ID: Whole<RecordId> = Whole::positive("comment target");
const CONTENT: Text = Text::new("comment").min(1).max(COMMENT_CONTENT_MAX);

closed_set! {
    /// Kind of record a comment is attached to.
    pub enum CommentableType {
        /// A report problem.
        Problem => "Problem",
        /// A report plan.
        Plan => "Plan",
    }
}

/// Record a comment is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommentTarget {
    /// Comment on a problem.
    Problem(RecordId),
    /// Comment on a plan.
    Plan(RecordId),
}

impl CommentTarget {
    /// Pair a type tag with an identifier.
    pub const fn new(kind: CommentableType, id: RecordId) -> Self {
        match kind {
            CommentableType::Problem => Self::Problem(id),
            CommentableType::Plan => Self::Plan(id),
        }
    }

    /// Type tag of the target.
    pub const fn kind(self) -> CommentableType {
        match self {
            Self::Problem(_) => CommentableType::Problem,
            Self::Plan(_) => CommentableType::Plan,
        }
    }

    /// Identifier of the target.
    pub const fn id(self) -> RecordId {
        match self {
            Self::Problem(id) | Self::Plan(id) => id,
        }
    }
}

/// Author of a comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Commenter {
    /// Salesperson identifier.
    pub id: RecordId,
    /// Salesperson name.
    pub name: String,
}

/// A comment as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Comment {
    /// Comment identifier.
    pub id: RecordId,
    /// Comment text.
    #[schema(max_length = 1000)]
    pub content: String,
    /// Author.
    pub commenter: Commenter,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

/// Request to comment on a problem or plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CreateCommentRequestBody", into = "CreateCommentRequestBody")]
pub struct CreateCommentRequest {
    /// Commented record.
    pub target: CommentTarget,
    /// Comment text.
    pub content: String,
}

/// Wire form of [`CreateCommentRequest`].
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateCommentRequestBody {
    /// Kind of the commented record.
    pub commentable_type: CommentableType,
    /// Identifier of the commented record.
    pub commentable_id: RecordId,
    /// Comment text, 1–1000 characters.
    #[schema(min_length = 1, max_length = 1000)]
    pub content: String,
}

impl From<CreateCommentRequest> for CreateCommentRequestBody {
    fn from(value: CreateCommentRequest) -> Self {
        let CreateCommentRequest { target, content } = value;
        Self {
            commentable_type: target.kind(),
            commentable_id: target.id(),
            content,
        }
    }
}

/// Raised when deserialising a comment whose content breaks its limits.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("comment must be between 1 and 1000 characters")]
pub struct CommentContentError;

impl TryFrom<CreateCommentRequestBody> for CreateCommentRequest {
    type Error = CommentContentError;

    fn try_from(value: CreateCommentRequestBody) -> Result<Self, Self::Error> {
        let length = value.content.chars().count();
        if length == 0 || length > COMMENT_CONTENT_MAX {
            return Err(CommentContentError);
        }
        Ok(Self {
            target: CommentTarget::new(value.commentable_type, value.commentable_id),
            content: value.content,
        })
    }
}

impl Contract for CreateCommentRequest {
    fn check(field: &Field<'_>, violations: &mut Violations) -> Option<Self> {
        field.object(violations)?;
        let kind = field
            .key("commentable_type")
            .required(violations, &COMMENTABLE_TYPE);
        let id = field
            .key("commentable_id")
            .required(violations, &COMMENTABLE_ID);
        let content = field.key("content").required(violations, &CONTENT);
        Some(Self {
            target: CommentTarget::new(kind?, id?),
            content: content?,
        })
    }
}

#[cfg(test)]
mod tests {
    //! Comment contract checks.

    use super::*;
    use crate::domain::validation::validate_body;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("Problem", CommentableType::Problem)]
    #[case("Plan", CommentableType::Plan)]
    fn builds_typed_target(#[case] tag: &str, #[case] kind: CommentableType) {
        let request: CreateCommentRequest = validate_body(&json!({
            "commentable_type": tag,
            "commentable_id": 9,
            "content": "Looks good"
        }))
        .expect("valid comment");
        assert_eq!(request.target.kind(), kind);
        assert_eq!(request.target.id().get(), 9);
    }

    #[rstest]
    fn reports_every_field() {
        let errors = validate_body::<CreateCommentRequest>(&json!({
            "commentable_type": "problem",
            "commentable_id": 0,
            "content": "x".repeat(1001)
        }))
        .expect_err("invalid comment");
        assert_eq!(
            errors.fields().collect::<Vec<_>>(),
            vec!["commentable_type", "commentable_id", "content"]
        );
    }

    #[rstest]
    fn serialises_wire_pair() {
        let request = CreateCommentRequest {
            target: CommentTarget::Plan(RecordId::new(5).expect("positive")),
            content: "Follow up".to_owned(),
        };
        let value = serde_json::to_value(&request).expect("serialise");
        assert_eq!(
            value,
            json!({"commentable_type": "Plan", "commentable_id": 5, "content": "Follow up"})
        );
        let back: CreateCommentRequest = serde_json::from_value(value).expect("deserialise");
        assert_eq!(back, request);
    }

    #[rstest]
    fn deserialise_rejects_empty_content() {
        let result: Result<CreateCommentRequest, _> = serde_json::from_value(json!({
            "commentable_type": "Plan",
            "commentable_id": 5,
            "content": ""
        }));
        assert!(result.is_err());
    }
}
