//! Problem (issue or consultation) contracts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::comment::Comment;
use super::note::{NOTE_CONTENT_MAX, note_fields};
use super::primitives::RecordId;
use super::validation::{Contract, Field, Text, Violations};

const CONTENT: Text = Text::new("problem").min(1).max(NOTE_CONTENT_MAX);

/// A problem as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Problem {
    /// Problem identifier.
    pub id: RecordId,
    /// Problem text.
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

/// Problem fields submitted on create and on update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProblemRequest {
    /// Problem text, 1–2000 characters.
    #[schema(min_length = 1, max_length = 2000)]
    pub content: String,
    /// Position within the report.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_order: Option<u32>,
}

/// Request to add a problem.
pub type CreateProblemRequest = ProblemRequest;
/// Request to replace a problem.
pub type UpdateProblemRequest = ProblemRequest;

impl Contract for ProblemRequest {
    fn check(field: &Field<'_>, violations: &mut Violations) -> Option<Self> {
        let fields = note_fields(field, violations, &CONTENT)?;
        Some(Self {
            content: fields.content,
            display_order: fields.display_order,
        })
    }
}

#[cfg(test)]
mod tests {
    //! Problem contract checks.

    use super::*;
    use crate::domain::validation::validate_body;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(2000, true)]
    #[case(2001, false)]
    #[case(0, false)]
    fn content_length_bounds(#[case] length: usize, #[case] accepted: bool) {
        let input = json!({"content": "a".repeat(length)});
        match validate_body::<ProblemRequest>(&input) {
            Ok(request) => {
                assert!(accepted);
                assert_eq!(request.content.chars().count(), length);
            }
            Err(errors) => {
                assert!(!accepted);
                assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["content"]);
            }
        }
    }

    #[rstest]
    #[case(json!(-1))]
    #[case(json!(1.5))]
    #[case(json!("2"))]
    fn display_order_must_be_non_negative_integer(#[case] order: serde_json::Value) {
        let errors = validate_body::<ProblemRequest>(&json!({"content": "x", "display_order": order}))
            .expect_err("bad order");
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["display_order"]);
    }

    #[rstest]
    fn counts_characters_not_bytes() {
        let input = json!({"content": "課".repeat(2000)});
        assert!(validate_body::<ProblemRequest>(&input).is_ok());
    }

    #[rstest]
    fn response_omits_missing_creation_time() {
        let problem = Problem {
            id: RecordId::new(4).expect("positive"),
            content: "Pricing".to_owned(),
            display_order: 0,
            comments: Vec::new(),
            created_at: None,
        };
        assert_eq!(
            serde_json::to_value(problem).expect("serialise"),
            json!({"id": 4, "content": "Pricing", "display_order": 0, "comments": []})
        );
    }
}
