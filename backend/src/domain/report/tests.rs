//! Report contract checks.

use super::*;
use crate::domain::validation::{validate_body, validate_query};
use chrono::{NaiveDate, TimeZone, Utc};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

#[fixture]
fn valid_report() -> Value {
    json!({
        "report_date": "2024-01-15",
        "visits": [
            {"customer_id": 1, "visit_time": "10:00", "result": "negotiating", "content": "Demo"}
        ],
        "problems": [{"content": "Price too high"}],
        "plans": [{"content": "Send estimate", "display_order": 0}]
    })
}

#[rstest]
fn create_accepts_full_report(valid_report: Value) {
    let request: CreateReportRequest = validate_body(&valid_report).expect("valid report");
    assert_eq!(request.visits.len(), 1);
    assert_eq!(
        serde_json::to_value(&request).expect("serialise"),
        valid_report
    );
}

#[rstest]
fn create_defaults_lists_to_empty() {
    let request: CreateReportRequest =
        validate_body(&json!({"report_date": "2024-01-15"})).expect("date only");
    assert!(request.visits.is_empty());
    assert!(request.problems.is_empty());
    assert!(request.plans.is_empty());
}

#[rstest]
fn create_reports_nested_paths() {
    let errors = validate_body::<CreateReportRequest>(&json!({
        "report_date": "2024-01-15",
        "visits": [
            {"customer_id": 0, "content": "Demo"},
            {"customer_id": 2, "content": ""}
        ],
        "problems": [{"content": "x".repeat(2001)}]
    }))
    .expect_err("nested failures");
    let fields: Vec<&str> = errors.fields().collect();
    assert_eq!(
        fields,
        vec!["visits.0.customer_id", "visits.1.content", "problems.0.content"]
    );
}

#[rstest]
#[case("2024-02-30")]
#[case("2024/01/15")]
#[case("15-01-2024")]
fn create_rejects_bad_dates(#[case] date: &str) {
    let errors = validate_body::<CreateReportRequest>(&json!({"report_date": date}))
        .expect_err("bad date");
    assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["report_date"]);
}

#[rstest]
fn update_classifies_items_by_id() {
    let request: UpdateReportRequest = validate_body(&json!({
        "visits": [
            {"id": 7, "customer_id": 1, "content": "Revisit"},
            {"customer_id": 2, "content": "New visit"}
        ]
    }))
    .expect("valid update");
    let visits = request.visits.expect("visits present");
    assert_eq!(visits[0].id().map(RecordId::get), Some(7));
    assert!(matches!(visits[1], ItemChange::Create(_)));
    assert!(request.problems.is_none());
}

#[rstest]
fn update_round_trips_item_ids() {
    let input = json!({
        "problems": [{"id": 3, "content": "Still open"}, {"content": "New"}]
    });
    let request: UpdateReportRequest = validate_body(&input).expect("valid update");
    assert_eq!(serde_json::to_value(&request).expect("serialise"), input);
    let decoded: UpdateReportRequest = serde_json::from_value(input).expect("deserialise");
    assert_eq!(decoded, request);
}

#[rstest]
fn update_rejects_zero_item_id() {
    let errors = validate_body::<UpdateReportRequest>(&json!({
        "plans": [{"id": 0, "content": "x"}]
    }))
    .expect_err("zero id");
    assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["plans.0.id"]);
}

#[rstest]
fn update_accepts_empty_body() {
    let request: UpdateReportRequest = validate_body(&json!({})).expect("empty update");
    assert_eq!(request, UpdateReportRequest::default());
}

#[rstest]
fn list_query_defaults_scope_to_own() {
    let query: ReportListQuery = validate_query(&json!({})).expect("defaults");
    assert_eq!(query.scope, ReportScope::Own);
    assert_eq!(query.page.page(), 1);
}

#[rstest]
fn list_query_coerces_salesperson() {
    let query: ReportListQuery = validate_query(&json!({
        "salesperson_id": "4",
        "status": "submitted",
        "scope": "subordinates"
    }))
    .expect("valid filters");
    assert_eq!(query.salesperson_id.map(RecordId::get), Some(4));
    assert_eq!(query.status, Some(ReportStatus::Submitted));
}

#[rstest]
#[case(json!({"status": "archived"}), "status")]
#[case(json!({"scope": "all"}), "scope")]
#[case(json!({"salesperson_id": "0"}), "salesperson_id")]
#[case(json!({"date_from": "2024-1-5"}), "date_from")]
fn list_query_rejects(#[case] input: Value, #[case] field: &str) {
    let errors = validate_query::<ReportListQuery>(&input).expect_err("invalid filter");
    assert_eq!(errors.fields().collect::<Vec<_>>(), vec![field]);
}

#[rstest]
fn list_query_keeps_reversed_range() {
    let query: ReportListQuery = validate_query(&json!({
        "date_from": "2024-02-01",
        "date_to": "2024-01-01"
    }))
    .expect("range order is not constrained");
    assert_eq!(query.date_from, NaiveDate::from_ymd_opt(2024, 2, 1));
    assert_eq!(query.date_to, NaiveDate::from_ymd_opt(2024, 1, 1));
}

#[rstest]
fn submit_response_carries_literal_status() {
    let submitted_at = Utc
        .with_ymd_and_hms(2024, 1, 15, 18, 0, 0)
        .single()
        .expect("valid timestamp");
    let response = SubmitReportResponse::new(RecordId::new(1).expect("positive"), submitted_at);
    assert_eq!(
        serde_json::to_value(response).expect("serialise"),
        json!({"id": 1, "status": "submitted", "submitted_at": "2024-01-15T18:00:00Z"})
    );
}

#[rstest]
fn confirm_response_rejects_other_status() {
    let result: Result<ConfirmReportResponse, _> = serde_json::from_value(json!({
        "id": 1,
        "status": "submitted",
        "confirmed_at": "2024-01-15T18:00:00Z"
    }));
    assert!(result.is_err());
}
