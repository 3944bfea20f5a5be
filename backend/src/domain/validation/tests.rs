//! Engine-level properties exercised through real contracts.

use super::*;
use crate::domain::customer::{CreateCustomerRequest, CustomerListQuery};
use crate::domain::plan::PlanRequest;
use crate::domain::report::CreateReportRequest;
use crate::domain::visit::VisitRecordRequest;
use rstest::rstest;
use serde_json::json;

#[rstest]
#[case(json!(null))]
#[case(json!([]))]
#[case(json!("customer"))]
#[case(json!(12))]
fn non_object_input_fails_at_root(#[case] input: Value) {
    let errors = validate::<CreateCustomerRequest>(&input).expect_err("not an object");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.errors()[0].field(), None);
}

#[rstest]
fn single_violation_yields_single_error() {
    let errors = validate::<CreateCustomerRequest>(&json!({
        "customer_code": "C0001",
        "name": "Acme",
        "postal_code": "1000001"
    }))
    .expect_err("bad postal code");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.errors()[0].field(), Some("postal_code"));
}

#[rstest]
fn independent_violations_are_all_reported() {
    let errors = validate::<CreateCustomerRequest>(&json!({
        "customer_code": "",
        "name": "",
        "industry": 5,
        "postal_code": "abc",
        "address": "x".repeat(256),
        "phone": "0".repeat(21),
        "is_active": "yes"
    }))
    .expect_err("seven violations");
    assert!(errors.len() >= 7);
}

#[rstest]
fn validation_is_idempotent() {
    let input = json!({"customer_code": "C0001", "name": 3});
    let first = validate::<CreateCustomerRequest>(&input);
    let second = validate::<CreateCustomerRequest>(&input);
    assert_eq!(first, second);
}

#[rstest]
fn entry_points_agree() {
    let input = json!({"page": "2", "is_active": "0"});
    let generic = validate::<CustomerListQuery>(&input);
    assert_eq!(validate_query::<CustomerListQuery>(&input), generic);
    assert_eq!(validate_body::<CustomerListQuery>(&input), generic);
    assert_eq!(validate_params::<CustomerListQuery>(&input), generic);
}

#[rstest]
fn valid_data_serialises_back_to_input() {
    let input = json!({
        "customer_id": 12,
        "visit_time": "09:05",
        "result": "info_gathering",
        "content": "Intro meeting"
    });
    let request: VisitRecordRequest = validate(&input).expect("valid visit");
    assert_eq!(serde_json::to_value(request).expect("serialise"), input);
}

#[rstest]
fn unknown_keys_are_ignored() {
    let request: CreateCustomerRequest = validate(&json!({
        "customer_code": "C0001",
        "name": "Acme",
        "favourite_colour": "teal"
    }))
    .expect("extra keys tolerated");
    assert_eq!(request.name, "Acme");
}

#[rstest]
fn missing_nested_list_item_reports_index() {
    let errors = validate::<CreateReportRequest>(&json!({
        "report_date": "2024-01-15",
        "plans": [{"content": "ok"}, null]
    }))
    .expect_err("null item");
    assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["plans.1"]);
    assert_eq!(errors.errors()[0].message(), "Required");
}

#[rstest]
fn error_list_serialises_without_empty_field() {
    let errors = validate::<CreateCustomerRequest>(&json!([])).expect_err("array input");
    assert_eq!(
        serde_json::to_value(errors.errors()).expect("serialise"),
        json!([{"message": "Expected object, received array"}])
    );
}

#[rstest]
fn display_lists_count() {
    let errors = validate::<CreateCustomerRequest>(&json!({})).expect_err("empty");
    assert_eq!(errors.to_string(), "input failed validation with 2 error(s)");
}

#[rstest]
#[case("😀", 2000, true)]
#[case("😀", 2001, false)]
#[case("e\u{301}", 1000, true)]
#[case("e\u{301}", 1001, false)]
fn lengths_count_scalar_values(
    #[case] unit: &str,
    #[case] repeats: usize,
    #[case] accepted: bool,
) {
    let input = json!({"content": unit.repeat(repeats)});
    assert_eq!(validate_body::<PlanRequest>(&input).is_ok(), accepted);
}
