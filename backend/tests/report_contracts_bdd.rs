//! Behaviour tests for the daily report contracts.
//!
//! These scenarios drive the contract catalogue the way the `contract-check`
//! tool does: a JSON input is built step by step, checked by name, and the
//! normalised value or the reported field paths are inspected.

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use sales_report::domain::{ContractError, ContractKind};
use serde_json::{Map, Value, json};
use std::cell::RefCell;

struct ReportContractWorld {
    input: RefCell<Map<String, Value>>,
    outcome: RefCell<Option<Result<Value, ContractError>>>,
}

impl ReportContractWorld {
    fn new() -> Self {
        Self {
            input: RefCell::new(Map::new()),
            outcome: RefCell::new(None),
        }
    }

    fn set(&self, key: &str, value: Value) {
        self.input.borrow_mut().insert(key.to_owned(), value);
    }

    fn push(&self, list: &str, item: Value) {
        let mut input = self.input.borrow_mut();
        let entry = input
            .entry(list.to_owned())
            .or_insert_with(|| Value::Array(Vec::new()));
        entry
            .as_array_mut()
            .expect("list entries hold arrays")
            .push(item);
    }

    fn evaluate(&self, contract: ContractKind) {
        let input = Value::Object(self.input.borrow().clone());
        *self.outcome.borrow_mut() = Some(contract.check(&input));
    }

    fn with_value<F>(&self, f: F)
    where
        F: FnOnce(&Value),
    {
        let outcome = self.outcome.borrow();
        let value = match outcome.as_ref().expect("evaluation result") {
            Ok(value) => value,
            Err(error) => panic!("expected the input to pass, got {error}"),
        };
        f(value);
    }

    fn with_error<F>(&self, f: F)
    where
        F: FnOnce(&ContractError),
    {
        let outcome = self.outcome.borrow();
        let error = match outcome.as_ref().expect("evaluation result") {
            Ok(value) => panic!("expected the input to fail, got {value}"),
            Err(error) => error,
        };
        f(error);
    }
}

#[fixture]
fn world() -> ReportContractWorld {
    ReportContractWorld::new()
}

#[given("a report dated {date}")]
fn a_report_dated(world: &ReportContractWorld, date: String) {
    world.set("report_date", Value::String(date));
}

#[given("a visit to customer {customer} with content {content}")]
fn a_visit_with_content(world: &ReportContractWorld, customer: u64, content: String) {
    world.push("visits", json!({ "customer_id": customer, "content": content }));
}

#[given("a visit to customer {customer} with empty content")]
fn a_visit_with_empty_content(world: &ReportContractWorld, customer: u64) {
    world.push("visits", json!({ "customer_id": customer, "content": "" }));
}

#[given("a visit to customer {customer} with result {result}")]
fn a_visit_with_result(world: &ReportContractWorld, customer: u64, result: String) {
    world.push(
        "visits",
        json!({ "customer_id": customer, "content": "Follow-up", "result": result }),
    );
}

#[given("a problem of {length} characters")]
fn a_problem_of_length(world: &ReportContractWorld, length: usize) {
    world.push("problems", json!({ "content": "x".repeat(length) }));
}

#[given("an empty query")]
fn an_empty_query(world: &ReportContractWorld) {
    world.input.borrow_mut().clear();
}

#[given("the query sets {key} to {value}")]
fn the_query_sets(world: &ReportContractWorld, key: String, value: String) {
    world.set(&key, Value::String(value));
}

#[when("the input is checked against {contract}")]
fn the_input_is_checked(world: &ReportContractWorld, contract: ContractKind) {
    world.evaluate(contract);
}

#[then("the input is accepted")]
fn the_input_is_accepted(world: &ReportContractWorld) {
    world.with_value(|_| {});
}

#[then("the input is rejected")]
fn the_input_is_rejected(world: &ReportContractWorld) {
    world.with_error(|error| {
        assert!(error.field_errors().is_some(), "expected field errors, got {error}");
    });
}

#[then("the normalised report has {count} visits")]
fn the_report_has_visits(world: &ReportContractWorld, count: usize) {
    world.with_value(|value| {
        let visits = value["visits"].as_array().expect("visits array");
        assert_eq!(visits.len(), count);
    });
}

#[then("the normalised {key} is {expected}")]
fn the_normalised_key_is(world: &ReportContractWorld, key: String, expected: String) {
    let expected: Value = serde_json::from_str(&expected).expect("expected value is JSON");
    world.with_value(|value| {
        assert_eq!(value[key.as_str()], expected, "unexpected {key}");
    });
}

#[then("the rejected fields are {fields}")]
fn the_rejected_fields_are(world: &ReportContractWorld, fields: String) {
    let expected: Vec<&str> = fields.split(", ").collect();
    world.with_error(|error| {
        let actual: Vec<&str> = error
            .field_errors()
            .expect("field errors")
            .iter()
            .filter_map(|field_error| field_error.field())
            .collect();
        assert_eq!(actual, expected);
    });
}

#[scenario(
    path = "tests/features/report_contracts.feature",
    name = "A well-formed report is accepted"
)]
fn well_formed_report_is_accepted(world: ReportContractWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/report_contracts.feature",
    name = "Nested item errors carry their paths"
)]
fn nested_item_errors_carry_paths(world: ReportContractWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/report_contracts.feature",
    name = "Impossible calendar dates are rejected"
)]
fn impossible_dates_are_rejected(world: ReportContractWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/report_contracts.feature",
    name = "Unknown visit results are rejected"
)]
fn unknown_visit_results_are_rejected(world: ReportContractWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/report_contracts.feature",
    name = "Report list queries fall back to defaults"
)]
fn report_list_queries_fall_back_to_defaults(world: ReportContractWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/report_contracts.feature",
    name = "Reversed date ranges are passed through"
)]
fn reversed_date_ranges_are_passed_through(world: ReportContractWorld) {
    drop(world);
}
