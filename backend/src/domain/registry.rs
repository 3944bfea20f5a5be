//! Name-addressable catalogue of inbound contracts.
//!
//! Handlers select a contract by type; tooling selects one by name through
//! [`ContractKind`].

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::Value;

use super::auth::{LoginRequest, RefreshRequest};
use super::comment::CreateCommentRequest;
use super::common::IdParams;
use super::customer::{CreateCustomerRequest, CustomerListQuery, UpdateCustomerRequest};
use super::listing::PaginationQuery;
use super::plan::PlanRequest;
use super::problem::ProblemRequest;
use super::report::{CreateReportRequest, ReportListQuery, UpdateReportRequest};
use super::salesperson::{
    CreateSalespersonRequest, SalespersonListQuery, UpdateSalespersonRequest,
};
use super::validation::{
    Contract, FieldError, ValidationErrors, validate_body, validate_params, validate_query,
};
use super::visit::VisitRecordRequest;

/// Part of an HTTP request a contract applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputPart {
    /// Query string.
    Query,
    /// JSON body.
    Body,
    /// Route parameters.
    Params,
}

/// Failure to check input against a named contract.
#[derive(Debug, thiserror::Error)]
pub enum ContractError {
    /// The input broke the contract.
    #[error(transparent)]
    Invalid(#[from] ValidationErrors),
    /// The validated value could not be turned back into JSON.
    #[error("failed to encode validated value: {0}")]
    Encode(#[from] serde_json::Error),
}

impl ContractError {
    /// Field errors to report, if the input itself was at fault.
    pub fn field_errors(&self) -> Option<&[FieldError]> {
        match self {
            Self::Invalid(errors) => Some(errors.errors()),
            Self::Encode(_) => None,
        }
    }
}

/// The requested contract name is not in the catalogue.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown contract `{0}`")]
pub struct UnknownContract(String);

macro_rules! contract_kinds {
    ($($variant:ident => $name:literal, $part:ident, $contract:ty;)+) => {
        /// Every inbound contract, addressable by a stable kebab-case name.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum ContractKind {
            $(
                #[doc = concat!("`", $name, "`")]
                $variant,
            )+
        }

        impl ContractKind {
            /// Every contract in catalogue order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Stable name of the contract.
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)+
                }
            }

            /// Request part the contract is applied to.
            pub const fn part(self) -> InputPart {
                match self {
                    $(Self::$variant => InputPart::$part,)+
                }
            }

            /// Validate `input` and return the normalised value with defaults
            /// applied and query strings coerced.
            ///
            /// # Errors
            ///
            /// Returns [`ContractError::Invalid`] listing every violation.
            pub fn check(self, input: &Value) -> Result<Value, ContractError> {
                match self {
                    $(Self::$variant => normalise::<$contract>(self.part(), input),)+
                }
            }
        }
    };
}

contract_kinds! {
    Login => "login", Body, LoginRequest;
    Refresh => "refresh", Body, RefreshRequest;
    Pagination => "pagination", Query, PaginationQuery;
    IdParams => "id-params", Params, IdParams;
    CustomerList => "customer-list", Query, CustomerListQuery;
    CreateCustomer => "create-customer", Body, CreateCustomerRequest;
    UpdateCustomer => "update-customer", Body, UpdateCustomerRequest;
    SalespersonList => "salesperson-list", Query, SalespersonListQuery;
    CreateSalesperson => "create-salesperson", Body, CreateSalespersonRequest;
    UpdateSalesperson => "update-salesperson", Body, UpdateSalespersonRequest;
    VisitRecord => "visit-record", Body, VisitRecordRequest;
    Problem => "problem", Body, ProblemRequest;
    Plan => "plan", Body, PlanRequest;
    CreateComment => "create-comment", Body, CreateCommentRequest;
    ReportList => "report-list", Query, ReportListQuery;
    CreateReport => "create-report", Body, CreateReportRequest;
    UpdateReport => "update-report", Body, UpdateReportRequest;
}

fn normalise<T: Contract + Serialize>(part: InputPart, input: &Value) -> Result<Value, ContractError> {
    let checked: T = match part {
        InputPart::Query => validate_query(input)?,
        InputPart::Body => validate_body(input)?,
        InputPart::Params => validate_params(input)?,
    };
    Ok(serde_json::to_value(checked)?)
}

impl fmt::Display for ContractKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ContractKind {
    type Err = UnknownContract;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == name)
            .ok_or_else(|| UnknownContract(name.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    //! Registry lookup and dispatch.

    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn names_round_trip() {
        for kind in ContractKind::ALL {
            assert_eq!(kind.name().parse::<ContractKind>(), Ok(*kind));
        }
    }

    #[rstest]
    fn unknown_name_is_reported() {
        let error = "delete-everything".parse::<ContractKind>().expect_err("unknown");
        assert_eq!(error.to_string(), "unknown contract `delete-everything`");
    }

    #[rstest]
    fn check_applies_defaults() {
        let value = ContractKind::CustomerList
            .check(&json!({"page": "2"}))
            .expect("valid query");
        assert_eq!(
            value,
            json!({"page": 2, "per_page": 20, "is_active": true})
        );
    }

    #[rstest]
    #[case(json!({"customer_code": "C1", "name": "A", "industry": null, "is_active": true}))]
    #[case(json!({"customer_code": "C1", "name": "A", "phone": null, "address": null}))]
    #[case(json!({"customer_code": "C1", "name": "A"}))]
    fn null_optional_create_fields_normalise_to_omitted(#[case] input: serde_json::Value) {
        let value = ContractKind::CreateCustomer
            .check(&input)
            .expect("valid customer");
        assert_eq!(
            value,
            json!({"customer_code": "C1", "name": "A", "is_active": true})
        );
    }

    #[rstest]
    fn check_reports_field_errors() {
        let error = ContractKind::CreateComment
            .check(&json!({"commentable_type": "Visit"}))
            .expect_err("invalid comment");
        let fields: Vec<_> = error
            .field_errors()
            .expect("input errors")
            .iter()
            .filter_map(FieldError::field)
            .collect();
        assert_eq!(fields, vec!["commentable_type", "commentable_id", "content"]);
    }

    #[rstest]
    #[case(ContractKind::Pagination, InputPart::Query)]
    #[case(ContractKind::IdParams, InputPart::Params)]
    #[case(ContractKind::CreateReport, InputPart::Body)]
    fn parts_match_transport(#[case] kind: ContractKind, #[case] part: InputPart) {
        assert_eq!(kind.part(), part);
    }
}
