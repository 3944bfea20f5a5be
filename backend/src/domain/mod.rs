//! Request and response contracts of the daily sales-report API.
//!
//! Purpose: describe every payload the API accepts or returns, together
//! with the field constraints checked at the boundary. Inbound types
//! implement [`validation::Contract`]; outbound types are plain serde
//! structs with `ToSchema` derives.
//!
//! Public surface:
//! - [`validation`]: the engine, its rules and error types.
//! - One module per resource: [`auth`], [`customer`], [`salesperson`],
//!   [`visit`], [`problem`], [`plan`], [`comment`], [`report`].
//! - [`registry::ContractKind`]: name-addressable catalogue for tooling.

pub(crate) mod macros;

pub mod auth;
pub mod comment;
pub mod common;
pub mod customer;
pub mod listing;
mod note;
pub mod plan;
pub mod primitives;
pub mod problem;
pub mod registry;
pub mod report;
pub mod salesperson;
pub mod validation;
pub mod visit;

pub use self::primitives::{EmailAddress, PrimitiveValidationError, RecordId, VisitTime};
pub use self::registry::{ContractError, ContractKind, InputPart, UnknownContract};
pub use self::validation::{
    Contract, FieldError, ValidationErrors, validate, validate_body, validate_params,
    validate_query,
};
