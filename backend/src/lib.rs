//! Request and response contracts for the daily sales-report API.
//!
//! - [`domain`]: typed contracts, the validation engine, and the contract
//!   registry.
//! - [`inbound`]: HTTP envelope mapping for handlers.
//! - [`settings`]: start-up configuration read from the environment.
//! - [`doc`]: the OpenAPI document.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod settings;

/// Public OpenAPI surface used by tooling.
pub use doc::ApiDoc;
