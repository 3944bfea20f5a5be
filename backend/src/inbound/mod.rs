//! Inbound adapters that translate external requests into typed contracts
//! while keeping framework details at the edge.
//!
//! HTTP helpers live under [`http`].

pub mod http;
