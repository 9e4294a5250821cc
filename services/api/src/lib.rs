//! services/api/src/lib.rs
//!
//! The pull-signal example service: contract, HTTP application and
//! configuration shared by the `signals-api` and `openapi` binaries.

pub mod config;
pub mod contract;
pub mod error;
pub mod web;
