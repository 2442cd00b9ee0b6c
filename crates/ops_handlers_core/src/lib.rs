//! Shared domain primitives for the employee record and audit alert handlers.
//!
//! This crate owns request validation, response shaping, numeric rendering and
//! alert formatting. It intentionally excludes AWS SDK and Lambda runtime
//! concerns, which live in `ops_handlers_lambda`.

pub mod audit;
pub mod contract;
pub mod error;
pub mod record;
