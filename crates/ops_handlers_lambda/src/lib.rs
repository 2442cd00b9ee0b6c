//! AWS-oriented adapters and handlers for the employee API and audit alerts.
//!
//! This crate owns runtime integration details (Lambda entry points, DynamoDB
//! and SNS adapters, environment configuration). Validation, response shapes
//! and alert formatting come from `ops_handlers_core`.

pub mod adapters;
pub mod config;
pub mod handlers;
