//! HTTP interface module.
//!
//! Provides REST API endpoints for:
//! - Task submission, status polling and cancellation
//! - Health checks

pub mod extract;
pub mod handlers;
pub mod routes;

pub(crate) mod monitoring;
