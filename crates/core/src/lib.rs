//! Domain model and derived-state logic for the Ambience project dashboard.
//!
//! This crate has no I/O. Payloads fetched by `ambience-gateway` are
//! passed in by the caller and every function here is a pure
//! computation over them.

pub mod aggregation;
pub mod creation;
pub mod error;
pub mod models;
pub mod roles;
pub mod task_status;
pub mod types;
