//! Domain logic for the inspection station service.
//!
//! This crate has zero internal dependencies so the scoring, ranking, and
//! query-validation rules can be exercised without a database or HTTP stack.

pub mod error;
pub mod inspection;
pub mod pagination;
pub mod priority;
pub mod ranking;
pub mod tags;
pub mod types;
pub mod upload;
