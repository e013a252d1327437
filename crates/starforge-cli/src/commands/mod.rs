//! CLI command implementations.

pub mod analyze;
pub mod calendar;
