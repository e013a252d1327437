//! Inference pipeline: column profiling, role classification, key selection.

mod classifier;
mod profiler;
mod selector;

pub use classifier::RoleClassifier;
pub use profiler::{parse_date_day_first, parse_numeric, ColumnProfiler};
pub use selector::suggest_primary_key;
