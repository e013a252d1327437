//! Engine configuration and classification thresholds.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Thresholds driving profiling and role classification.
///
/// Every cutoff used by the profiler and the classifier lives here so the
/// rules stay overridable and testable instead of being scattered constants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thresholds {
    /// Fraction of parseable values required to call a column date-like.
    pub date_like_fraction: f64,
    /// Uniqueness ratio required for a key candidate.
    pub key_uniqueness: f64,
    /// Relaxed uniqueness ratio when the column name already suggests an id.
    pub key_uniqueness_id_named: f64,
    /// Maximum null ratio tolerated for a key candidate.
    pub key_max_null_ratio: f64,
    /// Number of leading non-null values sampled for the fractional-part
    /// key guard on float columns.
    pub float_key_sample: usize,
    /// Minimum distinct values for a numeric column to count as a measure.
    pub measure_min_cardinality: usize,
    /// Uniqueness ratio above which a numeric column is suspected to be a
    /// mis-scoped key rather than a measure.
    pub measure_max_uniqueness: f64,
    /// Maximum cardinality for a numeric column to pass as a dimension
    /// attribute.
    pub numeric_attribute_max_cardinality: usize,
    /// Maximum distinct/rows ratio for a text column to pass as a dimension
    /// attribute.
    pub text_attribute_max_ratio: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            date_like_fraction: 0.70,
            key_uniqueness: 0.98,
            key_uniqueness_id_named: 0.90,
            key_max_null_ratio: 0.05,
            float_key_sample: 50,
            measure_min_cardinality: 15,
            measure_max_uniqueness: 0.98,
            numeric_attribute_max_cardinality: 20,
            text_attribute_max_ratio: 0.20,
        }
    }
}

/// Configuration for a full engine run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Classification thresholds.
    pub thresholds: Thresholds,
    /// Columns always appended to the fact table when present in the
    /// source, regardless of their verdict (e.g. a salesperson alias
    /// carried through for reporting).
    pub forced_columns: Vec<String>,
    /// Forward boundary for the calendar dimension. When unset the engine
    /// computes [`default_horizon`] at run time.
    pub horizon: Option<NaiveDate>,
}

impl EngineConfig {
    /// Configuration with a fixed calendar horizon.
    pub fn with_horizon(mut self, horizon: NaiveDate) -> Self {
        self.horizon = Some(horizon);
        self
    }

    /// Add a forced-inclusion fact column.
    pub fn with_forced_column(mut self, column: impl Into<String>) -> Self {
        self.forced_columns.push(column.into());
        self
    }
}

/// Default calendar horizon: December 31 five years after `today`.
pub fn default_horizon(today: NaiveDate) -> NaiveDate {
    // Dec 31 exists in every year, so this cannot fail.
    NaiveDate::from_ymd_opt(today.year() + 5, 12, 31).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds() {
        let t = Thresholds::default();
        assert_eq!(t.date_like_fraction, 0.70);
        assert_eq!(t.key_uniqueness, 0.98);
        assert_eq!(t.key_uniqueness_id_named, 0.90);
        assert_eq!(t.measure_min_cardinality, 15);
    }

    #[test]
    fn test_default_horizon_is_five_years_out() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let horizon = default_horizon(today);
        assert_eq!(horizon, NaiveDate::from_ymd_opt(2029, 12, 31).unwrap());
    }
}
