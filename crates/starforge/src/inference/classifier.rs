//! Role classification: mapping a column profile to a star-schema verdict.

use once_cell::sync::Lazy;

use crate::config::Thresholds;
use crate::schema::{ColumnDtype, ColumnProfile, RoleVerdict};

/// Tokens that mark a column name as descriptive (dimension attribute).
static DESCRIPTIVE_TOKENS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        "nome",
        "descricao",
        "descrição",
        "cidade",
        "estado",
        "uf",
        "bairro",
        "logradouro",
    ]
});

/// Assigns exactly one [`RoleVerdict`] per column.
///
/// Rules run in a fixed priority order and the first match wins, so a highly
/// unique textual code can never also fall through to the low-cardinality
/// attribute rule. A pure function of the profile: no table access.
pub struct RoleClassifier {
    thresholds: Thresholds,
}

impl RoleClassifier {
    /// Create a classifier with default thresholds.
    pub fn new() -> Self {
        Self {
            thresholds: Thresholds::default(),
        }
    }

    /// Create a classifier with custom thresholds.
    pub fn with_thresholds(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    /// Classify every profile, preserving input order.
    pub fn classify_all(&self, profiles: &[ColumnProfile]) -> Vec<RoleVerdict> {
        profiles.iter().map(|p| self.classify(p)).collect()
    }

    /// Classify one column.
    pub fn classify(&self, profile: &ColumnProfile) -> RoleVerdict {
        if profile.is_date_like {
            return RoleVerdict::Date;
        }
        if self.is_key_candidate(profile) {
            return RoleVerdict::KeyCandidate;
        }
        if self.is_measure(profile) {
            return RoleVerdict::Measure;
        }
        if self.is_dimension_attribute(profile) {
            return RoleVerdict::DimensionAttribute;
        }
        RoleVerdict::None
    }

    fn is_key_candidate(&self, profile: &ColumnProfile) -> bool {
        if profile.is_all_null() {
            return false;
        }

        // An id-ish name buys a relaxed uniqueness cutoff.
        let threshold = if profile.name_suggests_id {
            self.thresholds.key_uniqueness_id_named
        } else {
            self.thresholds.key_uniqueness
        };

        if profile.uniqueness_ratio < threshold
            || profile.null_ratio > self.thresholds.key_max_null_ratio
        {
            return false;
        }

        // Monetary/decimal guard: floats with fractional parts are values,
        // not identifiers, no matter how unique they are.
        if profile.dtype == ColumnDtype::Float && profile.has_fractional_values {
            return false;
        }

        true
    }

    fn is_measure(&self, profile: &ColumnProfile) -> bool {
        profile.dtype.is_numeric()
            && !profile.name_suggests_id
            && profile.cardinality >= self.thresholds.measure_min_cardinality
            && profile.uniqueness_ratio <= self.thresholds.measure_max_uniqueness
    }

    fn is_dimension_attribute(&self, profile: &ColumnProfile) -> bool {
        if profile.dtype.is_numeric() {
            // Low-cardinality numerics (status codes, flags) read as
            // attributes; anything else numeric was either a measure or
            // stays unclassified.
            return profile.cardinality <= self.thresholds.numeric_attribute_max_cardinality
                && profile.cardinality > 0;
        }

        if profile.is_all_null() {
            return false;
        }

        // cardinality / row_count is exactly the uniqueness ratio.
        if profile.uniqueness_ratio <= self.thresholds.text_attribute_max_ratio {
            return true;
        }

        let lower = profile.name.to_lowercase();
        DESCRIPTIVE_TOKENS.iter().any(|t| lower.contains(t))
    }
}

impl Default for RoleClassifier {
    fn default() -> Self {
        Self::new()
    }
}
