//! Per-column statistical profile.

use serde::{Deserialize, Serialize};

use super::types::ColumnDtype;

/// Single-pass statistics for one input column.
///
/// Profiles are immutable once computed; when the input table changes they
/// are recomputed wholesale, never patched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnProfile {
    /// Column name.
    pub name: String,
    /// Zero-based position in the table. Preserved so the primary-key
    /// selector can fall back to original column order on ties.
    pub position: usize,
    /// Inferred data type.
    pub dtype: ColumnDtype,
    /// Count of distinct non-null values.
    pub cardinality: usize,
    /// cardinality / row count, in [0, 1]. 0.0 for an empty table.
    pub uniqueness_ratio: f64,
    /// null count / row count, in [0, 1]. 0.0 for an empty table.
    pub null_ratio: f64,
    /// At least 70% of the values parse as dates (day-first preference).
    pub is_date_like: bool,
    /// The lowercased name contains a key-ish token (id_, _id, codigo, ...).
    pub name_suggests_id: bool,
    /// A leading sample of the numeric values carries a non-zero fractional
    /// part. Disqualifies float columns from key candidacy.
    pub has_fractional_values: bool,
}

impl ColumnProfile {
    /// Whether the column holds any non-null data at all.
    pub fn is_all_null(&self) -> bool {
        self.cardinality == 0
    }
}
