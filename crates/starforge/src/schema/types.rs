//! Core type definitions for schema representation.

use serde::{Deserialize, Serialize};

/// Inferred data type for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnDtype {
    /// Whole numbers (no fractional part anywhere in the column).
    Integer,
    /// Floating-point numbers.
    Float,
    /// Text values.
    Text,
    /// Date or date-time values.
    Date,
}

impl ColumnDtype {
    /// Returns true if this type is numeric.
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnDtype::Integer | ColumnDtype::Float)
    }
}

impl Default for ColumnDtype {
    fn default() -> Self {
        ColumnDtype::Text
    }
}

/// Role a column plays in a star schema.
///
/// Verdicts are mutually exclusive: classification rules are evaluated in a
/// fixed priority order (Date, KeyCandidate, Measure, DimensionAttribute)
/// and the first match wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleVerdict {
    /// Temporal axis column.
    Date,
    /// Candidate natural/primary key.
    KeyCandidate,
    /// Fact measure (numeric, high cardinality).
    Measure,
    /// Descriptive dimension attribute.
    DimensionAttribute,
    /// No role matched.
    None,
}

impl RoleVerdict {
    /// Short label used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            RoleVerdict::Date => "date",
            RoleVerdict::KeyCandidate => "key-candidate",
            RoleVerdict::Measure => "measure",
            RoleVerdict::DimensionAttribute => "dimension-attribute",
            RoleVerdict::None => "none",
        }
    }
}

impl Default for RoleVerdict {
    fn default() -> Self {
        RoleVerdict::None
    }
}
