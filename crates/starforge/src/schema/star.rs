//! Star-schema output types.

use serde::{Deserialize, Serialize};

use crate::error::{Result, StarforgeError};

/// One suggested dimension table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionSpec {
    /// Derived table name (`dim_<theme>`), identifier-safe and non-empty.
    pub dimension_name: String,
    /// The curated source column keying this dimension.
    pub natural_key_column: String,
    /// Attribute columns assigned to this dimension, in table order.
    pub attribute_columns: Vec<String>,
}

impl DimensionSpec {
    /// All source columns projected into this dimension: natural key first,
    /// then attributes.
    pub fn projected_columns(&self) -> Vec<&str> {
        std::iter::once(self.natural_key_column.as_str())
            .chain(self.attribute_columns.iter().map(|s| s.as_str()))
            .collect()
    }
}

/// The synthesized star-schema suggestion for one source table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StarSchema {
    /// Derived fact table name (`fato_<base>`).
    pub fact_table_name: String,
    /// Fact table columns, deduplicated in first-seen order.
    pub fact_columns: Vec<String>,
    /// One spec per curated dimension key, in curated order.
    pub dimensions: Vec<DimensionSpec>,
}

/// A named rectangular table ready to hand to a sink.
///
/// Construction validates the shape: ragged rows are a producer bug, not a
/// data-quality issue, and are rejected up front.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterializedTable {
    /// Target table name.
    pub name: String,
    /// Column headers.
    pub headers: Vec<String>,
    /// Row data.
    pub rows: Vec<Vec<String>>,
}

impl MaterializedTable {
    /// Create a table, enforcing that every row matches the header width.
    pub fn new(
        name: impl Into<String>,
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    ) -> Result<Self> {
        let name = name.into();
        let expected = headers.len();
        for (idx, row) in rows.iter().enumerate() {
            if row.len() != expected {
                return Err(StarforgeError::ShapeMismatch {
                    table: name,
                    row: idx,
                    expected,
                    found: row.len(),
                });
            }
        }
        Ok(Self {
            name,
            headers,
            rows,
        })
    }

    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}
