//! Schema synthesis: assembling fact and dimension specs from verdicts and
//! curated key choices.

mod naming;

pub use naming::{derive_dimension_name, extract_theme, fact_table_name};

use indexmap::IndexSet;

use crate::error::Result;
use crate::input::DataTable;
use crate::schema::{ColumnProfile, DimensionSpec, MaterializedTable, RoleVerdict, StarSchema};

/// Builds a [`StarSchema`] from classified columns and curated inputs.
pub struct SchemaSynthesizer {
    /// Columns always appended to the fact table when present, regardless
    /// of verdict.
    forced_columns: Vec<String>,
}

impl SchemaSynthesizer {
    /// Create a synthesizer with no forced columns.
    pub fn new() -> Self {
        Self {
            forced_columns: Vec::new(),
        }
    }

    /// Create a synthesizer with a forced-inclusion column list.
    pub fn with_forced_columns(forced_columns: Vec<String>) -> Self {
        Self { forced_columns }
    }

    /// Synthesize the star schema.
    ///
    /// `curated_keys` is the human-curated, ordered dimension key list;
    /// unknown names are dropped with a diagnostic, never a failure. The
    /// returned diagnostics are warnings for the caller to surface.
    pub fn synthesize(
        &self,
        table: &DataTable,
        profiles: &[ColumnProfile],
        verdicts: &[RoleVerdict],
        primary_key: Option<&str>,
        curated_keys: &[String],
        base_name: &str,
    ) -> (StarSchema, Vec<String>) {
        let mut diagnostics = Vec::new();

        let valid_keys: Vec<&String> = curated_keys
            .iter()
            .filter(|k| {
                let known = table.has_column(k);
                if !known {
                    diagnostics.push(format!(
                        "dimension key '{}' not found in the source table; ignoring",
                        k
                    ));
                }
                known
            })
            .collect();

        let dimensions = self.build_dimensions(profiles, verdicts, &valid_keys);
        let fact_columns = self.build_fact_columns(table, profiles, verdicts, primary_key, &valid_keys);

        let schema = StarSchema {
            fact_table_name: fact_table_name(base_name),
            fact_columns,
            dimensions,
        };
        (schema, diagnostics)
    }

    fn build_dimensions(
        &self,
        profiles: &[ColumnProfile],
        verdicts: &[RoleVerdict],
        keys: &[&String],
    ) -> Vec<DimensionSpec> {
        let mut assigned: IndexSet<String> = IndexSet::new();
        let mut dimensions = Vec::with_capacity(keys.len());

        for key in keys {
            let theme = extract_theme(key);

            // Substring match of the theme against attribute names. An
            // attribute joins at most one dimension (first curated key
            // wins); an empty theme matches nothing.
            let mut attributes = Vec::new();
            if !theme.is_empty() {
                for (profile, verdict) in profiles.iter().zip(verdicts) {
                    if *verdict != RoleVerdict::DimensionAttribute {
                        continue;
                    }
                    if profile.name == **key || assigned.contains(&profile.name) {
                        continue;
                    }
                    if profile.name.to_lowercase().contains(&theme) {
                        assigned.insert(profile.name.clone());
                        attributes.push(profile.name.clone());
                    }
                }
            }

            dimensions.push(DimensionSpec {
                dimension_name: derive_dimension_name(key),
                natural_key_column: (*key).clone(),
                attribute_columns: attributes,
            });
        }

        dimensions
    }

    fn build_fact_columns(
        &self,
        table: &DataTable,
        profiles: &[ColumnProfile],
        verdicts: &[RoleVerdict],
        primary_key: Option<&str>,
        keys: &[&String],
    ) -> Vec<String> {
        let mut fact: IndexSet<String> = IndexSet::new();

        if let Some(pk) = primary_key {
            if table.has_column(pk) {
                fact.insert(pk.to_string());
            }
        }
        for key in keys {
            fact.insert((*key).clone());
        }
        for (profile, verdict) in profiles.iter().zip(verdicts) {
            if *verdict == RoleVerdict::Date {
                fact.insert(profile.name.clone());
            }
        }
        for (profile, verdict) in profiles.iter().zip(verdicts) {
            if *verdict == RoleVerdict::Measure {
                fact.insert(profile.name.clone());
            }
        }
        for forced in &self.forced_columns {
            if table.has_column(forced) {
                fact.insert(forced.clone());
            }
        }

        fact.into_iter().collect()
    }
}

impl Default for SchemaSynthesizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Project a dimension out of the source table: natural key plus assigned
/// attributes, duplicate rows removed on the full reduced projection,
/// first-seen order preserved.
pub fn materialize_dimension(table: &DataTable, spec: &DimensionSpec) -> Result<MaterializedTable> {
    let columns = spec.projected_columns();
    let indices: Vec<Option<usize>> = columns.iter().map(|c| table.column_index(c)).collect();

    let mut seen: IndexSet<Vec<String>> = IndexSet::new();
    for row in &table.rows {
        let projected: Vec<String> = indices
            .iter()
            .map(|idx| {
                idx.and_then(|i| row.get(i))
                    .cloned()
                    .unwrap_or_default()
            })
            .collect();
        seen.insert(projected);
    }

    MaterializedTable::new(
        spec.dimension_name.clone(),
        columns.iter().map(|c| c.to_string()).collect(),
        seen.into_iter().collect(),
    )
}

/// Project the fact table to its synthesized column list. Rows are kept
/// as-is; the fact table is never deduplicated.
pub fn materialize_fact(table: &DataTable, schema: &StarSchema) -> Result<MaterializedTable> {
    let indices: Vec<Option<usize>> = schema
        .fact_columns
        .iter()
        .map(|c| table.column_index(c))
        .collect();

    let rows: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|row| {
            indices
                .iter()
                .map(|idx| {
                    idx.and_then(|i| row.get(i))
                        .cloned()
                        .unwrap_or_default()
                })
                .collect()
        })
        .collect();

    MaterializedTable::new(
        schema.fact_table_name.clone(),
        schema.fact_columns.clone(),
        rows,
    )
}
