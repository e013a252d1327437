//! Curation protocol: the human-in-the-loop boundary between
//! classification and synthesis.
//!
//! The engine never talks to a terminal. Hosts inject a [`CurationPort`],
//! a synchronous request/response seam, so the same pipeline runs against
//! a console, a test script, or an auto-accept policy. Category exclusions
//! are applied *before* profiling so statistics reflect the curated
//! dataset; key choices are validated here and invalid names are dropped
//! with a diagnostic, never an error.

use crate::input::DataTable;

/// Rows to drop from the source table before profiling: any row whose
/// value in `column` matches one of `values`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryExclusion {
    /// Column holding the category.
    pub column: String,
    /// Category values to exclude.
    pub values: Vec<String>,
}

/// Synchronous human-override port.
///
/// Implementations block until an answer is available; the base design has
/// no timeout (a host integration may add one).
pub trait CurationPort {
    /// Accept or override the suggested primary key. Returning `None`
    /// means "no primary key".
    fn confirm_primary_key(
        &mut self,
        suggested: Option<&str>,
        columns: &[String],
    ) -> Option<String>;

    /// Choose the ordered dimension key columns. An empty answer lets the
    /// engine default to "just the chosen primary key" when one exists.
    fn choose_dimension_keys(
        &mut self,
        key_candidates: &[String],
        primary_key: Option<&str>,
        columns: &[String],
    ) -> Vec<String>;

    /// Category values to exclude from the table before profiling.
    fn category_exclusions(&mut self, _columns: &[String]) -> Vec<CategoryExclusion> {
        Vec::new()
    }
}

/// Port that accepts every suggestion unchanged. Used for non-interactive
/// runs.
#[derive(Debug, Default)]
pub struct AcceptAll;

impl CurationPort for AcceptAll {
    fn confirm_primary_key(
        &mut self,
        suggested: Option<&str>,
        _columns: &[String],
    ) -> Option<String> {
        suggested.map(|s| s.to_string())
    }

    fn choose_dimension_keys(
        &mut self,
        _key_candidates: &[String],
        _primary_key: Option<&str>,
        _columns: &[String],
    ) -> Vec<String> {
        Vec::new()
    }
}

/// Port with pre-scripted answers, for tests and batch replays.
#[derive(Debug, Default)]
pub struct ScriptedPort {
    /// Answer for the primary-key prompt. `None` keeps the suggestion.
    pub primary_key: Option<Option<String>>,
    /// Answer for the dimension-key prompt.
    pub dimension_keys: Vec<String>,
    /// Answer for the exclusion prompt.
    pub exclusions: Vec<CategoryExclusion>,
}

impl ScriptedPort {
    /// Port that keeps every suggestion and supplies the given keys.
    pub fn with_dimension_keys(keys: Vec<String>) -> Self {
        Self {
            dimension_keys: keys,
            ..Self::default()
        }
    }
}

impl CurationPort for ScriptedPort {
    fn confirm_primary_key(
        &mut self,
        suggested: Option<&str>,
        _columns: &[String],
    ) -> Option<String> {
        match self.primary_key.take() {
            Some(answer) => answer,
            None => suggested.map(|s| s.to_string()),
        }
    }

    fn choose_dimension_keys(
        &mut self,
        _key_candidates: &[String],
        _primary_key: Option<&str>,
        _columns: &[String],
    ) -> Vec<String> {
        std::mem::take(&mut self.dimension_keys)
    }

    fn category_exclusions(&mut self, _columns: &[String]) -> Vec<CategoryExclusion> {
        std::mem::take(&mut self.exclusions)
    }
}

/// Split a curated name list into (known, diagnostics), dropping names
/// absent from the table.
pub fn validate_columns(table: &DataTable, names: &[String]) -> (Vec<String>, Vec<String>) {
    let mut valid = Vec::new();
    let mut diagnostics = Vec::new();
    for name in names {
        if table.has_column(name) {
            valid.push(name.clone());
        } else {
            diagnostics.push(format!("column '{}' not found in the source table; ignoring", name));
        }
    }
    (valid, diagnostics)
}

/// Apply category exclusions, returning the filtered table and any
/// diagnostics for unknown columns. Must run upstream of the profiler.
pub fn apply_exclusions(
    table: &DataTable,
    exclusions: &[CategoryExclusion],
) -> (DataTable, Vec<String>) {
    let mut diagnostics = Vec::new();
    let mut filtered = table.clone();

    for exclusion in exclusions {
        match filtered.column_index(&exclusion.column) {
            Some(index) => {
                filtered = filtered.filter_rows(|row| {
                    row.get(index)
                        .map(|v| !exclusion.values.contains(v))
                        .unwrap_or(true)
                });
            }
            None => diagnostics.push(format!(
                "exclusion column '{}' not found in the source table; ignoring",
                exclusion.column
            )),
        }
    }

    (filtered, diagnostics)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DataTable {
        DataTable::new(
            vec!["grupo".into(), "valor".into()],
            vec![
                vec!["SAPATOS".into(), "10".into()],
                vec!["BOLSAS".into(), "20".into()],
                vec!["SAPATOS".into(), "30".into()],
                vec!["CINTOS".into(), "40".into()],
            ],
            b';',
        )
    }

    #[test]
    fn test_validate_columns_drops_unknown() {
        let table = sample();
        let (valid, diags) =
            validate_columns(&table, &["grupo".to_string(), "inexistente".to_string()]);
        assert_eq!(valid, vec!["grupo".to_string()]);
        assert_eq!(diags.len(), 1);
        assert!(diags[0].contains("inexistente"));
    }

    #[test]
    fn test_apply_exclusions_filters_rows() {
        let table = sample();
        let exclusions = vec![CategoryExclusion {
            column: "grupo".into(),
            values: vec!["SAPATOS".into()],
        }];
        let (filtered, diags) = apply_exclusions(&table, &exclusions);
        assert!(diags.is_empty());
        assert_eq!(filtered.row_count(), 2);
        assert!(filtered.column_values(0).all(|v| v != "SAPATOS"));
    }

    #[test]
    fn test_apply_exclusions_unknown_column_is_diagnostic() {
        let table = sample();
        let exclusions = vec![CategoryExclusion {
            column: "subgrupo".into(),
            values: vec!["X".into()],
        }];
        let (filtered, diags) = apply_exclusions(&table, &exclusions);
        assert_eq!(filtered.row_count(), 4);
        assert_eq!(diags.len(), 1);
    }

    #[test]
    fn test_accept_all_keeps_suggestion() {
        let mut port = AcceptAll;
        let columns = vec!["id".to_string()];
        assert_eq!(
            port.confirm_primary_key(Some("id"), &columns),
            Some("id".to_string())
        );
        assert_eq!(port.confirm_primary_key(None, &columns), None);
        assert!(port.choose_dimension_keys(&[], None, &columns).is_empty());
    }

    #[test]
    fn test_scripted_port_overrides() {
        let mut port = ScriptedPort {
            primary_key: Some(Some("outro".into())),
            dimension_keys: vec!["id_cliente".into()],
            exclusions: Vec::new(),
        };
        let columns = vec!["id".to_string(), "outro".to_string()];
        assert_eq!(
            port.confirm_primary_key(Some("id"), &columns),
            Some("outro".to_string())
        );
        assert_eq!(
            port.choose_dimension_keys(&[], None, &columns),
            vec!["id_cliente".to_string()]
        );
    }
}
