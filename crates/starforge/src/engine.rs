//! Main engine struct and public API.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::calendar::{CalendarGenerator, CalendarRow};
use crate::config::{default_horizon, EngineConfig};
use crate::curation::{apply_exclusions, validate_columns, CurationPort};
use crate::error::Result;
use crate::inference::{suggest_primary_key, ColumnProfiler, RoleClassifier};
use crate::input::DataTable;
use crate::schema::{ColumnProfile, MaterializedTable, RoleVerdict, StarSchema};
use crate::synthesis::{materialize_dimension, materialize_fact, SchemaSynthesizer};

/// Classification output for one table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Per-column statistics, in original column order.
    pub profiles: Vec<ColumnProfile>,
    /// One verdict per column, parallel to `profiles`.
    pub verdicts: Vec<RoleVerdict>,
    /// The selector's advisory primary-key choice.
    pub suggested_primary_key: Option<String>,
    /// Verdict counts for reporting.
    pub summary: AnalysisSummary,
}

/// Verdict counts across a table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub total_columns: usize,
    pub key_candidates: usize,
    pub dates: usize,
    pub measures: usize,
    pub dimension_attributes: usize,
    pub unclassified: usize,
}

impl AnalysisSummary {
    fn from_verdicts(verdicts: &[RoleVerdict]) -> Self {
        let mut summary = Self {
            total_columns: verdicts.len(),
            ..Self::default()
        };
        for verdict in verdicts {
            match verdict {
                RoleVerdict::KeyCandidate => summary.key_candidates += 1,
                RoleVerdict::Date => summary.dates += 1,
                RoleVerdict::Measure => summary.measures += 1,
                RoleVerdict::DimensionAttribute => summary.dimension_attributes += 1,
                RoleVerdict::None => summary.unclassified += 1,
            }
        }
        summary
    }
}

/// Everything a completed run produces. A run either finishes with all of
/// this or produces nothing; there is no valid partial result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    /// Analysis of the (possibly exclusion-filtered) table.
    pub analysis: AnalysisResult,
    /// Primary key after curation.
    pub primary_key: Option<String>,
    /// The synthesized star schema.
    pub schema: StarSchema,
    /// Deduplicated dimension projections, one per spec.
    pub dimension_tables: Vec<MaterializedTable>,
    /// Fact projection; absent when no fact column was identified.
    pub fact_table: Option<MaterializedTable>,
    /// The generated calendar dimension.
    pub calendar: Vec<CalendarRow>,
    /// Non-fatal warnings accumulated along the way.
    pub diagnostics: Vec<String>,
}

/// The star-schema inference engine.
///
/// All methods are pure in-memory computation over the given table; the
/// engine performs no I/O of its own.
pub struct Starforge {
    config: EngineConfig,
    profiler: ColumnProfiler,
    classifier: RoleClassifier,
    calendar: CalendarGenerator,
}

impl Starforge {
    /// Create an engine with default configuration.
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Create an engine with custom configuration.
    pub fn with_config(config: EngineConfig) -> Self {
        let profiler = ColumnProfiler::with_thresholds(config.thresholds.clone());
        let classifier = RoleClassifier::with_thresholds(config.thresholds.clone());
        let calendar = CalendarGenerator::with_thresholds(config.thresholds.clone());
        Self {
            config,
            profiler,
            classifier,
            calendar,
        }
    }

    /// Profile every column of the table.
    pub fn profile_columns(&self, table: &DataTable) -> Vec<ColumnProfile> {
        self.profiler.profile_table(table)
    }

    /// Classify profiled columns, one verdict each.
    pub fn classify(&self, profiles: &[ColumnProfile]) -> Vec<RoleVerdict> {
        self.classifier.classify_all(profiles)
    }

    /// Advisory primary-key suggestion.
    pub fn suggest_primary_key(
        &self,
        profiles: &[ColumnProfile],
        verdicts: &[RoleVerdict],
    ) -> Option<String> {
        suggest_primary_key(profiles, verdicts)
    }

    /// Synthesize the star schema from curated inputs.
    pub fn synthesize_schema(
        &self,
        table: &DataTable,
        profiles: &[ColumnProfile],
        verdicts: &[RoleVerdict],
        primary_key: Option<&str>,
        curated_keys: &[String],
        base_name: &str,
    ) -> (StarSchema, Vec<String>) {
        let synthesizer =
            SchemaSynthesizer::with_forced_columns(self.config.forced_columns.clone());
        synthesizer.synthesize(table, profiles, verdicts, primary_key, curated_keys, base_name)
    }

    /// Generate the calendar dimension for the table's date range.
    pub fn generate_calendar(&self, table: &DataTable, horizon: NaiveDate) -> Vec<CalendarRow> {
        self.calendar.generate(table, horizon)
    }

    /// The configured horizon, or Dec 31 five years from today.
    pub fn horizon(&self) -> NaiveDate {
        self.config
            .horizon
            .unwrap_or_else(|| default_horizon(Utc::now().date_naive()))
    }

    /// Profile, classify and suggest a key, without curation.
    pub fn analyze(&self, table: &DataTable) -> AnalysisResult {
        let profiles = self.profile_columns(table);
        let verdicts = self.classify(&profiles);
        let suggested_primary_key = self.suggest_primary_key(&profiles, &verdicts);
        let summary = AnalysisSummary::from_verdicts(&verdicts);
        AnalysisResult {
            profiles,
            verdicts,
            suggested_primary_key,
            summary,
        }
    }

    /// Run the full pipeline with a curation port:
    /// exclusions -> profile -> classify -> select -> curate -> synthesize,
    /// plus calendar generation.
    pub fn run(
        &self,
        table: &DataTable,
        base_name: &str,
        port: &mut dyn CurationPort,
    ) -> Result<RunResult> {
        let mut diagnostics = Vec::new();

        // Exclusions come first so every statistic downstream reflects the
        // curated dataset.
        let exclusions = port.category_exclusions(&table.headers);
        let (table, exclusion_diags) = apply_exclusions(table, &exclusions);
        diagnostics.extend(exclusion_diags);

        let analysis = self.analyze(&table);

        let primary_key = self.curate_primary_key(&table, &analysis, port, &mut diagnostics);
        let curated_keys = self.curate_dimension_keys(
            &table,
            &analysis,
            primary_key.as_deref(),
            port,
            &mut diagnostics,
        );

        let (schema, synth_diags) = self.synthesize_schema(
            &table,
            &analysis.profiles,
            &analysis.verdicts,
            primary_key.as_deref(),
            &curated_keys,
            base_name,
        );
        diagnostics.extend(synth_diags);

        let mut dimension_tables = Vec::with_capacity(schema.dimensions.len());
        for spec in &schema.dimensions {
            dimension_tables.push(materialize_dimension(&table, spec)?);
        }
        let fact_table = if schema.fact_columns.is_empty() {
            diagnostics.push("no fact column identified; fact table skipped".to_string());
            None
        } else {
            Some(materialize_fact(&table, &schema)?)
        };

        let calendar = self.generate_calendar(&table, self.horizon());

        Ok(RunResult {
            analysis,
            primary_key,
            schema,
            dimension_tables,
            fact_table,
            calendar,
            diagnostics,
        })
    }

    fn curate_primary_key(
        &self,
        table: &DataTable,
        analysis: &AnalysisResult,
        port: &mut dyn CurationPort,
        diagnostics: &mut Vec<String>,
    ) -> Option<String> {
        let suggested = analysis.suggested_primary_key.as_deref();
        match port.confirm_primary_key(suggested, &table.headers) {
            Some(name) if table.has_column(&name) => Some(name),
            Some(name) => {
                // Invalid override: report it and keep the suggestion.
                diagnostics.push(format!(
                    "primary key override '{}' not found in the source table; keeping suggestion",
                    name
                ));
                suggested.map(|s| s.to_string())
            }
            None => None,
        }
    }

    fn curate_dimension_keys(
        &self,
        table: &DataTable,
        analysis: &AnalysisResult,
        primary_key: Option<&str>,
        port: &mut dyn CurationPort,
        diagnostics: &mut Vec<String>,
    ) -> Vec<String> {
        let candidates: Vec<String> = analysis
            .profiles
            .iter()
            .zip(&analysis.verdicts)
            .filter(|(_, v)| **v == RoleVerdict::KeyCandidate)
            .map(|(p, _)| p.name.clone())
            .collect();

        let answer = port.choose_dimension_keys(&candidates, primary_key, &table.headers);
        if answer.is_empty() {
            // Blank answer defaults to the chosen primary key alone.
            return primary_key.map(|pk| vec![pk.to_string()]).unwrap_or_default();
        }

        let (valid, diags) = validate_columns(table, &answer);
        diagnostics.extend(diags);
        valid
    }
}

impl Default for Starforge {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curation::{AcceptAll, CategoryExclusion, ScriptedPort};

    fn make_table() -> DataTable {
        let headers = vec!["id_cliente", "nome_cliente", "grupo", "data_venda", "valor"];
        let mut rows = Vec::new();
        for i in 0..30 {
            rows.push(vec![
                format!("{}", i + 1),
                format!("Cliente {}", (i % 6) + 1),
                if i % 3 == 0 { "SAPATOS" } else { "BOLSAS" }.to_string(),
                format!("{:02}/03/2024", (i % 28) + 1),
                format!("{},90", 50 + (i % 20)),
            ]);
        }
        DataTable::new(headers.into_iter().map(String::from).collect(), rows, b';')
    }

    #[test]
    fn test_analyze_summary_counts() {
        let engine = Starforge::new();
        let analysis = engine.analyze(&make_table());

        assert_eq!(analysis.summary.total_columns, 5);
        assert_eq!(analysis.summary.key_candidates, 1);
        assert_eq!(analysis.summary.dates, 1);
        assert_eq!(analysis.summary.measures, 1);
        assert_eq!(analysis.suggested_primary_key, Some("id_cliente".to_string()));
    }

    #[test]
    fn test_run_defaults_dimension_keys_to_pk() {
        let engine = Starforge::new();
        let mut port = AcceptAll;
        let result = engine.run(&make_table(), "vendas", &mut port).unwrap();

        assert_eq!(result.primary_key, Some("id_cliente".to_string()));
        assert_eq!(result.schema.dimensions.len(), 1);
        assert_eq!(result.schema.dimensions[0].dimension_name, "dim_cliente");
        assert!(result.fact_table.is_some());
        assert!(!result.calendar.is_empty());
    }

    #[test]
    fn test_run_applies_exclusions_before_profiling() {
        let engine = Starforge::new();
        let mut port = ScriptedPort {
            exclusions: vec![CategoryExclusion {
                column: "grupo".into(),
                values: vec!["SAPATOS".into()],
            }],
            ..ScriptedPort::default()
        };
        let result = engine.run(&make_table(), "vendas", &mut port).unwrap();

        // 10 of 30 rows carried SAPATOS; profiling saw only the remainder.
        assert_eq!(result.analysis.profiles[0].cardinality, 20);
        if let Some(fact) = &result.fact_table {
            assert_eq!(fact.row_count(), 20);
        }
    }

    #[test]
    fn test_run_invalid_pk_override_keeps_suggestion() {
        let engine = Starforge::new();
        let mut port = ScriptedPort {
            primary_key: Some(Some("fantasma".into())),
            ..ScriptedPort::default()
        };
        let result = engine.run(&make_table(), "vendas", &mut port).unwrap();

        assert_eq!(result.primary_key, Some("id_cliente".to_string()));
        assert!(result.diagnostics.iter().any(|d| d.contains("fantasma")));
    }

    #[test]
    fn test_run_empty_table_degrades_gracefully() {
        let engine = Starforge::with_config(
            EngineConfig::default()
                .with_horizon(NaiveDate::from_ymd_opt(2030, 12, 31).unwrap()),
        );
        let table = DataTable::new(vec!["a".into(), "b".into()], vec![], b',');
        let mut port = AcceptAll;
        let result = engine.run(&table, "vazio", &mut port).unwrap();

        assert_eq!(result.analysis.profiles.len(), 2);
        assert!(result.analysis.verdicts.iter().all(|v| *v == RoleVerdict::None));
        assert_eq!(result.primary_key, None);
        assert!(result.schema.dimensions.is_empty());
        assert!(result.fact_table.is_none());
        // Calendar still spans the default horizon window.
        assert!(!result.calendar.is_empty());
        assert_eq!(
            result.calendar.last().unwrap().date,
            NaiveDate::from_ymd_opt(2030, 12, 31).unwrap()
        );
    }
}
