//! Starforge: star-schema inference for flat tabular exports.
//!
//! Starforge profiles a delimited file, classifies every column into a
//! modeling role, and synthesizes a dimensional model: deduplicated
//! dimension tables keyed by curated natural keys, a fact table carrying
//! keys, dates and measures, and a generated calendar dimension covering
//! the data's date range.
//!
//! # Core Principles
//!
//! - **Advisory, not autonomous**: every structural decision can be
//!   confirmed or overridden through a [`CurationPort`]
//! - **Non-destructive**: the source table is never modified; outputs are
//!   whole-table replacements
//! - **Deterministic**: the same input and the same answers produce the
//!   same schema
//!
//! # Example
//!
//! ```no_run
//! use starforge::{AcceptAll, Parser, Starforge};
//!
//! let (table, metadata) = Parser::new().parse_file("vendas.csv").unwrap();
//! let engine = Starforge::new();
//! let result = engine
//!     .run(&table, &metadata.base_name(), &mut AcceptAll)
//!     .unwrap();
//!
//! println!("Fact table: {}", result.schema.fact_table_name);
//! println!("Dimensions: {}", result.schema.dimensions.len());
//! ```

pub mod calendar;
pub mod config;
pub mod curation;
pub mod error;
pub mod inference;
pub mod input;
pub mod schema;
pub mod sink;
pub mod synthesis;

mod engine;

pub use crate::engine::{AnalysisResult, AnalysisSummary, RunResult, Starforge};
pub use calendar::{CalendarGenerator, CalendarRow};
pub use config::{default_horizon, EngineConfig, Thresholds};
pub use curation::{AcceptAll, CategoryExclusion, CurationPort, ScriptedPort};
pub use error::{Result, StarforgeError};
pub use input::{DataTable, Parser, SourceMetadata};
pub use schema::{
    ColumnDtype, ColumnProfile, DimensionSpec, MaterializedTable, RoleVerdict, StarSchema,
};
pub use sink::{export_tables, CsvDirSink, ExportReport, TableSink};
