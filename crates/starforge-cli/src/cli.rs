//! CLI argument definitions using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Starforge: star-schema inference for flat tabular exports
#[derive(Parser)]
#[command(name = "starforge")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a delimited file and synthesize a star schema
    Analyze {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Directory to export the synthesized tables as CSV
        #[arg(short, long)]
        export: Option<PathBuf>,

        /// Write the analysis report as JSON to this path
        #[arg(short, long)]
        report: Option<PathBuf>,

        /// Accept every suggestion without prompting
        #[arg(short, long)]
        yes: bool,

        /// Field delimiter (default: auto-detect)
        #[arg(short, long)]
        delimiter: Option<char>,

        /// Column always carried into the fact table (repeatable)
        #[arg(long = "forced-column", value_name = "COLUMN")]
        forced_columns: Vec<String>,

        /// Calendar horizon as YYYY-MM-DD (default: Dec 31 five years out)
        #[arg(long)]
        horizon: Option<chrono::NaiveDate>,
    },

    /// Generate only the calendar dimension for a data file
    Calendar {
        /// Path to the data file whose date range drives the calendar
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Field delimiter (default: auto-detect)
        #[arg(short, long)]
        delimiter: Option<char>,

        /// Calendar horizon as YYYY-MM-DD (default: Dec 31 five years out)
        #[arg(long)]
        horizon: Option<chrono::NaiveDate>,

        /// Output CSV path (default: dim_calendario.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
