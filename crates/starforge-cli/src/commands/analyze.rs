//! Analyze command - infer and export a star schema from a data file.

use std::io;
use std::path::PathBuf;

use chrono::NaiveDate;
use colored::Colorize;
use starforge::input::ParserConfig;
use starforge::{
    calendar, export_tables, AcceptAll, CsvDirSink, EngineConfig, MaterializedTable, Parser,
    RunResult, Starforge,
};

use crate::console::ConsolePort;

#[allow(clippy::too_many_arguments)]
pub fn run(
    file: PathBuf,
    export: Option<PathBuf>,
    report: Option<PathBuf>,
    yes: bool,
    delimiter: Option<char>,
    forced_columns: Vec<String>,
    horizon: Option<NaiveDate>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    // Validate input file exists
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    println!(
        "{} {}",
        "Analyzing".cyan().bold(),
        file.display().to_string().white()
    );

    let mut parser_config = ParserConfig::default();
    if let Some(c) = delimiter {
        parser_config = parser_config.with_delimiter_char(c)?;
    }
    let parser = Parser::with_config(parser_config);
    let (table, metadata) = parser.parse_file(&file)?;

    if verbose {
        println!(
            "  {} rows, {} columns ({})",
            metadata.row_count, metadata.column_count, metadata.format
        );
    }

    let config = EngineConfig {
        forced_columns,
        horizon,
        ..EngineConfig::default()
    };
    let engine = Starforge::with_config(config);

    let result = if yes {
        engine.run(&table, &metadata.base_name(), &mut AcceptAll)?
    } else {
        let stdin = io::stdin();
        let mut port = ConsolePort::new(stdin.lock(), io::stdout());
        engine.run(&table, &metadata.base_name(), &mut port)?
    };

    print_summary(&result, verbose);

    if let Some(path) = report {
        let json = serde_json::to_string_pretty(&result.analysis)?;
        std::fs::write(&path, json)?;
        println!(
            "{} {}",
            "Report saved to".green().bold(),
            path.display().to_string().white()
        );
    }

    if let Some(dir) = export {
        export_result(&result, &dir)?;
    }

    Ok(())
}

fn print_summary(result: &RunResult, verbose: bool) {
    let summary = &result.analysis.summary;

    if verbose {
        println!();
        println!("{}", "Columns:".yellow().bold());
        for (profile, verdict) in result.analysis.profiles.iter().zip(&result.analysis.verdicts) {
            println!(
                "  {:30} {:10} {}",
                profile.name,
                format!("{:?}", profile.dtype),
                verdict.label()
            );
        }
        println!();
    }

    println!(
        "Classified {} columns ({} keys, {} dates, {} measures, {} attributes)",
        summary.total_columns.to_string().white().bold(),
        summary.key_candidates.to_string().cyan(),
        summary.dates.to_string().blue(),
        summary.measures.to_string().green(),
        summary.dimension_attributes.to_string().yellow(),
    );

    match &result.primary_key {
        Some(pk) => println!("Primary key: {}", pk.cyan().bold()),
        None => println!("Primary key: {}", "none".dimmed()),
    }

    println!(
        "Schema: {} with {} dimension(s)",
        result.schema.fact_table_name.white().bold(),
        result.schema.dimensions.len()
    );
    for dim in &result.schema.dimensions {
        println!(
            "  {} (key: {}, {} attribute(s))",
            dim.dimension_name.white(),
            dim.natural_key_column,
            dim.attribute_columns.len()
        );
    }

    for diagnostic in &result.diagnostics {
        println!("{} {}", "warning:".yellow().bold(), diagnostic);
    }
}

fn export_result(result: &RunResult, dir: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let mut tables: Vec<MaterializedTable> = result.dimension_tables.clone();
    if let Some(fact) = &result.fact_table {
        tables.push(fact.clone());
    }
    tables.push(calendar::dimension_table(&result.calendar)?);

    let mut sink = CsvDirSink::new(dir)?;
    let report = export_tables(&mut sink, &tables);

    for name in &report.written {
        println!("{} {}", "Exported".green().bold(), name.white());
    }
    for failure in &report.failures {
        eprintln!("{} {}", "error:".red().bold(), failure);
    }

    if report.is_complete() {
        println!(
            "{} {}",
            "All tables exported to".green().bold(),
            dir.display().to_string().white()
        );
    }

    Ok(())
}
