//! Calendar command - generate only the calendar dimension for a file.

use std::path::PathBuf;

use chrono::NaiveDate;
use colored::Colorize;
use starforge::calendar::dimension_table;
use starforge::input::ParserConfig;
use starforge::{EngineConfig, Parser, Starforge};

pub fn run(
    file: PathBuf,
    delimiter: Option<char>,
    horizon: Option<NaiveDate>,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let mut parser_config = ParserConfig::default();
    if let Some(c) = delimiter {
        parser_config = parser_config.with_delimiter_char(c)?;
    }
    let parser = Parser::with_config(parser_config);
    let (table, _) = parser.parse_file(&file)?;

    let engine = Starforge::with_config(EngineConfig {
        horizon,
        ..EngineConfig::default()
    });
    let rows = engine.generate_calendar(&table, engine.horizon());
    let calendar = dimension_table(&rows)?;

    let output = output.unwrap_or_else(|| PathBuf::from("dim_calendario.csv"));
    let mut writer = csv::Writer::from_path(&output)?;
    writer.write_record(&calendar.headers)?;
    for row in &calendar.rows {
        writer.write_record(row)?;
    }
    writer.flush()?;

    println!(
        "{} {} rows to {}",
        "Generated".green().bold(),
        rows.len().to_string().white().bold(),
        output.display()
    );

    Ok(())
}
