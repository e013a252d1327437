//! Starforge CLI - star-schema inference for flat tabular exports.

mod cli;
mod commands;
mod console;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Analyze {
            file,
            export,
            report,
            yes,
            delimiter,
            forced_columns,
            horizon,
        } => commands::analyze::run(
            file,
            export,
            report,
            yes,
            delimiter,
            forced_columns,
            horizon,
            cli.verbose,
        ),

        Commands::Calendar {
            file,
            delimiter,
            horizon,
            output,
        } => commands::calendar::run(file, delimiter, horizon, output),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
