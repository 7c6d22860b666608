mod adapter;
mod cli;
mod db;
mod engine;
mod error;
mod fingerprint;
mod fmt;
mod ingest;
mod models;
mod normalize;
mod reports;
mod settings;
mod statement;
mod store;

use clap::Parser;

use cli::{Cli, Commands, RulesCommands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { data_dir } => cli::init::run(data_dir),
        Commands::Ingest { file, source, year } => cli::ingest::run(&file, &source, year),
        Commands::Classify => cli::classify::run(),
        Commands::Rules { command } => match command {
            RulesCommands::Add {
                keyword,
                category,
                bucket,
            } => cli::rules::add(&keyword, &category, &bucket),
            RulesCommands::List => cli::rules::list(),
            RulesCommands::Delete { id } => cli::rules::delete(id),
        },
        Commands::Sources => cli::sources::run(),
        Commands::Report { month } => cli::report::run(month),
        Commands::Status => cli::status::run(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
