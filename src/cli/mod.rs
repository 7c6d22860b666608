pub mod classify;
pub mod ingest;
pub mod init;
pub mod report;
pub mod rules;
pub mod sources;
pub mod status;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "penny", about = "Bank statement ingestion and budget classification.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Set up penny: choose a data directory and initialize the database.
    Init {
        /// Path for penny data (default: ~/Documents/penny)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
    },
    /// Ingest a bank export: CSV goes through the source adapter, anything
    /// else is parsed as extracted statement text.
    Ingest {
        /// Path to the export file
        file: String,
        /// Source tag; for CSV it selects the adapter (see `penny sources`)
        #[arg(long)]
        source: String,
        /// Statement year for text files with yearless dates
        #[arg(long)]
        year: Option<i32>,
    },
    /// Apply keyword rules to uncategorized transactions.
    Classify,
    /// Manage classification rules.
    Rules {
        #[command(subcommand)]
        command: RulesCommands,
    },
    /// List registered source adapters.
    Sources,
    /// Monthly overview by bucket.
    Report {
        /// Month: YYYY-MM (default: current month)
        #[arg(long)]
        month: Option<String>,
    },
    /// Show current database and summary statistics.
    Status,
}

#[derive(Subcommand)]
pub enum RulesCommands {
    /// Add a classification rule.
    Add {
        /// Keyword matched against transaction names (case-insensitive)
        keyword: String,
        /// Category to assign
        #[arg(long)]
        category: String,
        /// Bucket to assign: SPEND, BILL, INCOME, TRANSFER
        #[arg(long, default_value = "SPEND")]
        bucket: String,
    },
    /// List rules in application order.
    List,
    /// Delete a rule by ID.
    Delete {
        /// Rule ID (shown in `penny rules list`)
        id: i64,
    },
}
