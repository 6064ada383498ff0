//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::commands::{DEFAULT_APP_PATH, DEFAULT_DB_PATH};

#[derive(Parser)]
#[command(name = "symbols-extract")]
#[command(about = "Extract the SF Symbols catalog into a SQLite database", long_about = None)]
pub(crate) struct Cli {
    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone)]
pub(crate) struct ExtractArgs {
    /// Database file to write
    #[arg(short, long, default_value = DEFAULT_DB_PATH)]
    pub output: PathBuf,

    /// Import into a throwaway database instead of --output
    #[arg(long)]
    pub in_memory: bool,

    /// Path to SF Symbols.app
    #[arg(long, default_value = DEFAULT_APP_PATH)]
    pub app: PathBuf,

    /// Overwrite an existing database without asking
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Read SF Symbols metadata and write it to a database
    Extract(ExtractArgs),

    /// Show row counts for an extracted database
    Stats {
        /// Database file to read
        #[arg(long, default_value = DEFAULT_DB_PATH)]
        db: PathBuf,
    },

    /// Show everything known about one symbol
    Lookup {
        /// Exact symbol name (e.g., circle.fill)
        name: String,

        /// Database file to read
        #[arg(long, default_value = DEFAULT_DB_PATH)]
        db: PathBuf,
    },
}
