use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Carbontally - facility energy ingestion and emissions derivation
#[derive(Parser, Debug)]
#[command(name = "carbontally")]
#[command(about = "Derive carbon emissions from facility energy reports", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Show planned actions without executing them
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Path to a carbontally config file (TOML)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ingest energy report files and derive emissions
    Process(ProcessArgs),

    /// List the supported file formats
    Formats,

    /// Show the emission factor table
    Factors,
}

#[derive(Parser, Debug)]
pub struct ProcessArgs {
    /// Files or directories to ingest (XML, PDF)
    /// If a directory is provided, all supported files in it are processed
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Scan directories recursively
    #[arg(long)]
    pub recursive: bool,

    /// Write all derived locations to a CSV file
    #[arg(long, value_name = "FILE")]
    pub export: Option<PathBuf>,

    /// Seed for the synthesis random stream, for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,

    /// Skip the simulated PDF extraction delay
    #[arg(long)]
    pub no_delay: bool,

    /// Fail files with missing values instead of filling them in
    #[arg(long)]
    pub deny_synthesis: bool,

    /// Reject files larger than this size
    #[arg(long, value_name = "MB")]
    pub max_file_size_mb: Option<u64>,
}
