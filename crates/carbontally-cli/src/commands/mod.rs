//! Command implementations

mod factors;
mod formats;
mod process;

use crate::cli::{Cli, Commands};
use crate::output::OutputWriter;
use anyhow::Result;

/// Execute a CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    let output = OutputWriter::new(cli.json);

    match cli.command {
        Commands::Process(args) => {
            process::execute(args, &output, cli.dry_run, cli.config.as_deref()).await
        }
        Commands::Formats => formats::execute(&output),
        Commands::Factors => factors::execute(&output),
    }
}
