//! Carbontally CLI - Command-line interface
//!
//! This is the main CLI adapter for the carbontally pipeline.

mod cli;
mod commands;
mod dry_run;
mod output;
mod output_types;
mod scan;
mod progress;
mod errors;

use anyhow::Result;
use clap::Parser;
use cli::Cli;

fn main() -> Result<()> {
    // Initialize tracing; logs go to stderr so --json stdout stays parseable
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Create async runtime
    let runtime = tokio::runtime::Runtime::new()?;

    // Execute the command
    let outcome = runtime.block_on(async { commands::execute(cli).await });

    if let Err(error) = outcome {
        match error.downcast::<errors::CliError>() {
            Ok(cli_error) => {
                cli_error.display();
                std::process::exit(1);
            }
            Err(other) => return Err(other),
        }
    }

    Ok(())
}
