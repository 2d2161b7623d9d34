// Module declarations
pub(crate) mod cli;
pub(crate) mod commands;
pub(crate) mod config;
pub(crate) mod discover;
pub(crate) mod report;
pub(crate) mod rewrite;
pub(crate) mod scan;

use anyhow::Result;

/// Main entry point for CLI usage
pub fn run_cli() -> Result<()> {
    cli::run_cli()
}

/// Entry point for CLI usage with custom arguments
pub fn run_cli_with<I, S>(args: I) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    cli::run_cli_with(args)
}
