use crate::commands;
use crate::config::AppConfig;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "sol-import-fixer",
    version,
    about = "Solidity import lint and fix toolkit"
)]
struct Cli {
    /// Increase verbosity (-v, -vv). Uses RUST_LOG under the hood
    #[arg(short = 'v', action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to solfix.toml (defaults to ./solfix.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Scan for plain imports and inline-logic modifiers; exit 1 on findings
    Scan {
        /// Root directory to scan (defaults to current directory)
        root: Option<PathBuf>,
    },
    /// Same scan, persisted as lint-scan-report.json; always exits 0
    Report {
        /// Root directory to scan (defaults to current directory)
        root: Option<PathBuf>,
    },
    /// Rewrite plain imports into named form, backing up each changed file
    Fix {
        /// Report intended changes without touching any file
        #[arg(long = "dry", short = 'n')]
        dry_run: bool,
    },
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| level.to_string());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(env_filter))
        .with_target(false)
        .without_time()
        .init();
}

pub fn run_cli() -> Result<()> {
    run_cli_with(std::env::args())
}

pub fn run_cli_with<I, S>(args: I) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let cli = Cli::parse_from(args.into_iter().map(Into::into));
    init_tracing(cli.verbose);
    let config = AppConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Scan { root } => {
            let root = root.unwrap_or_else(|| PathBuf::from("."));
            let total = commands::scan(&root, &config)?;
            if total > 0 {
                std::process::exit(1);
            }
        }
        Commands::Report { root } => {
            let root = root.unwrap_or_else(|| PathBuf::from("."));
            commands::report(&root, &config)?;
        }
        Commands::Fix { dry_run } => {
            commands::fix(&config, dry_run)?;
        }
    }
    Ok(())
}
