//! # cdbc CLI entry point
//!
//! Parses command-line arguments, resolves configuration, and dispatches
//! to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cdb_cli::check::{run_check, CheckArgs};
use cdb_cli::config::ValidatorConfig;
use cdb_cli::registry::{run_registry, RegistryArgs};
use cdb_cli::EXIT_FATAL;

/// CDB naming conformance checker.
///
/// Validates the directory and file names of a CDB dataset against the
/// GTModel and MModel naming grammars and the DIS/FACC code registries.
#[derive(Parser, Debug)]
#[command(name = "cdbc", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines on stderr.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check a CDB root against the naming grammars.
    Check(CheckArgs),

    /// Inspect the loaded code registry.
    Registry(RegistryArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    if cli.log_json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }

    let config = match ValidatorConfig::resolve(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::from(EXIT_FATAL);
        }
    };
    tracing::debug!(?config, "resolved configuration");

    let result = match &cli.command {
        Commands::Check(args) => run_check(args, &config),
        Commands::Registry(args) => run_registry(args, &config),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(EXIT_FATAL)
        }
    }
}
