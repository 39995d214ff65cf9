//! # idlgen CLI entry point
//!
//! Parses command-line arguments, loads the optional configuration file,
//! and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use idlgen_cli::resolve::{run_resolve, ResolveArgs};
use idlgen_cli::sample::{run_sample, SampleArgs};
use idlgen_cli::stubs::{run_stubs, StubsArgs};
use idlgen_cli::GeneratorConfig;

/// idlgen: DDS XML type tooling.
///
/// Resolves type references across a corpus of DDS XML type documents,
/// synthesizes sample JSON messages for structs, and generates publish API
/// stubs.
#[derive(Parser, Debug)]
#[command(name = "idlgen", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate sample JSON for the structs of interest in each input document.
    Sample(SampleArgs),

    /// Resolve a type reference and report what it names.
    Resolve(ResolveArgs),

    /// Generate publish API stubs (C header and source).
    Stubs(StubsArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "idlgen starting");

    let config = match GeneratorConfig::load_or_default(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e:#}");
            return ExitCode::from(1);
        }
    };

    let result = match cli.command {
        Commands::Sample(args) => run_sample(&args, &config),
        Commands::Resolve(args) => run_resolve(&args),
        Commands::Stubs(args) => run_stubs(&args, &config),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
