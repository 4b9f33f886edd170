// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! adlift CLI - drive an ad-unit lifecycle from the command line.
//!
//! # Examples
//!
//! ```bash
//! # Run a simulated session: two failed loads, then a fill that pays
//! adlift run
//!
//! # Same session, custom script and JSON event log
//! adlift run --failures 4 --format json
//!
//! # Load the unit config from a file
//! adlift run --config ./unit.json
//!
//! # List known ad networks and their sample unit IDs
//! adlift networks
//!
//! # Evaluate the overlay geometry formula
//! adlift geometry --x 100 --y 200 --screen-height 800 --dpi 320 \
//!     --element-width 50 --element-height 30
//! ```

mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{geometry, networks, run};

// ============================================================================
// CLI Definition
// ============================================================================

/// adlift CLI - ad-unit lifecycle demos and diagnostics.
#[derive(Parser)]
#[command(name = "adlift")]
#[command(about = "Ad-unit lifecycle demo CLI")]
#[command(version)]
pub struct Cli {
    /// Subcommand to run. If none, runs 'run' by default.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Quiet mode (minimal output).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Drive a simulated ad session (default if no command specified).
    #[command(visible_alias = "r")]
    Run(run::RunArgs),

    /// List known ad networks.
    #[command(visible_alias = "n")]
    Networks,

    /// Evaluate the overlay geometry formula.
    #[command(visible_alias = "g")]
    Geometry(geometry::GeometryArgs),
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return; // No logging in quiet mode
    }

    let filter = if verbose {
        EnvFilter::new("adlift=debug,info")
    } else {
        EnvFilter::new("adlift=warn")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Some(Commands::Run(args)) => run::run(args, &cli).await,
        Some(Commands::Networks) => networks::run(&cli),
        Some(Commands::Geometry(args)) => geometry::run(args, &cli),
        None => run::run(&run::RunArgs::default(), &cli).await,
    };

    if let Err(e) = result {
        if !cli.quiet {
            eprintln!("Error: {e}");
        }
        std::process::exit(1);
    }

    Ok(())
}
