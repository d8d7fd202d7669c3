//! pagediff CLI - Main Entry Point
//!
//! Compares reference and reproduction screenshots of web pages and reports
//! the regions that differ.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use pagediff_cli::commands::{batch, capture, colors, compare, init, regions};
use pagediff_cli::config::ProjectConfig;
use pagediff_cli::output;

/// pagediff - Region-level visual diffing of web pages
#[derive(Parser)]
#[command(name = "pagediff")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Project configuration file
    #[arg(long, default_value = "pagediff.toml", global = true, env = "PAGEDIFF_CONFIG")]
    config: PathBuf,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: output::OutputFormat,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Overall difference percentage between two screenshots
    Compare(compare::CompareArgs),

    /// Regions where two screenshots differ
    Regions(regions::RegionsArgs),

    /// Dominant colours of fixed page areas
    Colors(colors::ColorsArgs),

    /// Capture configured pages with Playwright
    Capture(capture::CaptureArgs),

    /// Analyze every configured page from captured screenshots
    Batch(batch::BatchArgs),

    /// Write a starter configuration file
    Init(init::InitArgs),

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = ProjectConfig::load(&cli.config)?;

    match cli.command {
        Commands::Compare(args) => compare::execute(args, &config, cli.format)?,
        Commands::Regions(args) => regions::execute(args, &config, cli.format)?,
        Commands::Colors(args) => colors::execute(args, cli.format)?,
        Commands::Capture(args) => capture::execute(args, &config).await?,
        Commands::Batch(args) => batch::execute(args, &config, cli.format).await?,
        Commands::Init(args) => init::execute(args)?,
        Commands::Version => {
            println!("pagediff v{}", env!("CARGO_PKG_VERSION"));
            println!("Region-level visual diffing of web pages");
            println!("  core: pagediff-common v{}", pagediff_common::VERSION);
        }
    }

    Ok(())
}
