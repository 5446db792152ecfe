//! `DualLoc` CLI - command-line interface for `.localization` string tables

pub mod commands;
pub mod progress;

use clap::Parser;
use commands::Commands;

#[derive(Parser)]
#[command(name = "dualloc", version)]
#[command(
    about = "DualLoc: extract, inject, validate and merge .localization subtitles",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Run the `DualLoc` CLI
pub fn run_cli() -> anyhow::Result<()> {
    // Setup logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    cli.command.execute()?;

    Ok(())
}
