//! taskload CLI
//!
//! Command-line interface for one-shot task utilization sampling

use clap::{Parser, Subcommand};
use taskload_core::logging_facility::{self, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "taskload")]
#[command(about = "taskload - per-task scheduler utilization over one window", long_about = None)]
struct Cli {
    /// Logging profile (dev, prod); silent when absent
    #[arg(long, global = true)]
    log_profile: Option<Profile>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Sample a scheduler over one window and print the report
    Sample(commands::sample::SampleArgs),
    /// Capture one snapshot as JSON
    Snapshot(commands::snapshot::SnapshotArgs),
    /// Diff two saved snapshots
    Diff(commands::diff::DiffArgs),
}

fn main() {
    let cli = Cli::parse();

    if let Some(profile) = cli.log_profile {
        logging_facility::init(profile);
    }

    let result = match cli.command {
        Commands::Sample(args) => commands::sample::execute(args),
        Commands::Snapshot(args) => commands::snapshot::execute(args),
        Commands::Diff(args) => commands::diff::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
