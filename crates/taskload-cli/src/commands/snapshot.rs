//! Snapshot command
//!
//! Usage: taskload snapshot [--pid <PID> | --simulate] [--out <FILE>]

use crate::commands::output::emit;
use crate::commands::simulate::{Simulation, DEFAULT_UNITS};
use clap::Args;
use std::path::PathBuf;
use taskload_core::{acquire_with_retry, CapacityPolicy, SamplerConfig};
use taskload_procfs::ProcfsScheduler;

#[derive(Debug, Args)]
pub struct SnapshotArgs {
    /// Process whose threads are captured (default: this process)
    #[arg(long, conflicts_with = "simulate")]
    pub pid: Option<u32>,

    /// Capture the scripted in-memory scheduler instead of the host
    #[arg(long)]
    pub simulate: bool,

    /// TOML sampler configuration; only the capacity settings apply
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output file path (default: stdout)
    #[arg(long)]
    pub out: Option<PathBuf>,
}

/// Execute snapshot command
pub fn execute(args: SnapshotArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &args.config {
        Some(path) => SamplerConfig::load(path)?,
        None => SamplerConfig::default(),
    };
    let policy = CapacityPolicy::from(&config);

    let snapshot = if args.simulate {
        let simulation =
            Simulation::boot(config.execution_units.unwrap_or(DEFAULT_UNITS))?;
        acquire_with_retry(simulation.scheduler(), &policy)?
    } else {
        let scheduler = match args.pid {
            Some(pid) => ProcfsScheduler::new(pid)?,
            None => ProcfsScheduler::current_process()?,
        };
        acquire_with_retry(&scheduler, &policy)?
    };

    let mut json = serde_json::to_string_pretty(&snapshot)?;
    json.push('\n');
    emit(&json, args.out.as_ref())
}
