//! Sample command
//!
//! Usage: taskload sample [--pid <PID> | --simulate] [--window-ms <MS>] [--format <FORMAT>]

use crate::commands::output::{emit, render, OutputFormat};
use crate::commands::simulate::{Simulation, DEFAULT_UNITS};
use clap::Args;
use std::path::PathBuf;
use taskload_core::{Sampler, SamplerConfig, ThreadSleep};
use taskload_core_types::RequestContext;
use taskload_procfs::ProcfsScheduler;

#[derive(Debug, Args)]
pub struct SampleArgs {
    /// Process whose threads are sampled (default: this process)
    #[arg(long, conflicts_with = "simulate")]
    pub pid: Option<u32>,

    /// Sample a scripted in-memory scheduler instead of the host
    #[arg(long)]
    pub simulate: bool,

    /// Sampling window in milliseconds
    #[arg(long)]
    pub window_ms: Option<u64>,

    /// Override the number of execution units
    #[arg(long)]
    pub units: Option<u32>,

    /// TOML sampler configuration; flags take precedence
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Resolve the config file, then apply flag overrides
pub fn resolve_config(
    path: Option<&PathBuf>,
    window_ms: Option<u64>,
    units: Option<u32>,
) -> Result<SamplerConfig, Box<dyn std::error::Error>> {
    let mut config = match path {
        Some(path) => SamplerConfig::load(path)?,
        None => SamplerConfig::default(),
    };
    if let Some(window_ms) = window_ms {
        config.window_ms = window_ms;
    }
    if units.is_some() {
        config.execution_units = units;
    }
    Ok(config)
}

/// Execute sample command
pub fn execute(args: SampleArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = resolve_config(args.config.as_ref(), args.window_ms, args.units)?;
    let sampler = Sampler::new(config)?;

    let report = if args.simulate {
        let units = sampler.config().execution_units.unwrap_or(DEFAULT_UNITS);
        let simulation = Simulation::boot(units)?;
        let ctx = RequestContext::new("cli:sample:simulate");
        sampler.sample(simulation.scheduler(), &simulation, &ctx)?
    } else {
        let scheduler = match args.pid {
            Some(pid) => ProcfsScheduler::new(pid)?,
            None => ProcfsScheduler::current_process()?,
        };
        let ctx = RequestContext::new(format!("cli:sample:pid:{}", scheduler.pid()));
        sampler.sample(&scheduler, &ThreadSleep, &ctx)?
    };

    emit(&render(&report, args.format)?, args.output.as_ref())
}
