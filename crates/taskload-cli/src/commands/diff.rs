//! Diff command
//!
//! Usage: taskload diff --before <FILE> --after <FILE> [--units <N>] [--format <FORMAT>]

use crate::commands::output::{emit, render, OutputFormat};
use clap::Args;
use std::path::{Path, PathBuf};
use taskload_core::{compute_diff, DiffOptions, Snapshot};
use taskload_core_types::RequestId;

#[derive(Debug, Args)]
pub struct DiffArgs {
    /// Snapshot captured first
    #[arg(long)]
    pub before: PathBuf,

    /// Snapshot captured second
    #[arg(long)]
    pub after: PathBuf,

    /// Execution units of the scheduler both snapshots came from
    #[arg(long, default_value_t = 1)]
    pub units: u32,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

fn load_snapshot(path: &Path) -> Result<Snapshot, Box<dyn std::error::Error>> {
    let bytes = std::fs::read(path)
        .map_err(|e| format!("cannot read snapshot {}: {}", path.display(), e))?;
    Ok(Snapshot::from_json_bytes(&bytes)?)
}

/// Execute diff command
pub fn execute(args: DiffArgs) -> Result<(), Box<dyn std::error::Error>> {
    let before = load_snapshot(&args.before)?;
    let after = load_snapshot(&args.after)?;

    let options = DiffOptions::default().with_request_id(RequestId::new());
    let report = compute_diff(&before, &after, args.units, &options)?;

    emit(&render(&report, args.format)?, args.output.as_ref())
}
