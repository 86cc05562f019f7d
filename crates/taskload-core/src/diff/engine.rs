//! Utilization diff computation.
//!
//! The core entry point is [`compute_diff`], which accepts two snapshots of
//! the same scheduler and produces a [`UtilizationReport`].

use crate::diff::correlate::{correlate, CorrelationStrategy};
use crate::diff::model::{TaskUtilization, UtilizationReport};
use crate::errors::{Result, SamplerError};
use crate::model::Snapshot;
use crate::{log_op_end, log_op_error, log_op_start};
use std::time::Instant;
use taskload_core_types::RequestId;

/// Knobs for a single diff
#[derive(Debug, Clone, Default)]
pub struct DiffOptions {
    pub strategy: CorrelationStrategy,
    /// Id to stamp on the report; a fresh one is generated when absent
    pub request_id: Option<RequestId>,
}

impl DiffOptions {
    pub fn with_strategy(mut self, strategy: CorrelationStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }
}

/// `delta * 100 / (elapsed * units)`, truncated
///
/// Widened to u128 so large tick counters cannot overflow.
fn percent_of(delta: u64, elapsed: u64, execution_units: u32) -> u64 {
    let denom = elapsed as u128 * execution_units as u128;
    let pct = (delta as u128 * 100) / denom;
    u64::try_from(pct).unwrap_or(u64::MAX)
}

/// Compute per-task utilization between two snapshots.
///
/// `before` must have been captured causally before `after`.
///
/// # Errors
///
/// - `DegenerateInterval` — `after.total_runtime <= before.total_runtime`
/// - `InvalidInput` — `execution_units` is 0, or a snapshot repeats a handle
pub fn compute_diff(
    before: &Snapshot,
    after: &Snapshot,
    execution_units: u32,
    options: &DiffOptions,
) -> Result<UtilizationReport> {
    let start = Instant::now();
    let request_id = options.request_id.clone().unwrap_or_default();
    log_op_start!(
        "compute_diff",
        request_id = request_id.as_str(),
        before_len = before.len(),
        after_len = after.len()
    );

    let result = compute_diff_inner(before, after, execution_units, options.strategy, request_id);
    let duration_ms = start.elapsed().as_millis() as u64;
    match &result {
        Ok(report) => {
            log_op_end!(
                "compute_diff",
                duration_ms = duration_ms,
                elapsed_ticks = report.elapsed,
                matched_len = report.matched.len(),
                deleted_len = report.deleted.len(),
                created_len = report.created.len()
            );
        }
        Err(err) => {
            log_op_error!("compute_diff", err.clone(), duration_ms = duration_ms);
        }
    }
    result
}

fn compute_diff_inner(
    before: &Snapshot,
    after: &Snapshot,
    execution_units: u32,
    strategy: CorrelationStrategy,
    request_id: RequestId,
) -> Result<UtilizationReport> {
    if execution_units == 0 {
        return Err(SamplerError::ZeroExecutionUnits.into());
    }

    let elapsed = after
        .total_runtime
        .checked_sub(before.total_runtime)
        .filter(|&e| e > 0)
        .ok_or(SamplerError::DegenerateInterval {
            before: before.total_runtime,
            after: after.total_runtime,
        })?;

    before.validate()?;
    after.validate()?;

    let pairing = correlate(&before.records, &after.records, strategy);

    for handle in &pairing.reused {
        tracing::warn!(
            component = module_path!(),
            op = "compute_diff",
            task_handle = %handle,
            "task runtime went backwards; treating handle as recycled"
        );
    }

    let matched = pairing
        .matched
        .iter()
        .map(|&(bi, ai)| {
            let b = &before.records[bi];
            let a = &after.records[ai];
            let delta = a.cumulative_runtime - b.cumulative_runtime;
            TaskUtilization {
                handle: a.handle,
                name: a.name.clone(),
                delta,
                percent: percent_of(delta, elapsed, execution_units),
            }
        })
        .collect();

    Ok(UtilizationReport {
        request_id,
        elapsed,
        execution_units,
        matched,
        deleted: pairing
            .deleted
            .iter()
            .map(|&bi| before.records[bi].clone())
            .collect(),
        created: pairing
            .created
            .iter()
            .map(|&ai| after.records[ai].clone())
            .collect(),
        reused_handles: pairing.reused,
    })
}
