use crate::errors::{ExError, ExErrorKind, Result, SamplerError};
use crate::model::Snapshot;
use crate::scheduler::TaskScheduler;
use crate::snapshot::capacity::CapacityPolicy;
use crate::{log_op_end, log_op_error, log_op_start};
use std::time::Instant;

/// Capture one snapshot with a buffer of `live_count + capacity_margin` records
///
/// # Errors
///
/// - `InsufficientCapacity` — the scheduler wrote no records into a
///   non-empty buffer (tasks were created between the count and the fill)
/// - `Internal` — the scheduler claimed more records than it wrote
/// - any error the scheduler backend reports
pub fn acquire<S>(scheduler: &S, capacity_margin: usize) -> Result<Snapshot>
where
    S: TaskScheduler + ?Sized,
{
    let start = Instant::now();
    log_op_start!("acquire_snapshot", capacity_margin = capacity_margin);

    let result = acquire_inner(scheduler, capacity_margin);
    let duration_ms = start.elapsed().as_millis() as u64;
    match &result {
        Ok(snapshot) => {
            log_op_end!(
                "acquire_snapshot",
                duration_ms = duration_ms,
                records_written = snapshot.len(),
                total_runtime = snapshot.total_runtime
            );
        }
        Err(err) => {
            log_op_error!("acquire_snapshot", err.clone(), duration_ms = duration_ms);
        }
    }
    result
}

fn acquire_inner<S>(scheduler: &S, capacity_margin: usize) -> Result<Snapshot>
where
    S: TaskScheduler + ?Sized,
{
    let live_tasks = scheduler.task_count()?;
    let capacity = (live_tasks as usize).saturating_add(capacity_margin);

    let mut records = Vec::with_capacity(capacity);
    let fill = scheduler.snapshot(&mut records, capacity)?;

    if fill.records_written == 0 && capacity > 0 {
        return Err(SamplerError::InsufficientCapacity {
            capacity,
            live_tasks,
        }
        .into());
    }
    if fill.records_written > records.len() {
        return Err(ExError::new(ExErrorKind::Internal)
            .with_op("acquire_snapshot")
            .with_capacity(capacity)
            .with_message(format!(
                "scheduler reported {} records but wrote {}",
                fill.records_written,
                records.len()
            )));
    }
    // Only the first `records_written` entries are defined.
    records.truncate(fill.records_written);

    Ok(Snapshot::new(records, fill.total_runtime))
}

/// Capture one snapshot, growing the margin on `InsufficientCapacity`
///
/// Makes at most `policy.max_retries + 1` attempts. Any error other than
/// `InsufficientCapacity` is returned immediately.
///
/// # Errors
///
/// - `InsufficientCapacity` — every attempt was too small; the last error is returned
/// - any error the scheduler backend reports
pub fn acquire_with_retry<S>(scheduler: &S, policy: &CapacityPolicy) -> Result<Snapshot>
where
    S: TaskScheduler + ?Sized,
{
    let mut last_err: Option<ExError> = None;
    for attempt in 0..=policy.max_retries {
        let margin = policy.margin_for_attempt(attempt);
        match acquire(scheduler, margin) {
            Ok(snapshot) => return Ok(snapshot),
            Err(err) if err.kind().is_capacity_retryable() => {
                tracing::warn!(
                    component = module_path!(),
                    op = "acquire_snapshot",
                    attempt = attempt,
                    capacity_margin = margin,
                    "snapshot buffer too small, retrying with a larger margin"
                );
                last_err = Some(err);
            }
            Err(err) => return Err(err),
        }
    }
    Err(last_err.unwrap_or_else(|| {
        SamplerError::InsufficientCapacity {
            capacity: 0,
            live_tasks: 0,
        }
        .into()
    }))
}
