//! One-shot sampling: snapshot, wait, snapshot, diff.

pub mod wait;

pub use wait::{CancelToken, CancellableWait, IntervalWait, ThreadSleep};

use crate::config::SamplerConfig;
use crate::diff::{compute_diff, DiffOptions, UtilizationReport};
use crate::errors::{ExError, Result, SamplerError};
use crate::scheduler::TaskScheduler;
use crate::snapshot::{acquire_with_retry, CapacityPolicy};
use crate::{log_op_end, log_op_error, log_op_start};
use std::time::Instant;
use taskload_core_types::RequestContext;

/// Runs sampling operations with a fixed configuration
///
/// Holds no state between calls; two samples never share snapshots.
#[derive(Debug, Clone)]
pub struct Sampler {
    config: SamplerConfig,
}

impl Sampler {
    /// # Errors
    ///
    /// - `InvalidConfig` — see [`SamplerConfig::validate`]
    pub fn new(config: SamplerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    /// Sample `scheduler` over one window
    ///
    /// Captures snapshot A, waits the configured window, captures snapshot B
    /// and diffs them. Every error is stamped with the context's request id.
    ///
    /// # Errors
    ///
    /// - `InsufficientCapacity` — a snapshot still did not fit after all retries
    /// - `DegenerateInterval` — the scheduler's runtime counter did not advance
    /// - `Cancelled` — the wait was cancelled (before or during the window)
    /// - `InvalidInput` — zero execution units or a malformed snapshot
    /// - any error the scheduler backend reports
    pub fn sample<S, W>(
        &self,
        scheduler: &S,
        waiter: &W,
        ctx: &RequestContext,
    ) -> Result<UtilizationReport>
    where
        S: TaskScheduler + ?Sized,
        W: IntervalWait + ?Sized,
    {
        let start = Instant::now();
        log_op_start!(
            "sample",
            request_id = ctx.request_id.as_str(),
            source = ctx.source.as_str(),
            window_ms = self.config.window_ms
        );

        let result = self.sample_inner(scheduler, waiter, ctx).map_err(|e| {
            let e = e.with_request_id(ctx.request_id.clone());
            match &ctx.trace_id {
                Some(trace_id) => e.with_trace_id(trace_id.clone()),
                None => e,
            }
        });

        let duration_ms = start.elapsed().as_millis() as u64;
        match &result {
            Ok(report) => {
                log_op_end!(
                    "sample",
                    duration_ms = duration_ms,
                    request_id = ctx.request_id.as_str(),
                    elapsed_ticks = report.elapsed,
                    total_percent = report.total_percent()
                );
            }
            Err(err) => {
                log_op_error!(
                    "sample",
                    err.clone(),
                    duration_ms = duration_ms,
                    request_id = ctx.request_id.as_str()
                );
            }
        }
        result
    }

    fn sample_inner<S, W>(
        &self,
        scheduler: &S,
        waiter: &W,
        ctx: &RequestContext,
    ) -> Result<UtilizationReport>
    where
        S: TaskScheduler + ?Sized,
        W: IntervalWait + ?Sized,
    {
        if waiter.is_cancelled() {
            return Err(SamplerError::Cancelled.into());
        }

        let policy = CapacityPolicy::from(&self.config);
        let before = acquire_with_retry(scheduler, &policy)?;
        waiter.wait(self.config.window())?;
        let after = acquire_with_retry(scheduler, &policy)?;

        let execution_units = self
            .config
            .execution_units
            .unwrap_or_else(|| scheduler.execution_units());

        let options = DiffOptions::default()
            .with_strategy(self.config.correlation_strategy())
            .with_request_id(ctx.request_id.clone());
        compute_diff(&before, &after, execution_units, &options)
    }
}

impl TryFrom<SamplerConfig> for Sampler {
    type Error = ExError;

    fn try_from(config: SamplerConfig) -> Result<Self> {
        Sampler::new(config)
    }
}
