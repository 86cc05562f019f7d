//! taskload core - one-shot task utilization sampler
//!
//! Takes two time-separated snapshots of a scheduler's task table and
//! computes, per task, the share of scheduler time it consumed during the
//! interval:
//! - Task table model (`TaskHandle`, `TaskRecord`, `Snapshot`)
//! - Scheduler collaborator trait plus a deterministic in-memory scheduler
//! - Snapshot acquisition with bounded capacity retries
//! - Interval diff with handle correlation and created/deleted classification
//! - Sampling orchestration with a cancellable interval wait
//! - Table and Markdown rendering
//! - Error and logging facilities

pub mod config;
pub mod diff;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod render;
pub mod sampler;
pub mod scheduler;
pub mod snapshot;

// Used by the exported logging macros.
#[doc(hidden)]
pub use taskload_core_types as __types;
#[doc(hidden)]
pub use tracing as __tracing;

// Re-export commonly used types
pub use config::SamplerConfig;
pub use diff::{compute_diff, DiffOptions, TaskUtilization, UtilizationReport};
pub use errors::{ExError, ExErrorKind, Result, SamplerError};
pub use model::{Snapshot, TaskHandle, TaskRecord};
pub use sampler::{CancelToken, CancellableWait, IntervalWait, Sampler, ThreadSleep};
pub use scheduler::{InMemoryScheduler, SnapshotFill, TaskScheduler};
pub use snapshot::{acquire, acquire_with_retry, CapacityPolicy};
