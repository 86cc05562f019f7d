//! Scheduler collaborator seam
//!
//! The sampler never walks a task table itself. It asks a [`TaskScheduler`]
//! for the live task count and for a filled snapshot buffer, the same way an
//! RTOS exposes `uxTaskGetNumberOfTasks` / `uxTaskGetSystemState`.

pub mod memory;

pub use memory::InMemoryScheduler;

use crate::errors::Result;
use crate::model::TaskRecord;

/// Outcome of one snapshot fill
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotFill {
    /// Records written into the buffer; 0 with a non-zero capacity means
    /// the buffer was too small
    pub records_written: usize,
    /// Global runtime counter at the fill instant
    pub total_runtime: u64,
}

/// Access to a scheduler's task accounting
///
/// Implementations must produce each fill atomically with respect to task
/// accounting; the sampler adds no locking of its own.
pub trait TaskScheduler {
    /// Current number of live tasks
    ///
    /// # Errors
    ///
    /// Backend-specific (`Io`, `Serialization`) when the task table cannot be read.
    fn task_count(&self) -> Result<u32>;

    /// Clear `buffer` and write up to `capacity` records into it
    ///
    /// If the live task set does not fit, nothing is written and
    /// `records_written` is 0.
    ///
    /// # Errors
    ///
    /// Backend-specific (`Io`, `Serialization`) when the task table cannot be read.
    fn snapshot(&self, buffer: &mut Vec<TaskRecord>, capacity: usize) -> Result<SnapshotFill>;

    /// Number of parallel execution units runtime is accumulated over
    fn execution_units(&self) -> u32;
}

impl<S: TaskScheduler + ?Sized> TaskScheduler for &S {
    fn task_count(&self) -> Result<u32> {
        (**self).task_count()
    }

    fn snapshot(&self, buffer: &mut Vec<TaskRecord>, capacity: usize) -> Result<SnapshotFill> {
        (**self).snapshot(buffer, capacity)
    }

    fn execution_units(&self) -> u32 {
        (**self).execution_units()
    }
}

impl<S: TaskScheduler + ?Sized> TaskScheduler for std::sync::Arc<S> {
    fn task_count(&self) -> Result<u32> {
        (**self).task_count()
    }

    fn snapshot(&self, buffer: &mut Vec<TaskRecord>, capacity: usize) -> Result<SnapshotFill> {
        (**self).snapshot(buffer, capacity)
    }

    fn execution_units(&self) -> u32 {
        (**self).execution_units()
    }
}
