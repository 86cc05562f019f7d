//! Deterministic in-memory scheduler
//!
//! Holds a task table behind a mutex so a test (or the CLI `--simulate`
//! mode) can drive task runtime from one thread while the sampler waits on
//! another. Nothing here runs real work: callers account ticks explicitly.

use crate::errors::{ExError, ExErrorKind, Result};
use crate::model::{TaskHandle, TaskRecord};
use crate::scheduler::{SnapshotFill, TaskScheduler};
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
struct Table {
    tasks: Vec<TaskRecord>,
    total_runtime: u64,
    next_handle: u64,
    /// Tasks to add on the next fill (models the count/fill race)
    pending_spawns: Vec<String>,
}

/// Simulated scheduler with explicit tick accounting
#[derive(Debug)]
pub struct InMemoryScheduler {
    table: Mutex<Table>,
    execution_units: u32,
}

impl InMemoryScheduler {
    /// Create an empty scheduler with the given number of execution units
    pub fn new(execution_units: u32) -> Self {
        Self {
            table: Mutex::new(Table {
                next_handle: 1,
                ..Table::default()
            }),
            execution_units,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Table>> {
        self.table.lock().map_err(|_| {
            ExError::new(ExErrorKind::Internal)
                .with_op("in_memory_scheduler")
                .with_message("task table mutex poisoned")
        })
    }

    /// Create a task with zero runtime and return its handle
    pub fn spawn(&self, name: impl Into<String>) -> Result<TaskHandle> {
        let mut table = self.lock()?;
        Ok(spawn_locked(&mut table, name.into()))
    }

    /// Create a task under a caller-chosen handle, as a scheduler that
    /// recycles task control blocks would
    ///
    /// # Errors
    ///
    /// - `InvalidInput` — the handle is currently live
    pub fn recycle(&self, handle: TaskHandle, name: impl Into<String>) -> Result<()> {
        let mut table = self.lock()?;
        if table.tasks.iter().any(|t| t.handle == handle) {
            return Err(ExError::new(ExErrorKind::InvalidInput)
                .with_op("recycle")
                .with_handle(handle)
                .with_message("handle is still live"));
        }
        table.tasks.push(TaskRecord::new(handle, name, 0));
        Ok(())
    }

    /// Charge `ticks` of CPU time to a task
    ///
    /// # Errors
    ///
    /// - `InvalidInput` — no live task has this handle
    pub fn run(&self, handle: TaskHandle, ticks: u64) -> Result<()> {
        let mut table = self.lock()?;
        let task = table
            .tasks
            .iter_mut()
            .find(|t| t.handle == handle)
            .ok_or_else(|| {
                ExError::new(ExErrorKind::InvalidInput)
                    .with_op("run")
                    .with_handle(handle)
                    .with_message("no live task with this handle")
            })?;
        task.cumulative_runtime = task.cumulative_runtime.saturating_add(ticks);
        Ok(())
    }

    /// Advance the global runtime counter
    pub fn advance(&self, ticks: u64) -> Result<()> {
        let mut table = self.lock()?;
        table.total_runtime = table.total_runtime.saturating_add(ticks);
        Ok(())
    }

    /// Destroy a task; returns false if it was not live
    pub fn kill(&self, handle: TaskHandle) -> Result<bool> {
        let mut table = self.lock()?;
        let before = table.tasks.len();
        table.tasks.retain(|t| t.handle != handle);
        Ok(table.tasks.len() != before)
    }

    /// Queue a task that appears between the next count query and fill
    pub fn spawn_before_next_fill(&self, name: impl Into<String>) -> Result<()> {
        let mut table = self.lock()?;
        table.pending_spawns.push(name.into());
        Ok(())
    }

    pub fn total_runtime(&self) -> Result<u64> {
        Ok(self.lock()?.total_runtime)
    }
}

fn spawn_locked(table: &mut Table, name: String) -> TaskHandle {
    let handle = TaskHandle::new(table.next_handle);
    table.next_handle += 1;
    table.tasks.push(TaskRecord::new(handle, name, 0));
    handle
}

impl TaskScheduler for InMemoryScheduler {
    fn task_count(&self) -> Result<u32> {
        let table = self.lock()?;
        Ok(u32::try_from(table.tasks.len()).unwrap_or(u32::MAX))
    }

    fn snapshot(&self, buffer: &mut Vec<TaskRecord>, capacity: usize) -> Result<SnapshotFill> {
        let mut table = self.lock()?;
        for name in std::mem::take(&mut table.pending_spawns) {
            spawn_locked(&mut table, name);
        }

        buffer.clear();
        if table.tasks.len() > capacity {
            return Ok(SnapshotFill {
                records_written: 0,
                total_runtime: table.total_runtime,
            });
        }
        buffer.extend(table.tasks.iter().cloned());
        Ok(SnapshotFill {
            records_written: buffer.len(),
            total_runtime: table.total_runtime,
        })
    }

    fn execution_units(&self) -> u32 {
        self.execution_units
    }
}
