//! `/proc`-backed task scheduler
//!
//! The thread list and the per-thread stat files are read one by one, so a
//! fill is not atomic: threads can exit mid-fill (they are skipped) and the
//! global counter is read after the threads so no thread delta can outrun it
//! by more than one read's worth of ticks.

use crate::errors::{io_error, parse_error, Result};
use crate::stat::{parse_proc_stat, parse_thread_stat, CpuTotals};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use taskload_core::scheduler::{SnapshotFill, TaskScheduler};
use taskload_core::TaskRecord;

/// Samples the threads of one process
#[derive(Debug, Clone)]
pub struct ProcfsScheduler {
    root: PathBuf,
    pid: u32,
    execution_units: u32,
}

impl ProcfsScheduler {
    /// Sample process `pid` through the real `/proc`
    ///
    /// # Errors
    ///
    /// - `Io` — `/proc/stat` or the process's task directory is unreadable
    /// - `Serialization` — `/proc/stat` is malformed
    pub fn new(pid: u32) -> Result<Self> {
        Self::with_root("/proc", pid)
    }

    /// Sample the calling process
    ///
    /// # Errors
    ///
    /// See [`ProcfsScheduler::new`].
    pub fn current_process() -> Result<Self> {
        Self::new(std::process::id())
    }

    /// Use an alternative procfs mount (or a fixture tree in tests)
    ///
    /// # Errors
    ///
    /// See [`ProcfsScheduler::new`].
    pub fn with_root(root: impl Into<PathBuf>, pid: u32) -> Result<Self> {
        let root = root.into();
        let totals = read_cpu_totals(&root)?;

        let task_dir = root.join(pid.to_string()).join("task");
        fs::metadata(&task_dir).map_err(|e| io_error("open_task_dir", &task_dir, e))?;

        tracing::debug!(
            component = module_path!(),
            pid = pid,
            cpus = totals.cpus,
            "procfs scheduler ready"
        );

        Ok(Self {
            root,
            pid,
            execution_units: totals.cpus,
        })
    }

    pub fn pid(&self) -> u32 {
        self.pid
    }

    fn task_dir(&self) -> PathBuf {
        self.root.join(self.pid.to_string()).join("task")
    }

    fn list_tids(&self) -> Result<Vec<u64>> {
        let dir = self.task_dir();
        let entries = fs::read_dir(&dir).map_err(|e| io_error("list_tasks", &dir, e))?;
        let mut tids = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| io_error("list_tasks", &dir, e))?;
            if let Some(tid) = entry.file_name().to_str().and_then(|s| s.parse().ok()) {
                tids.push(tid);
            }
        }
        tids.sort_unstable();
        Ok(tids)
    }

    /// Read one thread; `None` if it exited after being listed
    fn read_thread(&self, tid: u64) -> Result<Option<TaskRecord>> {
        let path = self.task_dir().join(tid.to_string()).join("stat");
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(io_error("read_thread_stat", &path, e)),
        };
        // `comm` is arbitrary bytes; the numeric fields are always ASCII.
        let text = String::from_utf8_lossy(&bytes);
        let stat = parse_thread_stat(text.trim_end()).map_err(|e| parse_error(&path, e))?;
        let runtime = stat.runtime();
        Ok(Some(TaskRecord::new(stat.tid, stat.comm, runtime)))
    }
}

fn read_cpu_totals(root: &Path) -> Result<CpuTotals> {
    let path = root.join("stat");
    let text = fs::read_to_string(&path).map_err(|e| io_error("read_proc_stat", &path, e))?;
    parse_proc_stat(&text).map_err(|e| parse_error(&path, e))
}

impl TaskScheduler for ProcfsScheduler {
    fn task_count(&self) -> Result<u32> {
        Ok(u32::try_from(self.list_tids()?.len()).unwrap_or(u32::MAX))
    }

    fn snapshot(&self, buffer: &mut Vec<TaskRecord>, capacity: usize) -> Result<SnapshotFill> {
        buffer.clear();
        let tids = self.list_tids()?;
        if tids.len() > capacity {
            let totals = read_cpu_totals(&self.root)?;
            return Ok(SnapshotFill {
                records_written: 0,
                total_runtime: totals.per_cpu_ticks(),
            });
        }

        for tid in tids {
            if let Some(record) = self.read_thread(tid)? {
                buffer.push(record);
            }
        }

        let totals = read_cpu_totals(&self.root)?;
        Ok(SnapshotFill {
            records_written: buffer.len(),
            total_runtime: totals.per_cpu_ticks(),
        })
    }

    fn execution_units(&self) -> u32 {
        self.execution_units
    }
}
