//! ProcfsScheduler against fixture `/proc` trees

use std::fs;
use std::path::Path;
use taskload_core::{
    acquire, compute_diff, DiffOptions, ExErrorKind, TaskHandle, TaskScheduler,
};
use taskload_procfs::ProcfsScheduler;
use tempfile::TempDir;

const PID: u32 = 77;

fn write_proc_stat(root: &Path, total_per_cpu: u64) {
    // Two CPUs; the aggregate line carries the sum across both.
    let total = total_per_cpu * 2;
    let user = total / 4;
    let idle = total - user;
    let text = format!(
        "cpu  {user} 0 0 {idle} 0 0 0 0 0 0\n\
         cpu0 {a} 0 0 {b} 0 0 0 0 0 0\n\
         cpu1 {a} 0 0 {b} 0 0 0 0 0 0\n\
         intr 0\nctxt 12\n",
        a = user / 2,
        b = idle / 2,
    );
    fs::write(root.join("stat"), text).unwrap();
}

fn write_thread(root: &Path, tid: u64, comm: &str, utime: u64, stime: u64) {
    let dir = root
        .join(PID.to_string())
        .join("task")
        .join(tid.to_string());
    fs::create_dir_all(&dir).unwrap();
    let line = format!(
        "{tid} ({comm}) S 1 {PID} {PID} 0 -1 4194624 120 0 0 0 {utime} {stime} 0 0 20 0 1 0 500 0 0\n"
    );
    fs::write(dir.join("stat"), line).unwrap();
}

fn remove_thread(root: &Path, tid: u64) {
    fs::remove_dir_all(
        root.join(PID.to_string())
            .join("task")
            .join(tid.to_string()),
    )
    .unwrap();
}

fn fixture() -> TempDir {
    let dir = TempDir::new().unwrap();
    write_proc_stat(dir.path(), 1000);
    write_thread(dir.path(), 77, "main", 100, 20);
    write_thread(dir.path(), 78, "worker one", 300, 0);
    dir
}

#[test]
fn test_units_come_from_cpu_lines() {
    let dir = fixture();
    let scheduler = ProcfsScheduler::with_root(dir.path(), PID).unwrap();
    assert_eq!(scheduler.execution_units(), 2);
    assert_eq!(scheduler.pid(), PID);
}

#[test]
fn test_task_count_lists_threads() {
    let dir = fixture();
    let scheduler = ProcfsScheduler::with_root(dir.path(), PID).unwrap();
    assert_eq!(scheduler.task_count().unwrap(), 2);
}

#[test]
fn test_snapshot_reads_threads_and_global_counter() {
    let dir = fixture();
    let scheduler = ProcfsScheduler::with_root(dir.path(), PID).unwrap();

    let snapshot = acquire(&scheduler, 4).unwrap();
    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot.total_runtime, 1000);

    let main = snapshot.find(TaskHandle::new(77)).unwrap();
    assert_eq!(main.name, "main");
    assert_eq!(main.cumulative_runtime, 120);

    let worker = snapshot.find(TaskHandle::new(78)).unwrap();
    assert_eq!(worker.name, "worker one");
    assert_eq!(worker.cumulative_runtime, 300);
}

#[test]
fn test_too_small_buffer_writes_nothing() {
    let dir = fixture();
    let scheduler = ProcfsScheduler::with_root(dir.path(), PID).unwrap();

    let mut buffer = Vec::new();
    let fill = scheduler.snapshot(&mut buffer, 1).unwrap();
    assert_eq!(fill.records_written, 0);
    assert!(buffer.is_empty());
}

#[test]
fn test_interval_between_two_fills() {
    let dir = fixture();
    let scheduler = ProcfsScheduler::with_root(dir.path(), PID).unwrap();
    let before = acquire(&scheduler, 4).unwrap();

    // 500 ticks per CPU pass; main uses 250, the worker exits and a new
    // thread appears.
    write_proc_stat(dir.path(), 1500);
    write_thread(dir.path(), 77, "main", 300, 70);
    remove_thread(dir.path(), 78);
    write_thread(dir.path(), 90, "late", 5, 0);
    let after = acquire(&scheduler, 4).unwrap();

    let report = compute_diff(
        &before,
        &after,
        scheduler.execution_units(),
        &DiffOptions::default(),
    )
    .unwrap();

    assert_eq!(report.elapsed, 500);
    assert_eq!(report.matched.len(), 1);
    assert_eq!(report.matched[0].delta, 250);
    // 250 / (500 * 2 CPUs)
    assert_eq!(report.matched[0].percent, 25);
    assert_eq!(report.deleted.len(), 1);
    assert_eq!(report.deleted[0].handle, TaskHandle::new(78));
    assert_eq!(report.created.len(), 1);
    assert_eq!(report.created[0].name, "late");
}

#[test]
fn test_non_utf8_thread_name_is_read_lossily() {
    let dir = fixture();
    let stat = dir
        .path()
        .join(PID.to_string())
        .join("task")
        .join("78")
        .join("stat");
    let mut line = b"78 ((w".to_vec();
    line.extend_from_slice(&[0xff, 0xfe]);
    line.extend_from_slice(b")) S 1 77 77 0 -1 4194624 120 0 0 0 300 5 0 0 20 0 1 0 500 0 0\n");
    fs::write(stat, line).unwrap();

    let scheduler = ProcfsScheduler::with_root(dir.path(), PID).unwrap();
    let snapshot = acquire(&scheduler, 4).unwrap();
    assert_eq!(snapshot.len(), 2);

    let worker = snapshot.find(TaskHandle::new(78)).unwrap();
    assert_eq!(worker.name, "(w\u{fffd}\u{fffd})");
    assert_eq!(worker.cumulative_runtime, 305);
    assert_eq!(snapshot.find(TaskHandle::new(77)).unwrap().name, "main");
}

#[test]
fn test_non_numeric_task_entries_are_ignored() {
    let dir = fixture();
    fs::create_dir_all(dir.path().join(PID.to_string()).join("task").join("stray")).unwrap();
    let scheduler = ProcfsScheduler::with_root(dir.path(), PID).unwrap();
    assert_eq!(scheduler.task_count().unwrap(), 2);
}

#[test]
fn test_missing_process_is_io_error() {
    let dir = fixture();
    let err = ProcfsScheduler::with_root(dir.path(), 4242).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::Io);
    assert_eq!(err.op(), Some("open_task_dir"));
}

#[test]
fn test_missing_proc_stat_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = ProcfsScheduler::with_root(dir.path(), PID).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::Io);
}

#[test]
fn test_corrupt_thread_stat_is_serialization_error() {
    let dir = fixture();
    let stat = dir
        .path()
        .join(PID.to_string())
        .join("task")
        .join("78")
        .join("stat");
    fs::write(stat, "78 (worker S 1").unwrap();

    let scheduler = ProcfsScheduler::with_root(dir.path(), PID).unwrap();
    let err = acquire(&scheduler, 4).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::Serialization);
    assert!(err.message().contains("78"));
}

#[cfg(target_os = "linux")]
#[test]
fn test_current_process_has_at_least_one_thread() {
    let scheduler = ProcfsScheduler::current_process().unwrap();
    assert!(scheduler.execution_units() >= 1);

    let snapshot = acquire(&scheduler, 16).unwrap();
    let own = u64::from(std::process::id());
    assert!(snapshot.find(TaskHandle::new(own)).is_some());
}
