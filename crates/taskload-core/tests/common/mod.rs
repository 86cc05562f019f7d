use taskload_core::{Snapshot, TaskRecord};

/// Build a record with a generated name
#[allow(dead_code)]
pub fn rec(handle: u64, runtime: u64) -> TaskRecord {
    TaskRecord::new(handle, format!("task{handle}"), runtime)
}

/// Build a record with an explicit name
#[allow(dead_code)]
pub fn named(handle: u64, name: &str, runtime: u64) -> TaskRecord {
    TaskRecord::new(handle, name, runtime)
}

/// Build a snapshot from records and a global runtime counter
#[allow(dead_code)]
pub fn snap(records: Vec<TaskRecord>, total_runtime: u64) -> Snapshot {
    Snapshot::new(records, total_runtime)
}
