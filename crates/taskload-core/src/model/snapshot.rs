use crate::errors::{ExError, Result, SamplerError};
use crate::model::task::{TaskHandle, TaskRecord};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Point-in-time view of every live task
///
/// `total_runtime` is the scheduler's global tick counter at capture time.
/// `captured_at` is informational only and never used in arithmetic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub records: Vec<TaskRecord>,
    pub total_runtime: u64,
    /// Documents written by other tools may omit it
    #[serde(default = "Utc::now")]
    pub captured_at: DateTime<Utc>,
}

impl Snapshot {
    /// Build a snapshot stamped with the current wall-clock time
    pub fn new(records: Vec<TaskRecord>, total_runtime: u64) -> Self {
        Self {
            records,
            total_runtime,
            captured_at: Utc::now(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn find(&self, handle: TaskHandle) -> Option<&TaskRecord> {
        self.records.iter().find(|r| r.handle == handle)
    }

    /// Check that no handle appears twice
    ///
    /// # Errors
    ///
    /// - `InvalidInput` — a handle is duplicated; the error carries it
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::with_capacity(self.records.len());
        for record in &self.records {
            if !seen.insert(record.handle) {
                return Err(SamplerError::DuplicateHandle {
                    handle: record.handle,
                }
                .into());
            }
        }
        Ok(())
    }

    /// Parse a snapshot previously written with `serde_json`
    ///
    /// # Errors
    ///
    /// - `Serialization` — bytes are not a valid snapshot document
    pub fn from_json_bytes(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|e| ExError::from(e).with_op("parse_snapshot"))
    }
}
