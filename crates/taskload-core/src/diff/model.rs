//! Utilization report types.

use crate::model::{TaskHandle, TaskRecord};
use serde::{Deserialize, Serialize};
use taskload_core_types::RequestId;

/// Runtime consumed by one task present in both snapshots
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskUtilization {
    pub handle: TaskHandle,
    /// Name as of the later snapshot
    pub name: String,
    /// Ticks consumed during the interval
    pub delta: u64,
    /// `delta * 100 / (elapsed * execution_units)`, truncated
    pub percent: u64,
}

/// Result of diffing two snapshots
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UtilizationReport {
    pub request_id: RequestId,
    /// Scheduler ticks between the two snapshots
    pub elapsed: u64,
    pub execution_units: u32,
    /// Tasks present in both snapshots, in `before` order
    pub matched: Vec<TaskUtilization>,
    /// Tasks only in `before`, in `before` order
    pub deleted: Vec<TaskRecord>,
    /// Tasks only in `after`, in `after` order
    pub created: Vec<TaskRecord>,
    /// Handles whose runtime went backwards and were split into a
    /// deletion plus a creation
    pub reused_handles: Vec<TaskHandle>,
}

impl UtilizationReport {
    /// Sum of matched percentages; close to 100 on a fully loaded system
    pub fn total_percent(&self) -> u64 {
        self.matched.iter().map(|m| m.percent).sum()
    }

    /// Sum of matched deltas
    pub fn total_delta(&self) -> u64 {
        self.matched
            .iter()
            .fold(0u64, |acc, m| acc.saturating_add(m.delta))
    }

    /// `|before| == matched + deleted` and `|after| == matched + created`
    pub fn is_conserved(&self, before_len: usize, after_len: usize) -> bool {
        before_len == self.matched.len() + self.deleted.len()
            && after_len == self.matched.len() + self.created.len()
    }

    pub fn find_matched(&self, handle: TaskHandle) -> Option<&TaskUtilization> {
        self.matched.iter().find(|m| m.handle == handle)
    }
}
