use serde::{Deserialize, Serialize};

/// Opaque scheduler handle identifying a live task
///
/// Two records from different snapshots describe the same task iff their
/// handles are equal. A scheduler may hand out a handle again once the
/// task that owned it has been destroyed.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TaskHandle(u64);

impl TaskHandle {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TaskHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl From<u64> for TaskHandle {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

/// One task's entry in a snapshot
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TaskRecord {
    pub handle: TaskHandle,
    /// Display label, not guaranteed unique
    pub name: String,
    /// Ticks of CPU time consumed since the task was created
    pub cumulative_runtime: u64,
}

impl TaskRecord {
    pub fn new(
        handle: impl Into<TaskHandle>,
        name: impl Into<String>,
        cumulative_runtime: u64,
    ) -> Self {
        Self {
            handle: handle.into(),
            name: name.into(),
            cumulative_runtime,
        }
    }
}
