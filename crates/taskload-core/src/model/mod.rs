//! Task table data model
//!
//! A [`Snapshot`] is a point-in-time copy of a scheduler's task table:
//! one [`TaskRecord`] per live task plus the scheduler's global runtime
//! counter at the same instant.

pub mod snapshot;
pub mod task;

pub use snapshot::Snapshot;
pub use task::{TaskHandle, TaskRecord};
