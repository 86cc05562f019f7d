//! Snapshot acquisition
//!
//! Sizes a record buffer from the live task count plus a margin, asks the
//! scheduler to fill it, and turns a zero-record fill into an
//! `InsufficientCapacity` error. [`acquire_with_retry`] layers the bounded
//! grow-and-retry policy on top.

pub mod acquire;
pub mod capacity;

pub use acquire::{acquire, acquire_with_retry};
pub use capacity::CapacityPolicy;
