//! taskload procfs - Linux thread table as a task scheduler
//!
//! Provides:
//! - [`ProcfsScheduler`]: samples the threads of one process through
//!   `/proc/<pid>/task/*/stat`, with `/proc/stat` as the global tick counter
//! - Parsers for the two stat formats
//!
//! Ticks are `USER_HZ` clock ticks throughout, so thread runtimes and the
//! global counter share a unit.

pub mod errors;
pub mod scheduler;
pub mod stat;

pub use errors::Result;
pub use scheduler::ProcfsScheduler;
