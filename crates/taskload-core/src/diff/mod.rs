//! Interval differ.
//!
//! Correlates two snapshots of the same scheduler by task handle and turns
//! the runtime deltas into per-task utilization.
//!
//! ## Entry point
//!
//! ```ignore
//! use taskload_core::diff::{compute_diff, DiffOptions};
//!
//! let report = compute_diff(&before, &after, execution_units, &DiffOptions::default())?;
//! println!("{}", taskload_core::render::render_table(&report));
//! ```
//!
//! ## Guarantees
//!
//! - **Exclusive classification**: every record lands in exactly one of
//!   matched, deleted or created.
//! - **Stable ordering**: matched and deleted follow `before` order, created
//!   follows `after` order. No sorting by utilization.
//! - **No partial reports**: a degenerate interval or invalid input yields
//!   an error and nothing else.
//! - **Strategy independence**: linear and indexed correlation produce the
//!   same report.

pub mod correlate;
pub mod engine;
pub mod model;

pub use correlate::CorrelationStrategy;
pub use engine::{compute_diff, DiffOptions};
pub use model::{TaskUtilization, UtilizationReport};
