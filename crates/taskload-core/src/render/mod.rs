//! Text renderings of a [`UtilizationReport`](crate::diff::UtilizationReport).
//!
//! Presentation only; the report struct is the stable contract.

pub mod markdown;
pub mod table;

pub use markdown::render_markdown;
pub use table::render_table;
