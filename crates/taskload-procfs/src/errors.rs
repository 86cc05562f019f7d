//! Error handling for taskload-procfs
//!
//! Wraps taskload-core ExError with procfs-specific helpers

use std::path::Path;
use taskload_core::errors::{ExError, ExErrorKind};
use thiserror::Error;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Ways a stat line can be malformed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatParseError {
    #[error("missing `(comm)` section")]
    MissingComm,

    #[error("expected at least {expected} fields after comm, found {found}")]
    TooFewFields { expected: usize, found: usize },

    #[error("field `{field}` is not an unsigned integer: {value:?}")]
    NotANumber { field: &'static str, value: String },

    #[error("no aggregate `cpu` line")]
    MissingCpuLine,
}

/// Create an IO error for a procfs path
pub fn io_error(operation: &str, path: &Path, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(format!("{}: {}", path.display(), err))
}

/// Create a parse error for a procfs file
pub fn parse_error(path: &Path, err: StatParseError) -> ExError {
    ExError::new(ExErrorKind::Serialization)
        .with_op("parse_procfs")
        .with_message(format!("{}: {}", path.display(), err))
}
