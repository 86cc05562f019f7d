use crate::model::TaskHandle;
use taskload_core_types::{RequestId, TraceId};
use thiserror::Error;

/// Result type alias using the canonical ExError
pub type Result<T> = std::result::Result<T, ExError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that callers can match on
/// programmatically and that shows up in structured log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Sampling
    /// The snapshot buffer could not hold every live task
    InsufficientCapacity,
    /// No scheduler time elapsed between the two snapshots
    DegenerateInterval,
    /// The interval wait was cancelled before the second snapshot
    Cancelled,

    // Validation
    InvalidInput,
    InvalidConfig,

    // Integration/IO
    Io,
    Serialization,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InsufficientCapacity => "ERR_INSUFFICIENT_CAPACITY",
            ExErrorKind::DegenerateInterval => "ERR_DEGENERATE_INTERVAL",
            ExErrorKind::Cancelled => "ERR_CANCELLED",
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }

    /// Whether retrying the same operation with a larger buffer can succeed
    pub fn is_capacity_retryable(&self) -> bool {
        matches!(self, ExErrorKind::InsufficientCapacity)
    }
}

/// Canonical structured error type
///
/// Carries a classification kind for programmatic handling plus optional
/// context (operation, task handle, buffer capacity, correlation ids).
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    handle: Option<TaskHandle>,
    capacity: Option<usize>,
    request_id: Option<RequestId>,
    trace_id: Option<TraceId>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            handle: None,
            capacity: None,
            request_id: None,
            trace_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add task handle context
    pub fn with_handle(mut self, handle: TaskHandle) -> Self {
        self.handle = Some(handle);
        self
    }

    /// Add the buffer capacity that was in use when the error occurred
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Add request ID context
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Add trace ID context
    pub fn with_trace_id(mut self, trace_id: TraceId) -> Self {
        self.trace_id = Some(trace_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn handle(&self) -> Option<TaskHandle> {
        self.handle
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    pub fn trace_id(&self) -> Option<&TraceId> {
        self.trace_id.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(handle) = self.handle {
            write!(f, " (task: {})", handle)?;
        }
        if let Some(capacity) = self.capacity {
            write!(f, " (capacity: {})", capacity)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Domain failures raised by the sampler
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SamplerError {
    /// The scheduler wrote no records into a non-empty buffer
    #[error("Snapshot buffer of {capacity} records is too small for {live_tasks} live tasks")]
    InsufficientCapacity { capacity: usize, live_tasks: u32 },

    /// Scheduler time did not advance (or went backwards) between snapshots
    #[error("Degenerate sampling interval: total runtime {before} -> {after}")]
    DegenerateInterval { before: u64, after: u64 },

    /// The interval wait was cancelled
    #[error("Sampling cancelled during the interval wait")]
    Cancelled,

    /// Two records in one snapshot share a handle
    #[error("Duplicate task handle {handle} in snapshot")]
    DuplicateHandle { handle: TaskHandle },

    /// Percentages cannot be normalized over zero execution units
    #[error("Execution unit count must be at least 1")]
    ZeroExecutionUnits,

    /// Configuration value out of range
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },
}

impl From<SamplerError> for ExError {
    fn from(err: SamplerError) -> Self {
        let message = err.to_string();
        match err {
            SamplerError::InsufficientCapacity { capacity, .. } => {
                ExError::new(ExErrorKind::InsufficientCapacity)
                    .with_op("acquire_snapshot")
                    .with_capacity(capacity)
                    .with_message(message)
            }
            SamplerError::DegenerateInterval { .. } => {
                ExError::new(ExErrorKind::DegenerateInterval)
                    .with_op("compute_diff")
                    .with_message(message)
            }
            SamplerError::Cancelled => ExError::new(ExErrorKind::Cancelled)
                .with_op("interval_wait")
                .with_message(message),
            SamplerError::DuplicateHandle { handle } => ExError::new(ExErrorKind::InvalidInput)
                .with_op("validate_snapshot")
                .with_handle(handle)
                .with_message(message),
            SamplerError::ZeroExecutionUnits => ExError::new(ExErrorKind::InvalidInput)
                .with_op("compute_diff")
                .with_message(message),
            SamplerError::InvalidConfig { .. } => ExError::new(ExErrorKind::InvalidConfig)
                .with_op("load_config")
                .with_message(message),
        }
    }
}

impl From<serde_json::Error> for ExError {
    fn from(err: serde_json::Error) -> Self {
        ExError::new(ExErrorKind::Serialization).with_message(err.to_string())
    }
}
