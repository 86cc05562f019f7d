//! Correlation types for tagging sampling operations
//!
//! Every sampling operation gets a fresh [`RequestId`] so that the two
//! snapshot acquisitions, the diff and any error raised along the way can
//! be tied together in the log stream.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! correlation_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Generate a new time-ordered id (UUIDv7)
            pub fn new() -> Self {
                Self(Uuid::now_v7().to_string())
            }

            /// Get the string representation
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Wrap an existing id string (e.g. one read back from a saved report)
            pub fn from_string(s: String) -> Self {
                Self(s)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

correlation_id!(
    /// Identifier for a single sampling operation
    RequestId
);

correlation_id!(
    /// Identifier supplied by an outer caller that groups several samples
    TraceId
);

/// Context carried through one sampling operation
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub request_id: RequestId,
    pub trace_id: Option<TraceId>,
    /// Human label for the scheduler being sampled (e.g. `pid:1234`)
    pub source: String,
}

impl RequestContext {
    /// Create a context with a fresh RequestId
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            request_id: RequestId::new(),
            trace_id: None,
            source: source.into(),
        }
    }

    /// Attach an outer TraceId
    pub fn with_trace_id(mut self, trace_id: TraceId) -> Self {
        self.trace_id = Some(trace_id);
        self
    }
}
