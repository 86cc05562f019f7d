//! Core types shared across taskload facilities
//!
//! This crate provides foundational types used by both error handling
//! and logging facilities:
//!
//! - **Correlation types**: RequestId, TraceId, RequestContext
//! - **Schema constants**: Canonical field keys and event names

pub mod correlation;
pub mod schema;

pub use correlation::{RequestContext, RequestId, TraceId};

#[cfg(test)]
mod tests {
    use crate::{RequestContext, RequestId, TraceId};

    #[test]
    fn test_root_reexports_build_a_context() {
        let trace = TraceId::from_string("trace-1".to_string());
        let ctx = RequestContext::new("cli").with_trace_id(trace.clone());
        assert_eq!(ctx.trace_id, Some(trace));
        assert_ne!(ctx.request_id, RequestId::new());
    }
}
