use taskload_core::errors::{ExError, ExErrorKind, SamplerError};
use taskload_core::TaskHandle;
use taskload_core_types::{RequestId, TraceId};

#[test]
fn test_insufficient_capacity_verifiable_by_kind() {
    let err: ExError = SamplerError::InsufficientCapacity {
        capacity: 12,
        live_tasks: 15,
    }
    .into();

    assert_eq!(err.kind(), ExErrorKind::InsufficientCapacity);
    assert_eq!(err.code(), "ERR_INSUFFICIENT_CAPACITY");
    assert_eq!(err.op(), Some("acquire_snapshot"));
    assert_eq!(err.capacity(), Some(12));
}

#[test]
fn test_degenerate_distinct_from_cancelled() {
    let degenerate: ExError = SamplerError::DegenerateInterval {
        before: 10,
        after: 10,
    }
    .into();
    let cancelled: ExError = SamplerError::Cancelled.into();

    assert_eq!(degenerate.kind(), ExErrorKind::DegenerateInterval);
    assert_eq!(cancelled.kind(), ExErrorKind::Cancelled);
    assert_ne!(degenerate.code(), cancelled.code());
}

#[test]
fn test_error_kind_code_mapping() {
    let kinds = vec![
        (ExErrorKind::InsufficientCapacity, "ERR_INSUFFICIENT_CAPACITY"),
        (ExErrorKind::DegenerateInterval, "ERR_DEGENERATE_INTERVAL"),
        (ExErrorKind::Cancelled, "ERR_CANCELLED"),
        (ExErrorKind::InvalidInput, "ERR_INVALID_INPUT"),
        (ExErrorKind::InvalidConfig, "ERR_INVALID_CONFIG"),
        (ExErrorKind::Io, "ERR_IO"),
        (ExErrorKind::Serialization, "ERR_SERIALIZATION"),
        (ExErrorKind::Internal, "ERR_INTERNAL"),
    ];

    for (kind, expected_code) in kinds {
        assert_eq!(kind.code(), expected_code);
    }
}

#[test]
fn test_context_builders() {
    let request_id = RequestId::from_string("r1".to_string());
    let trace_id = TraceId::from_string("t1".to_string());
    let err = ExError::new(ExErrorKind::Internal)
        .with_op("op")
        .with_handle(TaskHandle::new(16))
        .with_request_id(request_id.clone())
        .with_trace_id(trace_id.clone())
        .with_message("boom");

    assert_eq!(err.request_id(), Some(&request_id));
    assert_eq!(err.trace_id(), Some(&trace_id));
    assert_eq!(err.handle(), Some(TaskHandle::new(16)));
    assert_eq!(
        err.to_string(),
        "[ERR_INTERNAL] in operation 'op': boom (task: 0x10)"
    );
}

#[test]
fn test_thiserror_display() {
    let err = SamplerError::DegenerateInterval {
        before: 5,
        after: 5,
    };
    assert_eq!(
        err.to_string(),
        "Degenerate sampling interval: total runtime 5 -> 5"
    );
}
