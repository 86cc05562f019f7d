//! Canonical schema constants for structured logging and events
//!
//! These constants keep field names consistent between the logging
//! macros, the error facility and the test capture layer.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_REQUEST_ID: &str = "request_id";
pub const FIELD_TRACE_ID: &str = "trace_id";
pub const FIELD_SPAN_ID: &str = "span_id";

// Task identifiers
pub const FIELD_TASK_HANDLE: &str = "task_handle";
pub const FIELD_TASK_NAME: &str = "task_name";

// Snapshot and report sizes
pub const FIELD_CAPACITY: &str = "capacity";
pub const FIELD_RECORDS_WRITTEN: &str = "records_written";
pub const FIELD_MATCHED_LEN: &str = "matched_len";
pub const FIELD_DELETED_LEN: &str = "deleted_len";
pub const FIELD_CREATED_LEN: &str = "created_len";
pub const FIELD_ELAPSED_TICKS: &str = "elapsed_ticks";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
