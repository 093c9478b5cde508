//! Special payload field names recognized by Cloud Logging.
//!
//! These keys are lifted out of the JSON payload into the `LogEntry` structure.
//! See <https://cloud.google.com/logging/docs/structured-logging#special-payload-fields>.

pub const SEVERITY: &str = "severity";
pub const MESSAGE: &str = "message";
pub const TIME: &str = "time";
pub const HTTP_REQUEST: &str = "httpRequest";
pub const INSERT_ID: &str = "logging.googleapis.com/insertId";
pub const LABELS: &str = "logging.googleapis.com/labels";
pub const OPERATION: &str = "logging.googleapis.com/operation";
pub const SOURCE_LOCATION: &str = "logging.googleapis.com/sourceLocation";
pub const SPAN_ID: &str = "logging.googleapis.com/spanId";
pub const TRACE: &str = "logging.googleapis.com/trace";
pub const TRACE_SAMPLED: &str = "logging.googleapis.com/trace_sampled";
pub const STACK_TRACE: &str = "stack_trace";
