//! Shared helpers: an in-memory writer and JSON line parsing

#![allow(dead_code)]

use opentelemetry::trace::{SpanContext, SpanId, TraceFlags, TraceId, TraceState};
use parking_lot::Mutex;
use rust_cloud_logger::{Logger, LoggerBuilder, Severity};
use serde_json::Value;
use std::io::{self, Write};
use std::sync::Arc;

#[derive(Clone, Default)]
pub struct Buffer(Arc<Mutex<Vec<u8>>>);

impl Write for Buffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Buffer {
    pub fn contents(&self) -> String {
        String::from_utf8(self.0.lock().clone()).expect("log output is UTF-8")
    }

    /// Every line parsed as JSON.
    pub fn records(&self) -> Vec<Value> {
        self.contents()
            .lines()
            .map(|line| serde_json::from_str(line).expect("each line is a JSON object"))
            .collect()
    }

    pub fn last(&self) -> Value {
        self.records().pop().expect("at least one record")
    }

    pub fn clear(&self) {
        self.0.lock().clear();
    }
}

/// A JSON logger at `min_severity` writing to a fresh buffer.
pub fn logger_at(min_severity: Severity) -> (Logger, Buffer) {
    let buffer = Buffer::default();
    let logger = builder(&buffer).min_severity(min_severity).build();
    (logger, buffer)
}

pub fn builder(buffer: &Buffer) -> LoggerBuilder {
    Logger::builder().writer(buffer.clone())
}

/// Keys of the top-level object other than `time`, `severity`, `message`
/// and `logging.googleapis.com/sourceLocation`.
pub fn payload_keys(record: &Value) -> Vec<String> {
    const BUILTIN: [&str; 4] = [
        "time",
        "severity",
        "message",
        "logging.googleapis.com/sourceLocation",
    ];
    record
        .as_object()
        .expect("record is an object")
        .keys()
        .filter(|k| !BUILTIN.contains(&k.as_str()))
        .cloned()
        .collect()
}

pub const TRACE_ID: &str = "4bf92f3577b34da6a3ce929d0e0e4736";
pub const SPAN_ID: &str = "00f067aa0ba902b7";

/// A remote span with [`TRACE_ID`] and [`SPAN_ID`].
pub fn span_context(sampled: bool) -> SpanContext {
    let flags = if sampled {
        TraceFlags::SAMPLED
    } else {
        TraceFlags::NOT_SAMPLED
    };
    SpanContext::new(
        TraceId::from_hex(TRACE_ID).expect("valid trace id"),
        SpanId::from_hex(SPAN_ID).expect("valid span id"),
        flags,
        true,
        TraceState::default(),
    )
}
