//! Writer sink: renders records and writes one line per record

use crate::core::{
    replacer::{replace_attr, LEVEL_KEY, MESSAGE_KEY, TIME_KEY},
    Attr, Context, Handler, Line, LoggerError, OutputFormat, Record, Result, Severity,
    SharedHandler,
};
use chrono::SecondsFormat;
use parking_lot::Mutex;
use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;

/// A byte sink shared by a sink handler and everything derived from it.
///
/// Each record is written with a single `write_all` while holding the lock,
/// so lines from concurrent callers never interleave.
#[derive(Clone)]
pub struct SharedWriter(Arc<Mutex<Box<dyn Write + Send>>>);

impl SharedWriter {
    pub fn new<W: Write + Send + 'static>(writer: W) -> Self {
        SharedWriter(Arc::new(Mutex::new(Box::new(writer))))
    }

    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    fn write_line(&self, line: &[u8]) -> Result<()> {
        let mut writer = self.0.lock();
        writer
            .write_all(line)
            .map_err(|e| LoggerError::io_operation("writing", "log record", e))?;
        writer
            .flush()
            .map_err(|e| LoggerError::io_operation("flushing", "log writer", e))
    }
}

impl fmt::Debug for SharedWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SharedWriter")
    }
}

/// Attributes added under one group scope. The first scope is the unnamed root.
#[derive(Debug, Clone)]
struct Scope {
    name: Option<String>,
    attrs: Vec<Attr>,
}

/// The innermost stage of every chain.
///
/// Applies the severity threshold, remaps the built-in fields and writes the
/// rendered line.
#[derive(Debug, Clone)]
pub struct WriterHandler {
    writer: SharedWriter,
    min_severity: Severity,
    format: OutputFormat,
    colors: bool,
    scopes: Vec<Scope>,
}

impl WriterHandler {
    pub fn new(writer: SharedWriter, min_severity: Severity, format: OutputFormat) -> Self {
        Self {
            writer,
            min_severity,
            format,
            colors: false,
            scopes: vec![Scope {
                name: None,
                attrs: Vec::new(),
            }],
        }
    }

    /// Color the severity in text output. Ignored for JSON.
    #[must_use]
    pub fn with_colors(mut self, colors: bool) -> Self {
        self.colors = colors;
        self
    }

    pub fn min_severity(&self) -> Severity {
        self.min_severity
    }

    /// Nest record attributes inside the open group scopes, innermost first.
    fn nest(&self, record_attrs: Vec<Attr>) -> Vec<Attr> {
        let mut tail = record_attrs;
        for scope in self.scopes.iter().rev() {
            let mut attrs = Vec::with_capacity(scope.attrs.len() + tail.len());
            attrs.extend(scope.attrs.iter().cloned());
            attrs.append(&mut tail);
            tail = match &scope.name {
                Some(name) => vec![Attr::group(name.clone(), attrs)],
                None => attrs,
            };
        }
        tail
    }
}

impl Handler for WriterHandler {
    fn enabled(&self, _ctx: &Context, severity: Severity) -> bool {
        severity >= self.min_severity
    }

    fn handle(&self, _ctx: &Context, record: Record) -> Result<()> {
        let time = record.time.to_rfc3339_opts(SecondsFormat::Millis, true);
        let builtins = [
            replace_attr(&[], Attr::new(TIME_KEY, time)),
            replace_attr(&[], Attr::new(LEVEL_KEY, i64::from(record.severity.value()))),
            replace_attr(&[], Attr::new(MESSAGE_KEY, record.message.as_str())),
        ];
        let severity = record.severity;
        let attrs = self.nest(record.into_attrs());

        let line = Line {
            severity,
            builtins: &builtins,
            attrs: &attrs,
        };
        let mut out = self.format.format(&line, self.colors)?;
        out.push('\n');
        self.writer.write_line(out.as_bytes())
    }

    fn with_attrs(&self, attrs: Vec<Attr>) -> SharedHandler {
        let mut derived = self.clone();
        if let Some(scope) = derived.scopes.last_mut() {
            scope.attrs.extend(attrs);
        }
        Arc::new(derived)
    }

    fn with_group(&self, name: &str) -> SharedHandler {
        let mut derived = self.clone();
        if !name.is_empty() {
            derived.scopes.push(Scope {
                name: Some(name.to_string()),
                attrs: Vec::new(),
            });
        }
        Arc::new(derived)
    }
}
