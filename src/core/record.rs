//! Log record structure

use super::severity::Severity;
use super::value::Attr;
use chrono::{DateTime, Utc};

/// One structured log event in progress.
///
/// Pipeline stages append attributes as the record travels toward the sink;
/// attributes are never removed or reordered.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub time: DateTime<Utc>,
    pub severity: Severity,
    pub message: String,
    attrs: Vec<Attr>,
}

impl Record {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            time: Utc::now(),
            severity,
            message: message.into(),
            attrs: Vec::new(),
        }
    }

    pub fn with_time(mut self, time: DateTime<Utc>) -> Self {
        self.time = time;
        self
    }

    pub fn add_attr(&mut self, attr: Attr) {
        self.attrs.push(attr);
    }

    pub fn add_attrs(&mut self, attrs: impl IntoIterator<Item = Attr>) {
        self.attrs.extend(attrs);
    }

    pub fn attrs(&self) -> &[Attr] {
        &self.attrs
    }

    pub fn num_attrs(&self) -> usize {
        self.attrs.len()
    }

    pub fn into_attrs(self) -> Vec<Attr> {
        self.attrs
    }
}
