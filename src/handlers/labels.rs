//! Label stages
//!
//! [`LabelsHandler`] emits the `logging.googleapis.com/labels` group from the
//! context. [`DefaultLabelsHandler`] places logger-level default labels in the
//! context for the stages inside it.

use crate::core::{
    keys, Attr, Context, Handler, Labels, Record, Result, Severity, SharedHandler,
};
use std::sync::Arc;

#[derive(Debug)]
pub struct LabelsHandler {
    inner: SharedHandler,
}

impl LabelsHandler {
    pub fn new(inner: SharedHandler) -> Self {
        Self { inner }
    }
}

/// Context labels layered over default labels. A context label shadows a
/// default label with the same key.
fn merged_labels(ctx: &Context) -> Labels {
    let mut labels = ctx.default_labels().cloned().unwrap_or_default();
    if let Some(set) = ctx.labels() {
        labels.extend(set.snapshot());
    }
    labels
}

impl Handler for LabelsHandler {
    fn enabled(&self, ctx: &Context, severity: Severity) -> bool {
        self.inner.enabled(ctx, severity)
    }

    fn handle(&self, ctx: &Context, mut record: Record) -> Result<()> {
        let labels = merged_labels(ctx);
        if !labels.is_empty() {
            let attrs = labels.into_iter().map(|(k, v)| Attr::new(k, v)).collect();
            record.add_attr(Attr::group(keys::LABELS, attrs));
        }
        self.inner.handle(ctx, record)
    }

    fn with_attrs(&self, attrs: Vec<Attr>) -> SharedHandler {
        Arc::new(LabelsHandler::new(self.inner.with_attrs(attrs)))
    }

    fn with_group(&self, name: &str) -> SharedHandler {
        Arc::new(LabelsHandler::new(self.inner.with_group(name)))
    }
}

#[derive(Debug)]
pub struct DefaultLabelsHandler {
    inner: SharedHandler,
    labels: Arc<Labels>,
}

impl DefaultLabelsHandler {
    pub fn new(inner: SharedHandler, labels: Arc<Labels>) -> Self {
        Self { inner, labels }
    }
}

impl Handler for DefaultLabelsHandler {
    fn enabled(&self, ctx: &Context, severity: Severity) -> bool {
        self.inner.enabled(ctx, severity)
    }

    fn handle(&self, ctx: &Context, record: Record) -> Result<()> {
        let ctx = ctx.with_default_labels(Arc::clone(&self.labels));
        self.inner.handle(&ctx, record)
    }

    fn with_attrs(&self, attrs: Vec<Attr>) -> SharedHandler {
        Arc::new(DefaultLabelsHandler::new(
            self.inner.with_attrs(attrs),
            Arc::clone(&self.labels),
        ))
    }

    fn with_group(&self, name: &str) -> SharedHandler {
        Arc::new(DefaultLabelsHandler::new(
            self.inner.with_group(name),
            Arc::clone(&self.labels),
        ))
    }
}
