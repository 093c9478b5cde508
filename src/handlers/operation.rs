//! Operation stage

use crate::core::{
    Attr, Context, Handler, OperationPhase, Record, Result, Severity, SharedHandler,
};
use std::sync::Arc;

/// Adds the `operation` group for records logged inside an operation.
///
/// The records that open and close an operation carry their own group with
/// `first`/`last`; they are logged with a context that has no operation.
#[derive(Debug)]
pub struct OperationHandler {
    inner: SharedHandler,
}

impl OperationHandler {
    pub fn new(inner: SharedHandler) -> Self {
        Self { inner }
    }
}

impl Handler for OperationHandler {
    fn enabled(&self, ctx: &Context, severity: Severity) -> bool {
        self.inner.enabled(ctx, severity)
    }

    fn handle(&self, ctx: &Context, mut record: Record) -> Result<()> {
        if let Some(operation) = ctx.operation() {
            record.add_attr(operation.to_attr(OperationPhase::Within));
        }
        self.inner.handle(ctx, record)
    }

    fn with_attrs(&self, attrs: Vec<Attr>) -> SharedHandler {
        Arc::new(OperationHandler::new(self.inner.with_attrs(attrs)))
    }

    fn with_group(&self, name: &str) -> SharedHandler {
        Arc::new(OperationHandler::new(self.inner.with_group(name)))
    }
}
