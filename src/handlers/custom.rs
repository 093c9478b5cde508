//! User hook stage

use crate::core::{
    handler::handle_fn, Attr, Context, HandleFn, Handler, Middleware, Record, Result, Severity,
    SharedHandler,
};
use std::fmt;
use std::sync::Arc;

/// Runs a user hook in front of the rest of the chain.
///
/// The hook is applied to the handle step of the current inner stage. On
/// derivation the inner stage is derived first and the hook is applied again
/// to the new inner stage, so the derived chain never calls into the stage it
/// was derived from.
pub struct CustomHandler {
    inner: SharedHandler,
    middleware: Middleware,
    handle: HandleFn,
}

impl CustomHandler {
    pub fn new(inner: SharedHandler, middleware: Middleware) -> Self {
        let handle = middleware(handle_fn(Arc::clone(&inner)));
        Self {
            inner,
            middleware,
            handle,
        }
    }
}

impl fmt::Debug for CustomHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomHandler")
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}

impl Handler for CustomHandler {
    fn enabled(&self, ctx: &Context, severity: Severity) -> bool {
        self.inner.enabled(ctx, severity)
    }

    fn handle(&self, ctx: &Context, record: Record) -> Result<()> {
        (self.handle)(ctx, record)
    }

    fn with_attrs(&self, attrs: Vec<Attr>) -> SharedHandler {
        Arc::new(CustomHandler::new(
            self.inner.with_attrs(attrs),
            Arc::clone(&self.middleware),
        ))
    }

    fn with_group(&self, name: &str) -> SharedHandler {
        Arc::new(CustomHandler::new(
            self.inner.with_group(name),
            Arc::clone(&self.middleware),
        ))
    }
}
