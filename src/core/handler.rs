//! Handler trait for pipeline stages
//!
//! A logger owns one [`Handler`], the outermost stage of a single-parent
//! chain that ends in the writer sink. Derivation (`with_attrs`,
//! `with_group`) never mutates a stage: each stage derives its inner stage
//! first and wraps the result in a fresh copy of itself.

use super::context::Context;
use super::error::Result;
use super::record::Record;
use super::severity::Severity;
use super::value::Attr;
use std::fmt;
use std::sync::Arc;

pub type SharedHandler = Arc<dyn Handler>;

pub trait Handler: Send + Sync + fmt::Debug {
    /// Whether a record at `severity` would be emitted. Stages delegate to
    /// their inner stage; only the sink applies the threshold.
    fn enabled(&self, ctx: &Context, severity: Severity) -> bool;

    fn handle(&self, ctx: &Context, record: Record) -> Result<()>;

    /// A copy of this stage whose chain adds `attrs` to every record.
    fn with_attrs(&self, attrs: Vec<Attr>) -> SharedHandler;

    /// A copy of this stage whose chain nests every later attribute under `name`.
    fn with_group(&self, name: &str) -> SharedHandler;
}

/// The handle step of a stage, as seen by a custom hook.
pub type HandleFn = Arc<dyn Fn(&Context, Record) -> Result<()> + Send + Sync>;

/// A user hook: receives the next stage's handle step and returns a new one.
pub type Middleware = Arc<dyn Fn(HandleFn) -> HandleFn + Send + Sync>;

/// Bind `handler.handle` as a [`HandleFn`].
pub fn handle_fn(handler: SharedHandler) -> HandleFn {
    Arc::new(move |ctx: &Context, record: Record| handler.handle(ctx, record))
}
