//! Handler pipeline stages
//!
//! A chain is built inner to outer: the writer sink, the labels stage, the
//! operation stage, then each [`HandlerOption`] in the order given.

pub mod custom;
pub mod labels;
pub mod operation;
pub mod trace;
pub mod writer;

pub use custom::CustomHandler;
pub use labels::{DefaultLabelsHandler, LabelsHandler};
pub use operation::OperationHandler;
pub use trace::TraceHandler;
pub use writer::{SharedWriter, WriterHandler};

use crate::core::{HandleFn, Labels, Middleware, SharedHandler};
use std::fmt;
use std::sync::Arc;

/// An optional stage wrapped around a chain.
#[derive(Clone)]
pub enum HandlerOption {
    /// Default labels, shadowed by context labels with the same key.
    Labels(Arc<Labels>),
    /// Trace correlation for the given Google Cloud project.
    Trace { project_id: String },
    /// A user hook, see [`CustomHandler`].
    HandleFn(Middleware),
}

impl HandlerOption {
    pub fn labels<I, K, V>(labels: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let labels = labels
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        HandlerOption::Labels(Arc::new(labels))
    }

    pub fn trace(project_id: impl Into<String>) -> Self {
        HandlerOption::Trace {
            project_id: project_id.into(),
        }
    }

    /// Wrap the rest of the chain with `f`.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_cloud_logger::{Attr, Context, HandleFn, HandlerOption, Record};
    /// use std::sync::Arc;
    ///
    /// let option = HandlerOption::handle_fn(|next: HandleFn| -> HandleFn {
    ///     Arc::new(move |ctx: &Context, mut record: Record| {
    ///         record.add_attr(Attr::new("service", "checkout"));
    ///         next(ctx, record)
    ///     })
    /// });
    /// # let _ = option;
    /// ```
    pub fn handle_fn<F>(f: F) -> Self
    where
        F: Fn(HandleFn) -> HandleFn + Send + Sync + 'static,
    {
        HandlerOption::HandleFn(Arc::new(f))
    }

    pub fn apply(&self, inner: SharedHandler) -> SharedHandler {
        match self {
            HandlerOption::Labels(labels) => {
                Arc::new(DefaultLabelsHandler::new(inner, Arc::clone(labels)))
            }
            HandlerOption::Trace { project_id } => {
                Arc::new(TraceHandler::new(inner, project_id.as_str()))
            }
            HandlerOption::HandleFn(middleware) => {
                Arc::new(CustomHandler::new(inner, Arc::clone(middleware)))
            }
        }
    }
}

impl fmt::Debug for HandlerOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandlerOption::Labels(labels) => f.debug_tuple("Labels").field(labels).finish(),
            HandlerOption::Trace { project_id } => f
                .debug_struct("Trace")
                .field("project_id", project_id)
                .finish(),
            HandlerOption::HandleFn(_) => f.write_str("HandleFn"),
        }
    }
}

/// Wrap `sink` with the built-in stages, then with each option in order.
pub fn build_chain(sink: SharedHandler, options: &[HandlerOption]) -> SharedHandler {
    let chain: SharedHandler = Arc::new(LabelsHandler::new(sink));
    let chain: SharedHandler = Arc::new(OperationHandler::new(chain));
    apply_options(chain, options)
}

/// Wrap an existing chain with further options.
pub fn apply_options(chain: SharedHandler, options: &[HandlerOption]) -> SharedHandler {
    options
        .iter()
        .fold(chain, |handler, option| option.apply(handler))
}

