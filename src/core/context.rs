//! Explicit call context threaded through every logging call
//!
//! This module provides:
//! - `Context`: immutable, cheaply cloned carrier of request-scoped state
//! - `LabelSet`: shared, mutable label map reachable from a context
//! - `LabelGuard`: RAII guard removing one label when dropped
//!
//! A context never relies on thread-local or global state, so it nests
//! correctly across threads and tasks.

use super::operation::Operation;
use opentelemetry::trace::{SpanContext, TraceContextExt};
use parking_lot::RwLock;
use std::any::{Any, TypeId};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Label key/value pairs, ordered by key.
pub type Labels = BTreeMap<String, String>;

/// Context-scoped labels
///
/// Clones share the same underlying map. Thread-safe: readers and writers
/// on different descendants of one context see each other's changes.
#[derive(Debug, Clone, Default)]
pub struct LabelSet {
    labels: Arc<RwLock<Labels>>,
}

impl LabelSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a label, returning a guard that removes it on drop.
    pub fn insert(&self, key: impl Into<String>, value: impl Into<String>) -> LabelGuard {
        let key = key.into();
        self.labels.write().insert(key.clone(), value.into());
        LabelGuard {
            labels: Arc::clone(&self.labels),
            key,
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.labels.read().get(key).cloned()
    }

    /// Get a clone of all labels
    pub fn snapshot(&self) -> Labels {
        self.labels.read().clone()
    }

    pub fn len(&self) -> usize {
        self.labels.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.read().is_empty()
    }
}

/// RAII guard for a scoped label
///
/// When dropped, removes exactly the key it added from the label set. It
/// does not restore any earlier value of that key.
///
/// # Example
///
/// ```
/// use rust_cloud_logger::Context;
///
/// let ctx = Context::background();
/// {
///     let (ctx, _guard) = ctx.with_label("request_id", "abc-123");
///     assert_eq!(ctx.labels().unwrap().get("request_id").as_deref(), Some("abc-123"));
/// }
/// ```
#[must_use = "the label is removed as soon as the guard is dropped"]
pub struct LabelGuard {
    labels: Arc<RwLock<Labels>>,
    key: String,
}

impl LabelGuard {
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl fmt::Debug for LabelGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LabelGuard").field("key", &self.key).finish()
    }
}

impl Drop for LabelGuard {
    fn drop(&mut self) {
        self.labels.write().remove(&self.key);
    }
}

struct Extension {
    type_id: TypeId,
    value: Arc<dyn Any + Send + Sync>,
    parent: Option<Arc<Extension>>,
}

/// Request-scoped state read by the handler chain.
///
/// Every `with_*` method returns a new context; the receiver is unchanged.
#[derive(Clone, Default)]
pub struct Context {
    labels: Option<LabelSet>,
    default_labels: Option<Arc<Labels>>,
    operation: Option<Arc<Operation>>,
    trace: Option<SpanContext>,
    extensions: Option<Arc<Extension>>,
}

impl Context {
    /// An empty context.
    pub fn background() -> Self {
        Self::default()
    }

    /// Add a label visible to every record logged with the returned context.
    ///
    /// The label set inherited from `self` is extended in place when there is
    /// one, otherwise a new set is created. Dropping the guard removes the key.
    pub fn with_label(
        &self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> (Context, LabelGuard) {
        let labels = self.labels.clone().unwrap_or_default();
        let guard = labels.insert(key, value);
        let ctx = Context {
            labels: Some(labels),
            ..self.clone()
        };
        (ctx, guard)
    }

    pub fn labels(&self) -> Option<&LabelSet> {
        self.labels.as_ref()
    }

    pub fn with_default_labels(&self, labels: Arc<Labels>) -> Context {
        Context {
            default_labels: Some(labels),
            ..self.clone()
        }
    }

    pub fn default_labels(&self) -> Option<&Labels> {
        self.default_labels.as_deref()
    }

    pub fn with_operation(&self, operation: Operation) -> Context {
        Context {
            operation: Some(Arc::new(operation)),
            ..self.clone()
        }
    }

    pub fn operation(&self) -> Option<&Operation> {
        self.operation.as_deref()
    }

    /// Correlate records with `span_context`.
    ///
    /// Without an explicit span the trace stage falls back to the span of the
    /// current OpenTelemetry context.
    pub fn with_trace(&self, span_context: SpanContext) -> Context {
        Context {
            trace: Some(span_context),
            ..self.clone()
        }
    }

    /// Correlate records with the span of an OpenTelemetry context.
    pub fn with_otel_context(&self, cx: &opentelemetry::Context) -> Context {
        self.with_trace(cx.span().span_context().clone())
    }

    pub fn trace(&self) -> Option<&SpanContext> {
        self.trace.as_ref()
    }

    /// Attach a typed value, shadowing any earlier value of the same type.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_cloud_logger::Context;
    ///
    /// struct UserId(String);
    ///
    /// let ctx = Context::background().with_value(UserId("u-1".to_string()));
    /// assert_eq!(ctx.value::<UserId>().map(|u| u.0.as_str()), Some("u-1"));
    /// ```
    pub fn with_value<T: Any + Send + Sync>(&self, value: T) -> Context {
        let extension = Extension {
            type_id: TypeId::of::<T>(),
            value: Arc::new(value),
            parent: self.extensions.clone(),
        };
        Context {
            extensions: Some(Arc::new(extension)),
            ..self.clone()
        }
    }

    pub fn value<T: Any + Send + Sync>(&self) -> Option<&T> {
        let mut current = self.extensions.as_deref();
        while let Some(ext) = current {
            if ext.type_id == TypeId::of::<T>() {
                return ext.value.downcast_ref::<T>();
            }
            current = ext.parent.as_deref();
        }
        None
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut values = 0;
        let mut current = self.extensions.as_deref();
        while let Some(ext) = current {
            values += 1;
            current = ext.parent.as_deref();
        }

        f.debug_struct("Context")
            .field("labels", &self.labels.as_ref().map(LabelSet::snapshot))
            .field("default_labels", &self.default_labels)
            .field("operation", &self.operation)
            .field("trace", &self.trace)
            .field("values", &values)
            .finish()
    }
}
