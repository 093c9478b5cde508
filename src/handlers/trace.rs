//! Trace correlation stage

use crate::core::{keys, Attr, Context, Handler, Record, Result, Severity, SharedHandler};
use opentelemetry::trace::{SpanContext, TraceContextExt};
use std::sync::Arc;

/// Adds `trace`, `spanId` and `trace_sampled` when a valid span is in scope.
///
/// The span set on the [`Context`] wins; otherwise the span of the current
/// OpenTelemetry context is used.
#[derive(Debug)]
pub struct TraceHandler {
    inner: SharedHandler,
    project_id: Arc<str>,
}

impl TraceHandler {
    pub fn new(inner: SharedHandler, project_id: impl Into<Arc<str>>) -> Self {
        Self {
            inner,
            project_id: project_id.into(),
        }
    }
}

fn span_context(ctx: &Context) -> SpanContext {
    match ctx.trace() {
        Some(span_context) => span_context.clone(),
        None => opentelemetry::Context::map_current(|cx| cx.span().span_context().clone()),
    }
}

impl Handler for TraceHandler {
    fn enabled(&self, ctx: &Context, severity: Severity) -> bool {
        self.inner.enabled(ctx, severity)
    }

    fn handle(&self, ctx: &Context, mut record: Record) -> Result<()> {
        let span = span_context(ctx);
        if span.is_valid() {
            record.add_attrs([
                Attr::new(
                    keys::TRACE,
                    format!("projects/{}/traces/{}", self.project_id, span.trace_id()),
                ),
                Attr::new(keys::SPAN_ID, span.span_id().to_string()),
                Attr::new(keys::TRACE_SAMPLED, span.is_sampled()),
            ]);
        }
        self.inner.handle(ctx, record)
    }

    fn with_attrs(&self, attrs: Vec<Attr>) -> SharedHandler {
        Arc::new(TraceHandler {
            inner: self.inner.with_attrs(attrs),
            project_id: Arc::clone(&self.project_id),
        })
    }

    fn with_group(&self, name: &str) -> SharedHandler {
        Arc::new(TraceHandler {
            inner: self.inner.with_group(name),
            project_id: Arc::clone(&self.project_id),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Value;
    use opentelemetry::trace::{SpanId, TraceFlags, TraceId, TraceState};
    use parking_lot::Mutex;

    #[derive(Debug, Default)]
    struct Capture {
        seen: Arc<Mutex<Vec<Attr>>>,
    }

    impl Handler for Capture {
        fn enabled(&self, _ctx: &Context, _severity: Severity) -> bool {
            true
        }

        fn handle(&self, _ctx: &Context, record: Record) -> Result<()> {
            self.seen.lock().extend(record.into_attrs());
            Ok(())
        }

        fn with_attrs(&self, _attrs: Vec<Attr>) -> SharedHandler {
            Arc::new(Capture {
                seen: Arc::clone(&self.seen),
            })
        }

        fn with_group(&self, _name: &str) -> SharedHandler {
            Arc::new(Capture {
                seen: Arc::clone(&self.seen),
            })
        }
    }

    fn span(flags: TraceFlags) -> SpanContext {
        SpanContext::new(
            TraceId::from_hex("4bf92f3577b34da6a3ce929d0e0e4736").unwrap(),
            SpanId::from_hex("00f067aa0ba902b7").unwrap(),
            flags,
            true,
            TraceState::default(),
        )
    }

    fn traced(ctx: &Context) -> Vec<Attr> {
        let capture = Capture::default();
        let seen = Arc::clone(&capture.seen);
        TraceHandler::new(Arc::new(capture), "proj")
            .handle(ctx, Record::new(Severity::INFO, "m"))
            .unwrap();
        let attrs = seen.lock().clone();
        attrs
    }

    #[test]
    fn test_explicit_span() {
        let ctx = Context::background().with_trace(span(TraceFlags::NOT_SAMPLED));
        assert_eq!(
            traced(&ctx),
            vec![
                Attr::new(
                    keys::TRACE,
                    "projects/proj/traces/4bf92f3577b34da6a3ce929d0e0e4736"
                ),
                Attr::new(keys::SPAN_ID, "00f067aa0ba902b7"),
                Attr::new(keys::TRACE_SAMPLED, false),
            ]
        );
    }

    #[test]
    fn test_current_otel_span() {
        let otel = opentelemetry::Context::new().with_remote_span_context(span(TraceFlags::SAMPLED));
        let _attached = otel.attach();

        let attrs = traced(&Context::background());
        assert_eq!(attrs.len(), 3);
        assert_eq!(attrs[2].value, Value::Bool(true));
    }

    #[test]
    fn test_invalid_span_adds_nothing() {
        assert!(traced(&Context::background()).is_empty());

        let ctx = Context::background().with_trace(SpanContext::empty_context());
        assert!(traced(&ctx).is_empty());
    }
}
