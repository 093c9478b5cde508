//! Property-based tests for rust_cloud_logger using proptest

mod common;

use common::{builder, Buffer};
use opentelemetry::trace::{SpanId, TraceFlags, TraceId, TraceState};
use proptest::prelude::*;
use rust_cloud_logger::prelude::*;
use rust_cloud_logger::{parse_args, Arg};
use std::collections::BTreeMap;

fn named_severity() -> impl Strategy<Value = Severity> {
    proptest::sample::select(Severity::ALL.to_vec())
}

// ============================================================================
// Severity Tests
// ============================================================================

proptest! {
    /// Severity names parse back to the same severity, in any case
    #[test]
    fn test_severity_str_roundtrip(severity in named_severity()) {
        let name = severity.to_str();
        prop_assert_eq!(name.parse::<Severity>().unwrap(), severity);
        prop_assert_eq!(name.to_lowercase().parse::<Severity>().unwrap(), severity);
        prop_assert_eq!(severity.to_string(), name);
    }

    /// Ordering follows the numeric value, named or not
    #[test]
    fn test_severity_ordering(a in any::<i32>(), b in any::<i32>()) {
        let (sa, sb) = (Severity::new(a), Severity::new(b));
        prop_assert_eq!(sa <= sb, a <= b);
        prop_assert_eq!(sa > sb, a > b);
    }

    /// Any severity survives a JSON round trip
    #[test]
    fn test_severity_serde_roundtrip(value in any::<i32>()) {
        let severity = Severity::new(value);
        let json = serde_json::to_string(&severity).unwrap();
        let parsed: Severity = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(parsed, severity);
    }

    /// A record is written exactly when its severity reaches the threshold
    #[test]
    fn test_threshold(threshold in any::<i32>(), severity in any::<i32>()) {
        let buffer = Buffer::default();
        let logger = builder(&buffer).min_severity(Severity::new(threshold)).build();

        logger.log(&Context::background(), Severity::new(severity), "m", &[]);
        prop_assert_eq!(buffer.records().len(), usize::from(severity >= threshold));
    }
}

// ============================================================================
// Attribute Tests
// ============================================================================

proptest! {
    /// Alternating string keys and values pair up in order
    #[test]
    fn test_parse_args_pairs(pairs in prop::collection::vec(("[a-z]{1,8}", any::<i64>()), 0..16)) {
        let args: Vec<Arg> = pairs
            .iter()
            .flat_map(|(k, v)| [Arg::from(k.as_str()), Arg::from(*v)])
            .collect();

        let attrs = parse_args(&args);
        let expected: Vec<Attr> = pairs.iter().map(|(k, v)| Attr::new(k.as_str(), *v)).collect();
        prop_assert_eq!(attrs, expected);
    }

    /// Any message is written as one valid JSON line and read back unchanged
    #[test]
    fn test_message_escaping(message in any::<String>()) {
        let buffer = Buffer::default();
        let logger = builder(&buffer).build();

        logger.info(&Context::background(), &message, &[]);

        prop_assert_eq!(buffer.contents().lines().count(), 1);
        let last = buffer.last();
        prop_assert_eq!(last["message"].as_str().unwrap(), message.as_str());
    }

    /// Context labels come out as exactly the labels that were set
    #[test]
    fn test_context_labels(labels in prop::collection::btree_map("[a-z]{1,6}", "[ -~]{0,10}", 1..8)) {
        let buffer = Buffer::default();
        let logger = builder(&buffer).build();

        let mut ctx = Context::background();
        let mut guards = Vec::new();
        for (k, v) in &labels {
            let (next, guard) = ctx.with_label(k.as_str(), v.as_str());
            ctx = next;
            guards.push(guard);
        }
        logger.info(&ctx, "m", &[]);

        let written: BTreeMap<String, String> =
            serde_json::from_value(buffer.last()["logging.googleapis.com/labels"].clone()).unwrap();
        prop_assert_eq!(written, labels);
    }
}

// ============================================================================
// Trace Context Tests
// ============================================================================

proptest! {
    /// Any valid span renders its identifiers as lowercase hex
    #[test]
    fn test_span_identifiers_rendered(
        trace in prop::array::uniform16(any::<u8>()),
        span in prop::array::uniform8(any::<u8>()),
        sampled in any::<bool>(),
    ) {
        prop_assume!(trace.iter().any(|b| *b != 0) && span.iter().any(|b| *b != 0));

        let trace_hex: String = trace.iter().map(|b| format!("{:02x}", b)).collect();
        let span_hex: String = span.iter().map(|b| format!("{:02x}", b)).collect();
        let flags = if sampled { TraceFlags::SAMPLED } else { TraceFlags::NOT_SAMPLED };
        let span_context = SpanContext::new(
            TraceId::from_bytes(trace),
            SpanId::from_bytes(span),
            flags,
            true,
            TraceState::default(),
        );

        let buffer = Buffer::default();
        let logger = builder(&buffer).trace("p").build();
        logger.info(&Context::background().with_trace(span_context), "m", &[]);

        let record = buffer.last();
        prop_assert_eq!(
            record["logging.googleapis.com/trace"].as_str().unwrap(),
            format!("projects/p/traces/{}", trace_hex)
        );
        prop_assert_eq!(record["logging.googleapis.com/spanId"].as_str().unwrap(), span_hex);
        prop_assert_eq!(record["logging.googleapis.com/trace_sampled"].as_bool(), Some(sampled));
    }
}
