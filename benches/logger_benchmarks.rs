//! Criterion benchmarks for rust_cloud_logger

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use opentelemetry::trace::{SpanId, TraceFlags, TraceId, TraceState};
use rust_cloud_logger::prelude::*;
use rust_cloud_logger::{args, parse_args};
use std::io;
use std::sync::Arc;

fn sink_logger() -> LoggerBuilder {
    Logger::builder().writer(io::sink())
}

// ============================================================================
// Logger Creation Benchmarks
// ============================================================================

fn bench_logger_creation(c: &mut Criterion) {
    let mut group = c.benchmark_group("logger_creation");
    group.throughput(Throughput::Elements(1));

    group.bench_function("plain", |b| {
        b.iter(|| black_box(sink_logger().build()));
    });

    group.bench_function("all_stages", |b| {
        b.iter(|| {
            let logger = sink_logger()
                .labels([("service", "bench")])
                .trace("bench-project")
                .handle_fn(|next| next)
                .build();
            black_box(logger)
        });
    });

    group.finish();
}

// ============================================================================
// Logging Performance Benchmarks
// ============================================================================

fn bench_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("logging");
    group.throughput(Throughput::Elements(1));

    let ctx = Context::background();
    let plain = sink_logger().build();
    let text = sink_logger().text().build();
    let staged = sink_logger()
        .labels([("service", "bench"), ("env", "test")])
        .trace("bench-project")
        .build();
    let (labelled, _guard) = ctx.with_label("request_id", "r-1");
    let traced = labelled.with_trace(SpanContext::new(
        TraceId::from_hex("4bf92f3577b34da6a3ce929d0e0e4736").expect("valid trace id"),
        SpanId::from_hex("00f067aa0ba902b7").expect("valid span id"),
        TraceFlags::SAMPLED,
        true,
        TraceState::default(),
    ));

    group.bench_function("message_only", |b| {
        b.iter(|| plain.info(&ctx, black_box("Benchmark message"), &[]));
    });

    group.bench_function("with_attrs", |b| {
        b.iter(|| {
            plain.info(
                &ctx,
                black_box("Benchmark message"),
                args!["user_id", 42i64, "path", "/api/items", "cached", true],
            )
        });
    });

    group.bench_function("text_format", |b| {
        b.iter(|| text.info(&ctx, black_box("Benchmark message"), args!["k", "v"]));
    });

    group.bench_function("labels_and_trace", |b| {
        b.iter(|| staged.info(&traced, black_box("Benchmark message"), &[]));
    });

    group.finish();
}

// ============================================================================
// Derivation Benchmarks
// ============================================================================

fn bench_derivation(c: &mut Criterion) {
    let mut group = c.benchmark_group("derivation");

    for depth in [1usize, 4, 16] {
        let logger = sink_logger()
            .labels([("service", "bench")])
            .handle_fn(|next| next)
            .build();
        let mut derived = logger;
        for i in 0..depth {
            derived = derived.with(args!["level", i]);
        }

        group.bench_with_input(BenchmarkId::new("log_after_with", depth), &derived, |b, l| {
            b.iter(|| l.info(&Context::background(), black_box("derived"), &[]));
        });
    }

    let logger = sink_logger().build();
    group.bench_function("with_group", |b| {
        b.iter(|| black_box(logger.with_group("request").with(args!["id", "r-1"])));
    });

    group.finish();
}

// ============================================================================
// Severity Filtering Benchmarks
// ============================================================================

fn bench_severity_filtering(c: &mut Criterion) {
    let mut group = c.benchmark_group("severity_filtering");
    group.throughput(Throughput::Elements(1));

    let logger = sink_logger().min_severity(Severity::ERROR).build();
    let ctx = Context::background();

    group.bench_function("filtered_out", |b| {
        b.iter(|| logger.debug(&ctx, black_box("Filtered message"), args!["k", "v"]));
    });

    group.bench_function("passed_through", |b| {
        b.iter(|| logger.error(&ctx, black_box("Passed message"), args!["k", "v"]));
    });

    group.finish();
}

// ============================================================================
// Attribute Parsing Benchmarks
// ============================================================================

fn bench_parse_args(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_args");

    group.bench_function("pairs", |b| {
        b.iter(|| {
            black_box(parse_args(args![
                "user_id", 42i64, "path", "/api/items", "latency_ms", 12.5f64
            ]))
        });
    });

    group.bench_function("mixed_attrs", |b| {
        b.iter(|| {
            black_box(parse_args(args![
                Attr::new("user_id", 42i64),
                "path",
                "/api/items",
                "dangling"
            ]))
        });
    });

    group.finish();
}

// ============================================================================
// Concurrent Logging Benchmarks
// ============================================================================

fn bench_concurrent_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent_logging");

    let logger = Arc::new(sink_logger().build());

    group.bench_function("multi_thread_4", |b| {
        let logger = Arc::clone(&logger);
        b.iter(|| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    let logger = Arc::clone(&logger);
                    std::thread::spawn(move || {
                        logger.info(&Context::background(), black_box("Concurrent message"), &[]);
                    })
                })
                .collect();

            for handle in handles {
                handle.join().unwrap();
            }
        });
    });

    group.finish();
}

// ============================================================================
// Criterion Configuration
// ============================================================================

criterion_group!(
    benches,
    bench_logger_creation,
    bench_logging,
    bench_derivation,
    bench_severity_filtering,
    bench_parse_args,
    bench_concurrent_logging
);

criterion_main!(benches);
