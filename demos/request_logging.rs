//! Request logging example
//!
//! Demonstrates the default logger, trace correlation, HTTP request records
//! and a custom hook that copies request state into every record.
//!
//! Run with: cargo run --example request_logging

use opentelemetry::trace::{SpanId, TraceFlags, TraceId, TraceState};
use rust_cloud_logger::prelude::*;
use rust_cloud_logger::{args, global, set_default};
use std::sync::Arc;
use std::time::{Duration, Instant};

struct RequestId(String);

fn request_id_hook(next: HandleFn) -> HandleFn {
    Arc::new(move |ctx: &Context, mut record: Record| {
        if let Some(id) = ctx.value::<RequestId>() {
            record.add_attr(Attr::new("request_id", id.0.as_str()));
        }
        next(ctx, record)
    })
}

fn handle(ctx: &Context, method: &str, url: &str, status: u16) {
    let started = Instant::now();
    let (ctx, _guard) = ctx.with_label("route", url);

    let (op_ctx, end) = global::start_operation(&ctx, Severity::INFO, "request received", url, "frontend");
    global::debug(&op_ctx, "parsing body", &[]);
    if status >= 500 {
        let err = StackError::new("upstream unavailable");
        global::error_err(&op_ctx, Some(&err), args!["upstream", "inventory"]);
    }
    end.end("request finished");

    let req = HttpRequest {
        request_method: method.to_string(),
        request_url: url.to_string(),
        status,
        response_size: 512,
        latency: started.elapsed() + Duration::from_millis(3),
        protocol: "HTTP/1.1".to_string(),
        ..Default::default()
    };
    global::http_req(&ctx, &req, "", &[]);
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    println!("=== Rust Cloud Logger - Request Logging Example ===\n");

    set_default(
        Logger::builder()
            .stdout()
            .min_severity(Severity::DEBUG)
            .labels([("service", "request-logging")])
            .trace("example-project")
            .handle_fn(request_id_hook)
            .build(),
    );

    let span = SpanContext::new(
        TraceId::from_hex("4bf92f3577b34da6a3ce929d0e0e4736")?,
        SpanId::from_hex("00f067aa0ba902b7")?,
        TraceFlags::SAMPLED,
        true,
        TraceState::default(),
    );
    let ctx = Context::background()
        .with_trace(span)
        .with_value(RequestId("req-1".to_string()));

    println!("1. A successful request:");
    handle(&ctx, "GET", "/items", 200);

    println!("\n2. A failed request:");
    let ctx = ctx.with_value(RequestId("req-2".to_string()));
    handle(&ctx, "POST", "/orders", 503);

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
