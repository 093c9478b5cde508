//! Basic logger usage example
//!
//! Demonstrates severities, attributes, derived loggers and the macros.
//!
//! Run with: cargo run --example basic_usage

use rust_cloud_logger::prelude::*;
use rust_cloud_logger::{args, info, warning};

fn main() -> Result<()> {
    println!("=== Rust Cloud Logger - Basic Usage Example ===\n");

    let logger = Logger::builder()
        .stdout()
        .min_severity(Severity::DEBUG)
        .labels([("service", "basic-usage")])
        .build();
    let ctx = Context::background();

    println!("1. Logging at different severities:");
    logger.debug(&ctx, "This is a debug message", &[]);
    logger.info(&ctx, "This is an info message", &[]);
    logger.notice(&ctx, "This is a notice message", &[]);
    logger.warning(&ctx, "This is a warning message", &[]);
    logger.error(&ctx, "This is an error message", &[]);

    println!("\n2. Attributes and derived loggers:");
    logger.info(&ctx, "User logged in", args!["user_id", 42i64, "admin", false]);
    let db = logger.with(args!["component", "database"]);
    db.info(&ctx, "Connection pool ready", args!["size", 8u32]);
    logger
        .with_group("request")
        .info(&ctx, "Grouped attributes", args!["method", "GET", "path", "/"]);

    println!("\n3. Context labels:");
    let (ctx, _guard) = ctx.with_label("request_id", "r-1234");
    logger.info(&ctx, "Label attached to this request", &[]);

    println!("\n4. Macros with format arguments:");
    let port = 8080;
    info!(logger, &ctx, "Server listening on port {}", port);
    warning!(logger, &ctx, "Retry attempt {} of {}", 3, 5);

    println!("\n5. Errors with stack traces:");
    let err = StackError::new("connection refused");
    logger.error_err(&ctx, Some(&err), args!["host", "db.internal"]);

    println!("\n6. Human-readable text output:");
    let text = Logger::builder().stdout().text().colors(true).build();
    text.notice(&ctx, "Rendered as key=value pairs", args!["k", "v"]);

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
