//! File logging example
//!
//! Demonstrates writing records to a file and reading them back.
//!
//! Run with: cargo run --example file_logging

use rust_cloud_logger::prelude::*;
use rust_cloud_logger::{args, LoggerMetrics};
use std::fs::OpenOptions;

fn main() -> Result<()> {
    println!("=== Rust Cloud Logger - File Logging Example ===\n");

    let path = "application.log";
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| LoggerError::io_operation("open", path, e))?;

    let config = LoggerConfig::from_json(
        r#"{"min_severity": "info", "labels": {"service": "file-logging"}}"#,
    )?;
    let logger = config.into_builder().writer(file).build();
    let ctx = Context::background();

    println!("1. Logging to '{}':", path);
    logger.info(&ctx, "Application started", &[]);
    logger.debug(&ctx, "Loading configuration...", &[]);
    logger.info(&ctx, "Configuration loaded successfully", &[]);
    logger.warning(&ctx, "Using default settings for some options", &[]);

    println!("\n2. Performing some operations:");
    let (op_ctx, end) =
        logger.start_operation(&ctx, Severity::INFO, "Batch started", "batch-1", "file-logging");
    for i in 1..=5u32 {
        logger.info(&op_ctx, "Processing item", args!["item", i, "total", 5u32]);
        if i == 3 {
            logger.warning(&op_ctx, "Item took longer than expected", args!["item", i]);
        }
    }
    end.end("Batch finished");

    let metrics: &LoggerMetrics = logger.metrics();
    println!(
        "   {} records written, {} failed",
        metrics.total_logged(),
        metrics.failed_count()
    );

    println!("\n=== Example completed successfully! ===");
    println!("Check '{}' for the full log output", path);

    Ok(())
}
