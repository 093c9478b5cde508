//! # Rust Cloud Logger
//!
//! A structured logger that writes one JSON object per line using the field
//! names Google Cloud Logging reads from structured payloads.
//!
//! ## Features
//!
//! - **Composable handlers**: labels, trace, operation and custom stages
//!   wrapped around a writer sink
//! - **Context-scoped labels**: labels added to a [`Context`] and removed by a guard
//! - **Operations**: first/last markers around groups of related records
//! - **HTTP requests, stack traces, source locations** shaped for Cloud Logging
//! - **Thread safe**: one logger can be shared by any number of threads
//!
//! ## Example
//!
//! ```
//! use rust_cloud_logger::prelude::*;
//! use rust_cloud_logger::args;
//!
//! let logger = Logger::builder()
//!     .writer(std::io::sink())
//!     .labels([("service", "checkout")])
//!     .build();
//!
//! let ctx = Context::background();
//! let (ctx, _guard) = ctx.with_label("request_id", "r-1");
//! logger.info(&ctx, "order placed", args!["items", 3i32]);
//! ```

pub mod core;
pub mod global;
pub mod handlers;
pub mod macros;

pub mod prelude {
    pub use crate::core::{
        Arg, Attr, Context, HandleFn, Handler, HttpRequest, LabelGuard, Logger, LoggerBuilder,
        LoggerConfig, LoggerError, OperationEnd, OutputFormat, Record, Result, Severity,
        StackError, Value,
    };
    pub use crate::handlers::HandlerOption;
    pub use opentelemetry::trace::SpanContext;
}

pub use crate::core::{
    find_stack, has_stack, keys, parse_args, Arg, Attr, Context, HandleFn, Handler, HttpRequest,
    LabelGuard, LabelSet, Labels, Logger, LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics,
    Middleware, Operation, OperationEnd, OperationPhase, OutputFormat, Record, Result, Severity,
    SharedHandler, SourceLocation, StackError, Value, BAD_KEY,
};
pub use global::{default_logger, set_default, set_options};
pub use handlers::{HandlerOption, SharedWriter};
pub use opentelemetry::{self, trace::SpanContext};
