//! Core logger types and traits

pub mod config;
pub mod context;
pub mod error;
pub mod handler;
pub mod http_request;
pub mod keys;
pub mod logger;
pub mod metrics;
pub mod operation;
pub mod output_format;
pub mod record;
pub mod replacer;
pub mod severity;
pub mod source_location;
pub mod stack_error;
pub mod value;

pub use config::LoggerConfig;
pub use context::{Context, LabelGuard, LabelSet, Labels};
pub use error::{LoggerError, Result};
pub use handler::{HandleFn, Handler, Middleware, SharedHandler};
pub use http_request::HttpRequest;
pub use logger::{Logger, LoggerBuilder, OperationEnd};
pub use metrics::LoggerMetrics;
pub use operation::{Operation, OperationPhase};
pub use output_format::{Line, OutputFormat};
pub use record::Record;
pub use severity::Severity;
pub use source_location::SourceLocation;
pub use stack_error::{find_stack, has_stack, StackError};
pub use value::{parse_args, Arg, Attr, Value, BAD_KEY};
