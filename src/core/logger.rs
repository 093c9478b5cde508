//! Logger facade
//!
//! [`Logger`] turns calls into [`Record`]s and hands them to the outermost
//! stage of its handler chain. A logger is immutable: `with*` methods return
//! a derived logger and leave the receiver untouched.
//!
//! Every public logging method is `#[track_caller]`; the call site is read in
//! exactly one place, [`Logger::capture`], and only after the severity check
//! has passed.

use super::{
    context::Context,
    error::Result,
    handler::SharedHandler,
    http_request::HttpRequest,
    keys,
    metrics::LoggerMetrics,
    operation::{Operation, OperationPhase},
    output_format::OutputFormat,
    record::Record,
    severity::Severity,
    source_location::SourceLocation,
    stack_error::find_stack,
    value::{parse_args, Arg, Attr},
};
use crate::handlers::{self, HandlerOption, SharedWriter, WriterHandler};
use std::error::Error;
use std::fmt;
use std::io::Write;
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct Logger {
    handler: SharedHandler,
    /// Shared with every logger derived from this one
    metrics: Arc<LoggerMetrics>,
}

impl Logger {
    /// Create a logger writing to `writer`.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_cloud_logger::{Context, HandlerOption, Logger, OutputFormat, Severity};
    ///
    /// let logger = Logger::new(
    ///     std::io::sink(),
    ///     Severity::INFO,
    ///     OutputFormat::Json,
    ///     &[HandlerOption::trace("my-project")],
    /// );
    /// logger.info(&Context::background(), "started", &[]);
    /// ```
    pub fn new<W: Write + Send + 'static>(
        writer: W,
        min_severity: Severity,
        format: OutputFormat,
        options: &[HandlerOption],
    ) -> Self {
        let sink = WriterHandler::new(SharedWriter::new(writer), min_severity, format);
        Self::from_handler(handlers::build_chain(Arc::new(sink), options))
    }

    /// Wrap an already built chain.
    pub fn from_handler(handler: SharedHandler) -> Self {
        Self {
            handler,
            metrics: Arc::new(LoggerMetrics::new()),
        }
    }

    pub fn handler(&self) -> &SharedHandler {
        &self.handler
    }

    /// Get the logger metrics
    ///
    /// ```
    /// use rust_cloud_logger::{Context, Logger};
    ///
    /// let logger = Logger::builder().writer(std::io::sink()).build();
    /// logger.info(&Context::background(), "hello", &[]);
    /// assert_eq!(logger.metrics().total_logged(), 1);
    /// assert_eq!(logger.metrics().failed_count(), 0);
    /// ```
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    fn derive(&self, handler: SharedHandler) -> Logger {
        Logger {
            handler,
            metrics: Arc::clone(&self.metrics),
        }
    }

    /// Whether a record at `severity` would be emitted.
    pub fn enabled(&self, ctx: &Context, severity: Severity) -> bool {
        self.handler.enabled(ctx, severity)
    }

    /// A logger that adds the attributes parsed from `args` to every record.
    #[must_use]
    pub fn with(&self, args: &[Arg]) -> Logger {
        let attrs = parse_args(args);
        if attrs.is_empty() {
            return self.clone();
        }
        self.derive(self.handler.with_attrs(attrs))
    }

    /// A logger that nests every later attribute under `name`.
    #[must_use]
    pub fn with_group(&self, name: &str) -> Logger {
        if name.is_empty() {
            return self.clone();
        }
        self.derive(self.handler.with_group(name))
    }

    /// A logger that adds an `httpRequest` group to every record.
    #[must_use]
    pub fn with_http_request(&self, req: &HttpRequest) -> Logger {
        self.derive(self.handler.with_attrs(vec![req.to_attr()]))
    }

    /// A logger that adds `logging.googleapis.com/insertId` to every record.
    #[must_use]
    pub fn with_insert_id(&self, id: &str) -> Logger {
        self.derive(
            self.handler
                .with_attrs(vec![Attr::new(keys::INSERT_ID, id)]),
        )
    }

    /// A logger whose chain is additionally wrapped with `options`.
    #[must_use]
    pub fn with_options(&self, options: &[HandlerOption]) -> Logger {
        self.derive(handlers::apply_options(Arc::clone(&self.handler), options))
    }

    #[track_caller]
    pub fn log(&self, ctx: &Context, severity: Severity, msg: &str, args: &[Arg]) {
        let Some(location) = self.capture(ctx, severity) else {
            return;
        };
        let result = self.dispatch(ctx, severity, location, msg.to_string(), parse_args(args));
        self.report(result);
    }

    #[track_caller]
    pub fn logf(&self, ctx: &Context, severity: Severity, args: fmt::Arguments<'_>) {
        let Some(location) = self.capture(ctx, severity) else {
            return;
        };
        let result = self.dispatch(ctx, severity, location, args.to_string(), Vec::new());
        self.report(result);
    }

    /// Like [`Logger::log`], but returns a write failure to the caller.
    ///
    /// A record below the threshold is not an error.
    #[track_caller]
    pub fn try_log(&self, ctx: &Context, severity: Severity, msg: &str, args: &[Arg]) -> Result<()> {
        let Some(location) = self.capture(ctx, severity) else {
            return Ok(());
        };
        let result = self.dispatch(ctx, severity, location, msg.to_string(), parse_args(args));
        self.count(&result);
        result
    }

    /// Log `err` at `severity`. `None` logs nothing.
    ///
    /// The message is the error text. When a [`StackError`](super::StackError)
    /// is found in the `source()` chain, a `stack_trace` attribute is added.
    #[track_caller]
    pub fn log_err(
        &self,
        ctx: &Context,
        severity: Severity,
        err: Option<&(dyn Error + 'static)>,
        args: &[Arg],
    ) {
        let Some(err) = err else {
            return;
        };
        let Some(location) = self.capture(ctx, severity) else {
            return;
        };

        let mut attrs = parse_args(args);
        if let Some(stack_err) = find_stack(err) {
            attrs.push(Attr::new(keys::STACK_TRACE, stack_err.stack_trace()));
        }
        let result = self.dispatch(ctx, severity, location, err.to_string(), attrs);
        self.report(result);
    }

    /// Shorthand for [`Logger::error_err`].
    #[track_caller]
    pub fn err(&self, ctx: &Context, err: Option<&(dyn Error + 'static)>, args: &[Arg]) {
        self.log_err(ctx, Severity::ERROR, err, args);
    }

    /// Log an HTTP request at `ERROR` for server errors and `INFO` otherwise.
    ///
    /// An empty `msg` is replaced by [`HttpRequest::summary`].
    #[track_caller]
    pub fn http_request(&self, ctx: &Context, req: &HttpRequest, msg: &str, args: &[Arg]) {
        let severity = req.severity();
        let Some(location) = self.capture(ctx, severity) else {
            return;
        };

        let message = if msg.is_empty() {
            req.summary()
        } else {
            msg.to_string()
        };
        let mut attrs = parse_args(args);
        attrs.push(req.to_attr());
        let result = self.dispatch(ctx, severity, location, message, attrs);
        self.report(result);
    }

    /// Log `msg` as the first record of an operation.
    ///
    /// Returns a context that marks everything logged with it as part of the
    /// operation, and an [`OperationEnd`] that logs the last record.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_cloud_logger::{Context, Logger, Severity};
    ///
    /// let logger = Logger::builder().writer(std::io::sink()).build();
    /// let ctx = Context::background();
    ///
    /// let (op_ctx, end) = logger.start_operation(&ctx, Severity::NOTICE, "batch started", "batch-42", "worker");
    /// logger.info(&op_ctx, "processing", &[]);
    /// end.end("batch finished");
    /// ```
    #[track_caller]
    pub fn start_operation(
        &self,
        ctx: &Context,
        severity: Severity,
        msg: &str,
        id: &str,
        producer: &str,
    ) -> (Context, OperationEnd) {
        let operation = Operation::new(id, producer);
        self.log_phase(ctx, severity, msg, &operation, OperationPhase::First);

        let op_ctx = ctx.with_operation(operation.clone());
        let end = OperationEnd {
            logger: self.clone(),
            ctx: ctx.clone(),
            severity,
            operation,
        };
        (op_ctx, end)
    }

    #[track_caller]
    fn log_phase(
        &self,
        ctx: &Context,
        severity: Severity,
        msg: &str,
        operation: &Operation,
        phase: OperationPhase,
    ) {
        let Some(location) = self.capture(ctx, severity) else {
            return;
        };
        let attrs = vec![operation.to_attr(phase)];
        let result = self.dispatch(ctx, severity, location, msg.to_string(), attrs);
        self.report(result);
    }

    /// Entry point for the logging macros, which supply their own location.
    #[doc(hidden)]
    pub fn log_at(
        &self,
        ctx: &Context,
        severity: Severity,
        location: SourceLocation,
        args: fmt::Arguments<'_>,
    ) {
        if !self.enabled(ctx, severity) {
            return;
        }
        let result = self.dispatch(ctx, severity, location, args.to_string(), Vec::new());
        self.report(result);
    }

    /// The call site of the public method, if `severity` is enabled.
    #[track_caller]
    #[inline]
    fn capture(&self, ctx: &Context, severity: Severity) -> Option<SourceLocation> {
        if self.enabled(ctx, severity) {
            Some(SourceLocation::caller())
        } else {
            None
        }
    }

    fn dispatch(
        &self,
        ctx: &Context,
        severity: Severity,
        location: SourceLocation,
        message: String,
        attrs: Vec<Attr>,
    ) -> Result<()> {
        let mut record = Record::new(severity, message);
        record.add_attrs(attrs);
        record.add_attr(location.to_attr());
        self.handler.handle(ctx, record)
    }

    fn count(&self, result: &Result<()>) {
        if result.is_ok() {
            self.metrics.record_logged();
        } else {
            self.metrics.record_failed();
        }
    }

    /// Logging never fails the caller; failures go to metrics and stderr.
    fn report(&self, result: Result<()>) {
        self.count(&result);
        if let Err(e) = result {
            eprintln!("[LOGGER ERROR] Failed to write log record: {}", e);
        }
    }
}

macro_rules! severity_methods {
    ($($severity:ident => $plain:ident, $formatted:ident, $with_err:ident;)*) => {
        impl Logger {
            $(
                #[doc = concat!("Log at `", stringify!($severity), "`.")]
                #[track_caller]
                pub fn $plain(&self, ctx: &Context, msg: &str, args: &[Arg]) {
                    self.log(ctx, Severity::$severity, msg, args);
                }

                #[doc = concat!("Log a formatted message at `", stringify!($severity), "`.")]
                #[track_caller]
                pub fn $formatted(&self, ctx: &Context, args: fmt::Arguments<'_>) {
                    self.logf(ctx, Severity::$severity, args);
                }

                #[doc = concat!("Log an error at `", stringify!($severity), "`. `None` logs nothing.")]
                #[track_caller]
                pub fn $with_err(&self, ctx: &Context, err: Option<&(dyn Error + 'static)>, args: &[Arg]) {
                    self.log_err(ctx, Severity::$severity, err, args);
                }
            )*
        }
    };
}

severity_methods! {
    DEBUG => debug, debugf, debug_err;
    INFO => info, infof, info_err;
    NOTICE => notice, noticef, notice_err;
    WARNING => warning, warningf, warning_err;
    ERROR => error, errorf, error_err;
    CRITICAL => critical, criticalf, critical_err;
    ALERT => alert, alertf, alert_err;
    EMERGENCY => emergency, emergencyf, emergency_err;
}

impl Default for Logger {
    /// Stdout, `INFO`, JSON.
    fn default() -> Self {
        LoggerBuilder::new().build()
    }
}

/// Closes an operation opened by [`Logger::start_operation`].
#[must_use = "dropping an OperationEnd never logs the last record of the operation"]
#[derive(Debug)]
pub struct OperationEnd {
    logger: Logger,
    ctx: Context,
    severity: Severity,
    operation: Operation,
}

impl OperationEnd {
    pub fn operation(&self) -> &Operation {
        &self.operation
    }

    /// Log `msg` as the last record of the operation, using the context the
    /// operation was started from.
    #[track_caller]
    pub fn end(self, msg: &str) {
        self.logger.log_phase(
            &self.ctx,
            self.severity,
            msg,
            &self.operation,
            OperationPhase::Last,
        );
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use rust_cloud_logger::prelude::*;
///
/// let logger = Logger::builder()
///     .writer(std::io::sink())
///     .min_severity(Severity::DEBUG)
///     .text()
///     .labels([("service", "checkout")])
///     .trace("my-project")
///     .build();
/// ```
pub struct LoggerBuilder {
    writer: Option<SharedWriter>,
    min_severity: Severity,
    format: OutputFormat,
    colors: bool,
    options: Vec<HandlerOption>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            writer: None,
            min_severity: Severity::INFO,
            format: OutputFormat::Json,
            colors: false,
            options: Vec::new(),
        }
    }

    /// Set the output destination. Defaults to stdout.
    #[must_use = "builder methods return a new value"]
    pub fn writer<W: Write + Send + 'static>(mut self, writer: W) -> Self {
        self.writer = Some(SharedWriter::new(writer));
        self
    }

    /// Write to a destination already shared with other loggers.
    #[must_use = "builder methods return a new value"]
    pub fn shared_writer(mut self, writer: SharedWriter) -> Self {
        self.writer = Some(writer);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn stdout(mut self) -> Self {
        self.writer = Some(SharedWriter::stdout());
        self
    }

    /// Set the minimum severity
    #[must_use = "builder methods return a new value"]
    pub fn min_severity(mut self, severity: Severity) -> Self {
        self.min_severity = severity;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn json(self) -> Self {
        self.format(OutputFormat::Json)
    }

    #[must_use = "builder methods return a new value"]
    pub fn text(self) -> Self {
        self.format(OutputFormat::Text)
    }

    /// Color severities in text output
    #[must_use = "builder methods return a new value"]
    pub fn colors(mut self, colors: bool) -> Self {
        self.colors = colors;
        self
    }

    /// Default labels for every record
    #[must_use = "builder methods return a new value"]
    pub fn labels<I, K, V>(self, labels: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.option(HandlerOption::labels(labels))
    }

    /// Enable trace correlation for `project_id`
    #[must_use = "builder methods return a new value"]
    pub fn trace(self, project_id: impl Into<String>) -> Self {
        self.option(HandlerOption::trace(project_id))
    }

    /// Add a user hook, see [`HandlerOption::handle_fn`]
    #[must_use = "builder methods return a new value"]
    pub fn handle_fn<F>(self, f: F) -> Self
    where
        F: Fn(super::HandleFn) -> super::HandleFn + Send + Sync + 'static,
    {
        self.option(HandlerOption::handle_fn(f))
    }

    /// Add an optional stage. Stages added later run earlier.
    #[must_use = "builder methods return a new value"]
    pub fn option(mut self, option: HandlerOption) -> Self {
        self.options.push(option);
        self
    }

    /// Build the Logger
    pub fn build(self) -> Logger {
        let writer = self.writer.unwrap_or_else(SharedWriter::stdout);
        let sink = WriterHandler::new(writer, self.min_severity, self.format).with_colors(self.colors);
        Logger::from_handler(handlers::build_chain(Arc::new(sink), &self.options))
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LoggerBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerBuilder")
            .field("min_severity", &self.min_severity)
            .field("format", &self.format)
            .field("colors", &self.colors)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Logger {
    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}
