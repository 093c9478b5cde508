//! Process-wide default logger
//!
//! The default starts as a stdout, `INFO`, JSON logger. Readers load the
//! current logger without locking; [`set_default`] and [`set_options`]
//! replace it atomically, so a reader sees either the old or the new logger.
//!
//! The free functions mirror the [`Logger`] methods and log through the
//! default.

use crate::core::{
    Arg, Context, HttpRequest, Logger, OperationEnd, Severity,
};
use crate::handlers::HandlerOption;
use arc_swap::ArcSwap;
use std::error::Error;
use std::fmt;
use std::sync::{Arc, OnceLock};

static DEFAULT: OnceLock<ArcSwap<Logger>> = OnceLock::new();

fn slot() -> &'static ArcSwap<Logger> {
    DEFAULT.get_or_init(|| ArcSwap::from_pointee(Logger::default()))
}

/// The current default logger.
pub fn default_logger() -> Arc<Logger> {
    slot().load_full()
}

/// Make `logger` the default.
pub fn set_default(logger: Logger) {
    slot().store(Arc::new(logger));
}

/// Wrap the current default's chain with `options` and make that the default.
pub fn set_options(options: &[HandlerOption]) {
    slot().rcu(|current| Arc::new(current.with_options(options)));
}

macro_rules! default_severity_fns {
    ($($plain:ident, $formatted:ident, $with_err:ident;)*) => {
        $(
            #[track_caller]
            pub fn $plain(ctx: &Context, msg: &str, args: &[Arg]) {
                slot().load().$plain(ctx, msg, args);
            }

            #[track_caller]
            pub fn $formatted(ctx: &Context, args: fmt::Arguments<'_>) {
                slot().load().$formatted(ctx, args);
            }

            #[track_caller]
            pub fn $with_err(ctx: &Context, err: Option<&(dyn Error + 'static)>, args: &[Arg]) {
                slot().load().$with_err(ctx, err, args);
            }
        )*
    };
}

default_severity_fns! {
    debug, debugf, debug_err;
    info, infof, info_err;
    notice, noticef, notice_err;
    warning, warningf, warning_err;
    error, errorf, error_err;
    critical, criticalf, critical_err;
    alert, alertf, alert_err;
    emergency, emergencyf, emergency_err;
}

#[track_caller]
pub fn log(ctx: &Context, severity: Severity, msg: &str, args: &[Arg]) {
    slot().load().log(ctx, severity, msg, args);
}

/// Shorthand for [`error_err`].
#[track_caller]
pub fn err(ctx: &Context, err: Option<&(dyn Error + 'static)>, args: &[Arg]) {
    slot().load().err(ctx, err, args);
}

pub fn enabled(ctx: &Context, severity: Severity) -> bool {
    slot().load().enabled(ctx, severity)
}

/// A logger derived from the current default.
pub fn with(args: &[Arg]) -> Logger {
    slot().load().with(args)
}

pub fn with_insert_id(id: &str) -> Logger {
    slot().load().with_insert_id(id)
}

/// Log an HTTP request at `ERROR` for server errors and `INFO` otherwise.
#[track_caller]
pub fn http_req(ctx: &Context, req: &HttpRequest, msg: &str, args: &[Arg]) {
    slot().load().http_request(ctx, req, msg, args);
}

#[track_caller]
pub fn start_operation(
    ctx: &Context,
    severity: Severity,
    msg: &str,
    id: &str,
    producer: &str,
) -> (Context, OperationEnd) {
    default_logger().start_operation(ctx, severity, msg, id, producer)
}
