//! Logging macros for ergonomic log message formatting.
//!
//! The severity macros format their message like `format!` and record the
//! enclosing function in `sourceLocation`, which the plain methods cannot.
//!
//! # Examples
//!
//! ```
//! use rust_cloud_logger::prelude::*;
//! use rust_cloud_logger::{args, info};
//!
//! let logger = Logger::builder().writer(std::io::sink()).build();
//! let ctx = Context::background();
//!
//! // Basic logging
//! info!(logger, &ctx, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, &ctx, "Server listening on port {}", port);
//!
//! // Key/value attributes through the plain methods
//! logger.info(&ctx, "User logged in", args!["user_id", 42i32, "action", "login"]);
//! ```

/// Build a key/value argument list.
///
/// Each element is converted with `Arg::from`; strings in key position pair
/// with the following element.
///
/// ```
/// use rust_cloud_logger::{args, parse_args, Attr};
///
/// let attrs = parse_args(args!["user", "alice", Attr::new("count", 5i32)]);
/// assert_eq!(attrs, vec![Attr::new("user", "alice"), Attr::new("count", 5i32)]);
/// ```
#[macro_export]
macro_rules! args {
    () => {
        &[] as &[$crate::Arg]
    };
    ($($arg:expr),+ $(,)?) => {
        &[$($crate::Arg::from($arg)),+]
    };
}

/// Path of the enclosing function, e.g. `my_crate::handlers::checkout`.
#[doc(hidden)]
#[macro_export]
macro_rules! __function_name {
    () => {{
        fn f() {}
        fn type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        let name = type_name_of(f);
        let name = name.strip_suffix("::f").unwrap_or(name);
        name.trim_end_matches("::{{closure}}")
    }};
}

/// The `SourceLocation` of the macro call, including the enclosing function.
#[macro_export]
macro_rules! source_location {
    () => {
        $crate::SourceLocation::new(file!(), line!(), Some($crate::__function_name!()))
    };
}

/// Log a formatted message at the given severity.
///
/// # Examples
///
/// ```
/// # use rust_cloud_logger::prelude::*;
/// # let logger = Logger::builder().writer(std::io::sink()).build();
/// # let ctx = Context::background();
/// use rust_cloud_logger::log;
/// log!(logger, &ctx, Severity::INFO, "Simple message");
/// log!(logger, &ctx, Severity::ERROR, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $ctx:expr, $severity:expr, $($arg:tt)+) => {
        $logger.log_at($ctx, $severity, $crate::source_location!(), format_args!($($arg)+))
    };
}

/// Log a debug-level message.
///
/// ```
/// # use rust_cloud_logger::prelude::*;
/// # let logger = Logger::builder().writer(std::io::sink()).min_severity(Severity::DEBUG).build();
/// # let ctx = Context::background();
/// use rust_cloud_logger::debug;
/// debug!(logger, &ctx, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $ctx:expr, $($arg:tt)+) => {
        $crate::log!($logger, $ctx, $crate::Severity::DEBUG, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $ctx:expr, $($arg:tt)+) => {
        $crate::log!($logger, $ctx, $crate::Severity::INFO, $($arg)+)
    };
}

/// Log a notice-level message.
#[macro_export]
macro_rules! notice {
    ($logger:expr, $ctx:expr, $($arg:tt)+) => {
        $crate::log!($logger, $ctx, $crate::Severity::NOTICE, $($arg)+)
    };
}

/// Log a warning-level message.
///
/// ```
/// # use rust_cloud_logger::prelude::*;
/// # let logger = Logger::builder().writer(std::io::sink()).build();
/// # let ctx = Context::background();
/// use rust_cloud_logger::warning;
/// warning!(logger, &ctx, "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warning {
    ($logger:expr, $ctx:expr, $($arg:tt)+) => {
        $crate::log!($logger, $ctx, $crate::Severity::WARNING, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $ctx:expr, $($arg:tt)+) => {
        $crate::log!($logger, $ctx, $crate::Severity::ERROR, $($arg)+)
    };
}

/// Log a critical-level message.
#[macro_export]
macro_rules! critical {
    ($logger:expr, $ctx:expr, $($arg:tt)+) => {
        $crate::log!($logger, $ctx, $crate::Severity::CRITICAL, $($arg)+)
    };
}

/// Log an alert-level message.
#[macro_export]
macro_rules! alert {
    ($logger:expr, $ctx:expr, $($arg:tt)+) => {
        $crate::log!($logger, $ctx, $crate::Severity::ALERT, $($arg)+)
    };
}

/// Log an emergency-level message.
#[macro_export]
macro_rules! emergency {
    ($logger:expr, $ctx:expr, $($arg:tt)+) => {
        $crate::log!($logger, $ctx, $crate::Severity::EMERGENCY, $($arg)+)
    };
}
