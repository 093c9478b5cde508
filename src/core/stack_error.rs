//! Errors carrying a captured stack trace
//!
//! Error-logging calls look for a [`StackError`] anywhere in the error's
//! `source()` chain. When one is found the record gets a `stack_trace` field
//! that Cloud Error Reporting can parse.

use std::backtrace::Backtrace;
use std::error::Error;
use std::fmt;

type BoxError = Box<dyn Error + Send + Sync + 'static>;

enum Inner {
    Message(String),
    Wrapped(BoxError),
}

/// An error with the stack captured where it was created.
pub struct StackError {
    inner: Inner,
    /// `None` when the wrapped error already carries a stack
    stack: Option<Backtrace>,
}

impl StackError {
    /// Create an error from a message, capturing the current stack.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            inner: Inner::Message(message.into()),
            stack: Some(Backtrace::force_capture()),
        }
    }

    /// Wrap an existing error, capturing the current stack.
    ///
    /// A `StackError` is returned as is. When a stack is already present
    /// further down the `source()` chain, no new stack is captured and the
    /// inner one keeps being reported.
    pub fn wrap(err: impl Into<BoxError>) -> Self {
        let err = match err.into().downcast::<StackError>() {
            Ok(stack_err) => return *stack_err,
            Err(err) => err,
        };
        let stack = if has_stack(err.as_ref()) {
            None
        } else {
            Some(Backtrace::force_capture())
        };
        Self {
            inner: Inner::Wrapped(err),
            stack,
        }
    }

    /// The stack captured by this error, if it captured one.
    pub fn stack(&self) -> Option<&Backtrace> {
        self.stack.as_ref()
    }

    /// Error text, a blank line, then the captured stack.
    ///
    /// For a wrapper without its own stack this is the trace of the inner
    /// error that carries one.
    pub fn stack_trace(&self) -> String {
        match &self.stack {
            Some(stack) => format!("{}\n\n{}", self, stack),
            None => self
                .source()
                .and_then(find_stack)
                .map_or_else(|| self.to_string(), StackError::stack_trace),
        }
    }
}

impl fmt::Display for StackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner {
            Inner::Message(message) => f.write_str(message),
            Inner::Wrapped(err) => write!(f, "{}", err),
        }
    }
}

impl fmt::Debug for StackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.stack {
            Some(stack) => write!(f, "{}\n{}", self, stack),
            None => write!(f, "{}", self),
        }
    }
}

impl Error for StackError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.inner {
            Inner::Message(_) => None,
            Inner::Wrapped(err) => Some(err.as_ref()),
        }
    }
}

/// Find the first [`StackError`] with a captured stack in the `source()`
/// chain, starting at `err`.
pub fn find_stack<'a>(err: &'a (dyn Error + 'static)) -> Option<&'a StackError> {
    let mut current = Some(err);
    while let Some(e) = current {
        if let Some(stack_err) = e.downcast_ref::<StackError>() {
            if stack_err.stack.is_some() {
                return Some(stack_err);
            }
        }
        current = e.source();
    }
    None
}

pub fn has_stack(err: &(dyn Error + 'static)) -> bool {
    find_stack(err).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Outer(StackError);

    impl fmt::Display for Outer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "outer: {}", self.0)
        }
    }

    impl Error for Outer {
        fn source(&self) -> Option<&(dyn Error + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn test_new() {
        let err = StackError::new("boom");
        assert_eq!(err.to_string(), "boom");
        assert!(err.source().is_none());
        assert!(err.stack_trace().starts_with("boom\n\n"));
        assert!(err.stack_trace().len() > "boom\n\n".len());
    }

    #[test]
    fn test_wrap() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing file");
        let err = StackError::wrap(io);
        assert_eq!(err.to_string(), "missing file");
        assert!(err.source().is_some());
    }

    #[test]
    fn test_wrap_keeps_existing_stack() {
        let inner = StackError::new("inner");
        let inner_trace = inner.stack_trace();

        let rewrapped = StackError::wrap(inner);
        assert!(rewrapped.source().is_none());
        assert_eq!(rewrapped.stack_trace(), inner_trace);

        let outer = StackError::wrap(Outer(StackError::new("deep")));
        assert!(outer.stack().is_none());
        assert_eq!(outer.to_string(), "outer: deep");
        let found = find_stack(&outer).map(|e| e.to_string());
        assert_eq!(found.as_deref(), Some("deep"));
        assert!(outer.stack_trace().starts_with("deep\n\n"));
    }

    #[test]
    fn test_find_in_chain() {
        let outer = Outer(StackError::new("inner"));
        let found = find_stack(&outer).map(|e| e.to_string());
        assert_eq!(found.as_deref(), Some("inner"));

        let plain = std::io::Error::new(std::io::ErrorKind::Other, "plain");
        assert!(!has_stack(&plain));
    }
}
