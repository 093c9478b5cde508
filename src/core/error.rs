//! Error types for the logger system

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Severity string that names no known severity
    #[error("Invalid severity: '{0}'")]
    InvalidSeverity(String),
}

impl LoggerError {
    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = LoggerError::config("LoggerConfig", "unknown format");
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));

        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = LoggerError::from(json_err);
        assert!(matches!(err, LoggerError::JsonError(_)));
    }

    #[test]
    fn test_error_display() {
        let err = LoggerError::config("LoggerConfig", "unknown format");
        assert_eq!(
            err.to_string(),
            "Invalid configuration for LoggerConfig: unknown format"
        );

        let err = LoggerError::InvalidSeverity("verbose".to_string());
        assert_eq!(err.to_string(), "Invalid severity: 'verbose'");
    }

    #[test]
    fn test_io_operation_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err = LoggerError::io_operation("writing log record", "sink rejected write", io_err);

        assert!(matches!(err, LoggerError::IoOperation { .. }));
        assert!(err.to_string().contains("writing log record"));
        assert!(err.to_string().contains("sink rejected write"));
    }
}
