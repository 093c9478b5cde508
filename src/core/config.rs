//! Serializable logger configuration
//!
//! ```
//! use rust_cloud_logger::{LoggerConfig, Severity};
//!
//! let config = LoggerConfig::from_json(
//!     r#"{"min_severity": "debug", "format": "text", "labels": {"service": "api"}}"#,
//! ).unwrap();
//! assert_eq!(config.min_severity, Severity::DEBUG);
//!
//! let logger = config.into_builder().writer(std::io::sink()).build();
//! # let _ = logger;
//! ```

use super::context::Labels;
use super::error::{LoggerError, Result};
use super::logger::LoggerBuilder;
use super::output_format::OutputFormat;
use super::severity::Severity;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Name (`"info"`) or number (`200`)
    pub min_severity: Severity,
    pub format: OutputFormat,
    pub colors: bool,
    /// Default labels
    pub labels: Labels,
    /// Enables trace correlation when set
    pub trace_project_id: Option<String>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            min_severity: Severity::INFO,
            format: OutputFormat::Json,
            colors: false,
            labels: Labels::new(),
            trace_project_id: None,
        }
    }
}

impl LoggerConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: LoggerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the threshold from a severity name such as `"warning"`.
    pub fn set_min_severity(&mut self, name: &str) -> Result<()> {
        self.min_severity = name
            .parse()
            .map_err(|_| LoggerError::InvalidSeverity(name.to_string()))?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if matches!(&self.trace_project_id, Some(id) if id.trim().is_empty()) {
            return Err(LoggerError::config(
                "trace_project_id",
                "project id must not be empty",
            ));
        }
        if self.labels.keys().any(|k| k.is_empty()) {
            return Err(LoggerError::config("labels", "label keys must not be empty"));
        }
        Ok(())
    }

    /// A builder preloaded with this configuration. The writer defaults to stdout.
    pub fn into_builder(self) -> LoggerBuilder {
        let mut builder = LoggerBuilder::new()
            .min_severity(self.min_severity)
            .format(self.format)
            .colors(self.colors);
        if !self.labels.is_empty() {
            builder = builder.labels(self.labels);
        }
        if let Some(project_id) = self.trace_project_id {
            builder = builder.trace(project_id);
        }
        builder
    }
}
