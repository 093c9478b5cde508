//! Output format for rendered records
//!
//! Provides the two line formats the writer sink can produce:
//! - Json: one JSON object per line, the format Cloud Logging agents parse (default)
//! - Text: `key=value` pairs for reading on a terminal

use super::error::Result;
use super::keys;
use super::severity::Severity;
use super::value::{serialize_attrs, Attr, Value};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Output format for log records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JSON format for machine processing (default)
    ///
    /// Example: `{"time":"2025-01-08T10:30:45.123Z","severity":"INFO","message":"Request processed"}`
    #[default]
    Json,

    /// Logfmt-style text
    ///
    /// Example: `time=2025-01-08T10:30:45.123Z severity=INFO message="Request processed"`
    Text,
}

/// The pieces of one output line.
#[derive(Debug, Clone, Copy)]
pub struct Line<'a> {
    pub severity: Severity,
    /// `time`, `severity` and `message`, already remapped.
    pub builtins: &'a [Attr],
    /// Logger and record attributes, already nested in their group scopes.
    pub attrs: &'a [Attr],
}

impl Serialize for Line<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        serialize_attrs(&mut map, self.builtins)?;
        serialize_attrs(&mut map, self.attrs)?;
        map.end()
    }
}

impl OutputFormat {
    /// Render a line without the trailing newline.
    pub fn format(&self, line: &Line<'_>, colors: bool) -> Result<String> {
        match self {
            OutputFormat::Json => Ok(serde_json::to_string(line)?),
            OutputFormat::Text => Ok(format_text(line, colors)),
        }
    }
}

fn format_text(line: &Line<'_>, colors: bool) -> String {
    let mut out = String::with_capacity(128);
    let severity = colors.then_some(line.severity);
    write_text(&mut out, "", line.builtins, severity);
    write_text(&mut out, "", line.attrs, None);
    out
}

fn write_text(out: &mut String, prefix: &str, attrs: &[Attr], severity: Option<Severity>) {
    for attr in attrs {
        if attr.value.is_empty_group() {
            continue;
        }

        let key = if prefix.is_empty() {
            attr.key.clone()
        } else if attr.key.is_empty() {
            prefix.to_string()
        } else {
            format!("{}.{}", prefix, attr.key)
        };

        if let Value::Group(inner) = &attr.value {
            write_text(out, &key, inner, None);
            continue;
        }

        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(&quote_if_needed(&key));
        out.push('=');

        let value = quote_if_needed(&attr.value.to_string());
        match severity {
            Some(severity) if prefix.is_empty() && attr.key == keys::SEVERITY => {
                push_colored(out, &value, severity);
            }
            _ => out.push_str(&value),
        }
    }
}

#[cfg(feature = "console")]
fn push_colored(out: &mut String, value: &str, severity: Severity) {
    use colored::Colorize;
    let _ = write!(out, "{}", value.color(severity.color_code()));
}

#[cfg(not(feature = "console"))]
fn push_colored(out: &mut String, value: &str, _severity: Severity) {
    let _ = write!(out, "{}", value);
}

fn needs_quoting(s: &str) -> bool {
    s.is_empty()
        || s
            .chars()
            .any(|c| c == ' ' || c == '=' || c == '"' || c.is_control())
}

/// Quote and escape a text value when it would otherwise be ambiguous.
fn quote_if_needed(s: &str) -> String {
    if needs_quoting(s) {
        format!("{:?}", s)
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builtins() -> Vec<Attr> {
        vec![
            Attr::new(keys::TIME, "2025-01-08T10:30:45.123Z"),
            Attr::new(keys::SEVERITY, "INFO"),
            Attr::new(keys::MESSAGE, "Request processed"),
        ]
    }

    #[test]
    fn test_json_format() {
        let builtins = builtins();
        let attrs = vec![
            Attr::new("user_id", 123i64),
            Attr::group("req", vec![Attr::new("path", "/"), Attr::group("empty", vec![])]),
        ];
        let line = Line {
            severity: Severity::INFO,
            builtins: &builtins,
            attrs: &attrs,
        };

        let result = OutputFormat::Json.format(&line, false).unwrap();
        assert_eq!(
            result,
            r#"{"time":"2025-01-08T10:30:45.123Z","severity":"INFO","message":"Request processed","user_id":123,"req":{"path":"/"}}"#
        );
    }

    #[test]
    fn test_text_format() {
        let builtins = builtins();
        let attrs = vec![
            Attr::new("query", "id=1"),
            Attr::new("empty", ""),
            Attr::group("req", vec![Attr::new("path", "/a b")]),
        ];
        let line = Line {
            severity: Severity::INFO,
            builtins: &builtins,
            attrs: &attrs,
        };

        let result = OutputFormat::Text.format(&line, false).unwrap();
        assert_eq!(
            result,
            r#"time=2025-01-08T10:30:45.123Z severity=INFO message="Request processed" query="id=1" empty="" req.path="/a b""#
        );
    }

    #[test]
    fn test_text_escapes_control_characters() {
        assert_eq!(quote_if_needed("a\nb"), r#""a\nb""#);
        assert_eq!(quote_if_needed(r#"say "hi""#), r#""say \"hi\"""#);
        assert_eq!(quote_if_needed("plain"), "plain");
    }

    #[test]
    fn test_output_format_default_and_serde() {
        assert_eq!(OutputFormat::default(), OutputFormat::Json);
        let format: OutputFormat = serde_json::from_str(r#""text""#).unwrap();
        assert_eq!(format, OutputFormat::Text);
        assert_eq!(serde_json::to_string(&OutputFormat::Json).unwrap(), r#""json""#);
    }
}
