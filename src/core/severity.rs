//! Severity definitions
//!
//! Severities follow the Cloud Logging `LogSeverity` enum. A severity is an
//! ordinal integer so that values outside the named set can still be compared
//! against a threshold; such values render as `DEFAULT`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Severity(i32);

impl Severity {
    /// The log entry has no assigned severity level.
    pub const DEFAULT: Severity = Severity(0);
    /// Debug or trace information.
    pub const DEBUG: Severity = Severity(100);
    /// Routine information, such as ongoing status or performance.
    pub const INFO: Severity = Severity(200);
    /// Normal but significant events, such as start up, shut down, or a configuration change.
    pub const NOTICE: Severity = Severity(300);
    /// Warning events that might cause problems.
    pub const WARNING: Severity = Severity(400);
    /// Error events that are likely to cause problems.
    pub const ERROR: Severity = Severity(500);
    /// Critical events that cause more severe problems or outages.
    pub const CRITICAL: Severity = Severity(600);
    /// A person must take an action immediately.
    pub const ALERT: Severity = Severity(700);
    /// One or more systems are unusable.
    pub const EMERGENCY: Severity = Severity(800);

    /// All named severities in ascending order.
    pub const ALL: [Severity; 9] = [
        Severity::DEFAULT,
        Severity::DEBUG,
        Severity::INFO,
        Severity::NOTICE,
        Severity::WARNING,
        Severity::ERROR,
        Severity::CRITICAL,
        Severity::ALERT,
        Severity::EMERGENCY,
    ];

    pub const fn new(value: i32) -> Self {
        Severity(value)
    }

    pub const fn value(self) -> i32 {
        self.0
    }

    /// Name of the severity as Cloud Logging expects it.
    ///
    /// Unrecognized values map to `DEFAULT`.
    pub fn to_str(self) -> &'static str {
        match self {
            Severity::DEBUG => "DEBUG",
            Severity::INFO => "INFO",
            Severity::NOTICE => "NOTICE",
            Severity::WARNING => "WARNING",
            Severity::ERROR => "ERROR",
            Severity::CRITICAL => "CRITICAL",
            Severity::ALERT => "ALERT",
            Severity::EMERGENCY => "EMERGENCY",
            _ => "DEFAULT",
        }
    }

    /// Whether this is one of the named severities.
    pub fn is_named(self) -> bool {
        Severity::ALL.contains(&self)
    }

    #[cfg(feature = "console")]
    pub fn color_code(self) -> colored::Color {
        use colored::Color::*;
        match self {
            Severity::DEBUG => Blue,
            Severity::INFO => Green,
            Severity::NOTICE => Cyan,
            Severity::WARNING => Yellow,
            Severity::ERROR => Red,
            Severity::CRITICAL | Severity::ALERT | Severity::EMERGENCY => BrightRed,
            _ => BrightBlack,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl From<i32> for Severity {
    fn from(value: i32) -> Self {
        Severity(value)
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_uppercase().as_str() {
            "DEFAULT" => Ok(Severity::DEFAULT),
            "DEBUG" => Ok(Severity::DEBUG),
            "INFO" => Ok(Severity::INFO),
            "NOTICE" => Ok(Severity::NOTICE),
            "WARN" | "WARNING" => Ok(Severity::WARNING),
            "ERROR" => Ok(Severity::ERROR),
            "CRITICAL" => Ok(Severity::CRITICAL),
            "ALERT" => Ok(Severity::ALERT),
            "EMERGENCY" => Ok(Severity::EMERGENCY),
            _ => trimmed
                .parse::<i32>()
                .map(Severity)
                .map_err(|_| format!("Invalid severity: '{}'", s)),
        }
    }
}

impl Serialize for Severity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.is_named() {
            serializer.serialize_str(self.to_str())
        } else {
            serializer.serialize_i32(self.0)
        }
    }
}

impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Name(String),
            Value(i32),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Name(name) => name.parse().map_err(serde::de::Error::custom),
            Repr::Value(value) => Ok(Severity(value)),
        }
    }
}
