//! Severity/message field remap applied by the sink
//!
//! The sink produces its built-in fields under generic names (`time`,
//! `level`, `msg`). The remap renames them to the names Cloud Logging reads.

use super::keys;
use super::severity::Severity;
use super::value::{Attr, Value};

pub const TIME_KEY: &str = keys::TIME;
pub const LEVEL_KEY: &str = "level";
pub const MESSAGE_KEY: &str = "msg";

/// Rename `level` to `severity`, converting the numeric level to its name.
pub fn replace_level(mut attr: Attr) -> Attr {
    if attr.key == LEVEL_KEY {
        attr.key = keys::SEVERITY.to_string();
        let severity = match attr.value {
            Value::Int(level) => i32::try_from(level).map(Severity::new).unwrap_or_default(),
            _ => Severity::DEFAULT,
        };
        attr.value = Value::String(severity.to_str().to_string());
    }
    attr
}

/// Rename `msg` to `message`.
pub fn replace_message(mut attr: Attr) -> Attr {
    if attr.key == MESSAGE_KEY {
        attr.key = keys::MESSAGE.to_string();
    }
    attr
}

/// Remap one attribute. Only built-in attributes (no enclosing group) are renamed.
pub fn replace_attr(groups: &[String], attr: Attr) -> Attr {
    if !groups.is_empty() {
        return attr;
    }
    replace_message(replace_level(attr))
}
