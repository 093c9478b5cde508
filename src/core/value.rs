//! Attribute values for structured records
//!
//! This module provides:
//! - `Value`: a field value, possibly a nested group of attributes
//! - `Attr`: a key/value pair attached to a record
//! - `Arg`: one slot of a flat key/value argument list, see [`parse_args`]

use chrono::{DateTime, SecondsFormat, Utc};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::borrow::Cow;
use std::fmt;

/// Key used when an argument list cannot be paired into key/value attributes.
pub const BAD_KEY: &str = "!BADKEY";

/// Value type for structured logging fields
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Int(i64),
    Uint(u64),
    Float(f64),
    Bool(bool),
    Null,
    /// Named sub-object. Empty groups are omitted from output.
    Group(Vec<Attr>),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// True for a group with no attributes, recursively.
    pub fn is_empty_group(&self) -> bool {
        match self {
            Value::Group(attrs) => attrs.iter().all(|a| a.value.is_empty_group()),
            _ => false,
        }
    }

    /// Convert to serde_json::Value
    ///
    /// Duplicate keys inside groups collapse to the last one here; rendering
    /// through `Serialize` keeps them.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        match self {
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Int(i) => serde_json::Value::Number((*i).into()),
            Value::Uint(u) => serde_json::Value::Number((*u).into()),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Null => serde_json::Value::Null,
            Value::Group(attrs) => {
                let mut map = serde_json::Map::new();
                collect_json(&mut map, attrs);
                serde_json::Value::Object(map)
            }
        }
    }
}

fn collect_json(map: &mut serde_json::Map<String, serde_json::Value>, attrs: &[Attr]) {
    for attr in attrs {
        if attr.value.is_empty_group() {
            continue;
        }
        match (&attr.value, attr.key.is_empty()) {
            (Value::Group(inner), true) => collect_json(map, inner),
            (value, _) => {
                map.insert(attr.key.clone(), value.to_json_value());
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{}", s),
            Value::Int(i) => write!(f, "{}", i),
            Value::Uint(u) => write!(f, "{}", u),
            Value::Float(fl) => write!(f, "{}", fl),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Null => write!(f, "null"),
            Value::Group(attrs) => {
                write!(f, "[")?;
                for (i, attr) in attrs.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}={}", attr.key, attr.value)?;
                }
                write!(f, "]")
            }
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::String(s) => serializer.serialize_str(s),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Uint(u) => serializer.serialize_u64(*u),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Null => serializer.serialize_unit(),
            Value::Group(attrs) => {
                let mut map = serializer.serialize_map(None)?;
                serialize_attrs(&mut map, attrs)?;
                map.end()
            }
        }
    }
}

/// Write attributes into a map in insertion order.
///
/// Duplicate keys are written as they come. Empty groups are skipped and
/// groups with an empty key are inlined into the enclosing map.
pub(crate) fn serialize_attrs<M: SerializeMap>(map: &mut M, attrs: &[Attr]) -> Result<(), M::Error> {
    for attr in attrs {
        if attr.value.is_empty_group() {
            continue;
        }
        match (&attr.value, attr.key.is_empty()) {
            (Value::Group(inner), true) => serialize_attrs(map, inner)?,
            (value, _) => map.serialize_entry(&attr.key, value)?,
        }
    }
    Ok(())
}

macro_rules! impl_value_from {
    ($($ty:ty => $variant:ident as $cast:ty),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v as $cast)
                }
            }

            impl From<$ty> for Arg {
                fn from(v: $ty) -> Self {
                    Arg::Value(Value::from(v))
                }
            }
        )*
    };
}

impl_value_from! {
    i8 => Int as i64,
    i16 => Int as i64,
    i32 => Int as i64,
    i64 => Int as i64,
    isize => Int as i64,
    u8 => Uint as u64,
    u16 => Uint as u64,
    u32 => Uint as u64,
    u64 => Uint as u64,
    usize => Uint as u64,
    f32 => Float as f64,
    f64 => Float as f64,
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::String(s.clone())
    }
}

impl From<Cow<'_, str>> for Value {
    fn from(s: Cow<'_, str>) -> Self {
        Value::String(s.into_owned())
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(t: DateTime<Utc>) -> Self {
        Value::String(t.to_rfc3339_opts(SecondsFormat::Nanos, true))
    }
}

impl From<Vec<Attr>> for Value {
    fn from(attrs: Vec<Attr>) -> Self {
        Value::Group(attrs)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

/// A key/value pair carried by a record
#[derive(Debug, Clone, PartialEq)]
pub struct Attr {
    pub key: String,
    pub value: Value,
}

impl Attr {
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// A named group of attributes.
    pub fn group(key: impl Into<String>, attrs: Vec<Attr>) -> Self {
        Self {
            key: key.into(),
            value: Value::Group(attrs),
        }
    }
}

/// One slot in a flat key/value argument list.
///
/// Build lists with the [`args!`](crate::args) macro.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    /// A complete attribute; consumes one slot.
    Attr(Attr),
    /// A key (when it is a string in key position) or a value.
    Value(Value),
}

impl From<Attr> for Arg {
    fn from(attr: Attr) -> Self {
        Arg::Attr(attr)
    }
}

impl From<Value> for Arg {
    fn from(value: Value) -> Self {
        Arg::Value(value)
    }
}

impl From<bool> for Arg {
    fn from(b: bool) -> Self {
        Arg::Value(Value::Bool(b))
    }
}

impl From<String> for Arg {
    fn from(s: String) -> Self {
        Arg::Value(Value::String(s))
    }
}

impl From<&str> for Arg {
    fn from(s: &str) -> Self {
        Arg::Value(Value::from(s))
    }
}

impl From<&String> for Arg {
    fn from(s: &String) -> Self {
        Arg::Value(Value::from(s))
    }
}

impl From<DateTime<Utc>> for Arg {
    fn from(t: DateTime<Utc>) -> Self {
        Arg::Value(Value::from(t))
    }
}

impl<T: Into<Value>> From<Option<T>> for Arg {
    fn from(v: Option<T>) -> Self {
        Arg::Value(Value::from(v))
    }
}

/// Pair a flat argument list into attributes.
///
/// A string in key position takes the following slot as its value. A
/// trailing string with nothing after it, or a non-string value in key
/// position, is recorded under [`BAD_KEY`] and consumes a single slot.
pub fn parse_args(args: &[Arg]) -> Vec<Attr> {
    let mut attrs = Vec::with_capacity(args.len() / 2 + 1);
    let mut rest = args;

    while let Some((first, tail)) = rest.split_first() {
        match first {
            Arg::Attr(attr) => {
                attrs.push(attr.clone());
                rest = tail;
            }
            Arg::Value(Value::String(key)) => match tail.split_first() {
                Some((value, tail)) => {
                    let value = match value {
                        Arg::Value(v) => v.clone(),
                        Arg::Attr(a) => Value::Group(vec![a.clone()]),
                    };
                    attrs.push(Attr {
                        key: key.clone(),
                        value,
                    });
                    rest = tail;
                }
                None => {
                    attrs.push(Attr::new(BAD_KEY, key.as_str()));
                    rest = tail;
                }
            },
            Arg::Value(other) => {
                attrs.push(Attr {
                    key: BAD_KEY.to_string(),
                    value: other.clone(),
                });
                rest = tail;
            }
        }
    }

    attrs
}
