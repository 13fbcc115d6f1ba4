//! Brewfile literal serialization.
//!
//! A Brewfile is Ruby source, so every option value ends up as a Ruby
//! literal. [`Value`] is the closed set of shapes the compiler knows how to
//! write; anything outside it has to be rejected before it reaches a line.

use crate::error::{BrewfileError, Result};
use indexmap::IndexMap;

/// A value that can appear on the right-hand side of a Brewfile option.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer(i64),
    Float(f64),
    Boolean(bool),
    String(String),
    /// Keyed options, written in insertion order.
    Mapping(IndexMap<String, Value>),
    Sequence(Vec<Value>),
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Sequence(items.into_iter().map(Into::into).collect())
    }
}

impl TryFrom<serde_json::Value> for Value {
    type Error = BrewfileError;

    /// Convert loosely-typed data (e.g. hand-written JSON) into a [`Value`].
    ///
    /// `null` has no Brewfile spelling and is rejected, as are numbers that
    /// fit neither `i64` nor `f64`.
    fn try_from(json: serde_json::Value) -> Result<Self> {
        match json {
            serde_json::Value::Bool(b) => Ok(Value::Boolean(b)),
            serde_json::Value::String(s) => Ok(Value::String(s)),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Value::Integer(i))
                } else if let Some(f) = n.as_f64() {
                    Ok(Value::Float(f))
                } else {
                    Err(unsupported(&n))
                }
            }
            serde_json::Value::Array(items) => items
                .into_iter()
                .map(Value::try_from)
                .collect::<Result<Vec<_>>>()
                .map(Value::Sequence),
            serde_json::Value::Object(map) => map
                .into_iter()
                .map(|(k, v)| Ok((k, Value::try_from(v)?)))
                .collect::<Result<IndexMap<_, _>>>()
                .map(Value::Mapping),
            other @ serde_json::Value::Null => Err(unsupported(&other)),
        }
    }
}

fn unsupported(value: &impl std::fmt::Debug) -> BrewfileError {
    BrewfileError::UnsupportedValueKind {
        value: format!("{value:?}"),
    }
}

/// Write a value as a Brewfile (Ruby) literal.
pub fn serialize(value: &Value) -> Result<String> {
    match value {
        Value::Integer(i) => Ok(i.to_string()),
        Value::Float(f) if f.is_finite() => Ok(format!("{f:?}")),
        Value::Float(_) => Err(unsupported(value)),
        Value::Boolean(b) => Ok(b.to_string()),
        Value::String(s) => Ok(quote(s)),
        Value::Mapping(map) if map.is_empty() => Ok("{}".to_string()),
        Value::Mapping(map) => Ok(format!("{{ {} }}", serialize_options(map)?)),
        Value::Sequence(items) => {
            let items = items.iter().map(serialize).collect::<Result<Vec<_>>>()?;
            Ok(format!("[{}]", items.join(", ")))
        }
    }
}

/// Write keyed options as `key: value, key: value` without surrounding braces.
pub fn serialize_options(options: &IndexMap<String, Value>) -> Result<String> {
    let pairs = options
        .iter()
        .map(|(key, value)| Ok(format!("{key}: {}", serialize(value)?)))
        .collect::<Result<Vec<_>>>()?;
    Ok(pairs.join(", "))
}

/// Double-quote a string as a Ruby literal.
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '#' if chars.peek() == Some(&'{') => out.push_str("\\#"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
