//! Brewfile entry types.
//!
//! Each entry renders to at most one Brewfile line of the form
//! `<keyword> "<positional>", ..., key: value, key: value`. Options are
//! written in field-declaration order so regenerated Brewfiles diff cleanly.

pub mod brew;
pub mod cask;
pub mod cask_args;
pub mod tap;

pub use brew::*;
pub use cask::*;
pub use cask_args::*;
pub use tap::*;

use crate::error::{BrewfileError, Result};
use crate::value::{Value, quote, serialize};
use schemars::JsonSchema;
use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use std::fmt;
use std::marker::PhantomData;

/// Anything that renders to a single Brewfile line.
pub trait Entry {
    /// Render the line, or `None` when the entry has nothing to say.
    fn to_line(&self) -> Result<Option<String>>;
}

/// A Mac App Store app, installed through `mas`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MasApp {
    pub name: String,
    pub id: u64,
}

impl Entry for MasApp {
    fn to_line(&self) -> Result<Option<String>> {
        let id = i64::try_from(self.id)
            .ok()
            .filter(|id| *id > 0)
            .ok_or_else(|| BrewfileError::InvalidMasId {
                name: self.name.clone(),
            })?;
        let mut line = Line::new("mas");
        line.positional(&self.name);
        line.option("id", Some(Value::Integer(id)))?;
        Ok(Some(line.finish()))
    }
}

/// A Docker image wrapped as a command by `whalebrew`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Whalebrew(pub String);

impl Entry for Whalebrew {
    fn to_line(&self) -> Result<Option<String>> {
        let mut line = Line::new("whalebrew");
        line.positional(&self.0);
        Ok(Some(line.finish()))
    }
}

/// Incremental builder for one Brewfile line.
#[derive(Debug)]
pub(crate) struct Line {
    keyword: &'static str,
    parts: Vec<String>,
}

impl Line {
    pub(crate) fn new(keyword: &'static str) -> Self {
        Self {
            keyword,
            parts: Vec::new(),
        }
    }

    /// Append a quoted positional argument.
    pub(crate) fn positional(&mut self, value: &str) {
        self.parts.push(quote(value));
    }

    /// Append `key: value` when the value is set.
    pub(crate) fn option(&mut self, key: &str, value: Option<Value>) -> Result<()> {
        if let Some(value) = value {
            self.parts.push(format!("{key}: {}", serialize(&value)?));
        }
        Ok(())
    }

    /// Append `key: token` with a token that is already Ruby syntax.
    pub(crate) fn raw_option(&mut self, key: &str, token: Option<&str>) {
        if let Some(token) = token {
            self.parts.push(format!("{key}: {token}"));
        }
    }

    pub(crate) fn finish(self) -> String {
        if self.parts.is_empty() {
            self.keyword.to_string()
        } else {
            format!("{} {}", self.keyword, self.parts.join(", "))
        }
    }
}

pub(crate) fn string_list(items: &Option<Vec<String>>) -> Option<Value> {
    items.as_ref().map(|items| items.clone().into())
}

/// Config-file form of a list entry: a bare name or a full record.
///
/// A bare string `"wget"` means exactly `{ "name": "wget" }`.
#[derive(Debug, Clone, PartialEq, JsonSchema)]
#[serde(untagged)]
pub enum Shorthand<T> {
    /// Just the name, every other field unset
    Name(String),
    /// The full entry record
    Record(T),
}

impl<T: From<String>> Shorthand<T> {
    pub fn into_entry(self) -> T {
        match self {
            Shorthand::Name(name) => T::from(name),
            Shorthand::Record(entry) => entry,
        }
    }
}

struct ShorthandVisitor<T>(PhantomData<T>);

impl<'de, T: Deserialize<'de>> Visitor<'de> for ShorthandVisitor<T> {
    type Value = Shorthand<T>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a name or an entry record")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Self::Value, E> {
        Ok(Shorthand::Name(v.to_string()))
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> std::result::Result<Self::Value, A::Error> {
        T::deserialize(de::value::MapAccessDeserializer::new(map)).map(Shorthand::Record)
    }
}

// Hand-written so errors inside a record (e.g. a bad restart_service) are
// reported as-is instead of "did not match any variant".
impl<'de, T: Deserialize<'de>> Deserialize<'de> for Shorthand<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(ShorthandVisitor(PhantomData))
    }
}

/// `deserialize_with` helper that coerces a list of [`Shorthand`] entries.
pub fn coerce_list<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + From<String>,
{
    let items = Vec::<Shorthand<T>>::deserialize(deserializer)?;
    Ok(items.into_iter().map(Shorthand::into_entry).collect())
}
