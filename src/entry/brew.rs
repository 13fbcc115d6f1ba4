//! Formula entries (`brew "name"`).

use super::{Entry, Line, string_list};
use crate::error::{BrewfileError, Result};
use schemars::{JsonSchema, Schema, SchemaGenerator, json_schema};
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;

/// Whether `brew bundle` restarts the formula's service after install.
///
/// Written in config as `true`, `false` or `"changed"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestartService {
    /// Restart on every run (`true`)
    Always,
    /// Never restart (`false`)
    Never,
    /// Restart only when the formula was installed or upgraded (`"changed"`)
    OnChange,
}

impl RestartService {
    const CHANGED: &'static str = "changed";

    /// The Ruby token for this policy.
    pub fn token(self) -> &'static str {
        match self {
            RestartService::Always => "true",
            RestartService::Never => "false",
            RestartService::OnChange => ":changed",
        }
    }
}

impl From<bool> for RestartService {
    fn from(b: bool) -> Self {
        if b {
            RestartService::Always
        } else {
            RestartService::Never
        }
    }
}

impl TryFrom<&str> for RestartService {
    type Error = BrewfileError;

    fn try_from(s: &str) -> Result<Self> {
        if s == Self::CHANGED {
            Ok(RestartService::OnChange)
        } else {
            Err(BrewfileError::InvalidRestartService {
                value: format!("{s:?}"),
            })
        }
    }
}

impl Serialize for RestartService {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            RestartService::Always => serializer.serialize_bool(true),
            RestartService::Never => serializer.serialize_bool(false),
            RestartService::OnChange => serializer.serialize_str(Self::CHANGED),
        }
    }
}

struct RestartServiceVisitor;

impl Visitor<'_> for RestartServiceVisitor {
    type Value = RestartService;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("true, false or \"changed\"")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<Self::Value, E> {
        Ok(v.into())
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Self::Value, E> {
        RestartService::try_from(v).map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for RestartService {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(RestartServiceVisitor)
    }
}

impl JsonSchema for RestartService {
    fn schema_name() -> Cow<'static, str> {
        "RestartService".into()
    }

    fn json_schema(_generator: &mut SchemaGenerator) -> Schema {
        json_schema!({
            "description": "Restart the service: always (true), never (false) or only when changed (\"changed\")",
            "oneOf": [
                { "type": "boolean" },
                { "const": "changed" }
            ]
        })
    }
}

/// A Homebrew formula.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Brew {
    /// Formula name (e.g., "jq" or "valkyrie00/bbrew/bbrew")
    pub name: String,
    /// Extra `--<arg>` flags for `brew install`, without the leading dashes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<String>>,
    /// Formulae to unlink before this one is linked
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conflicts_with: Option<Vec<String>>,
    /// Restart the formula's service after install or upgrade
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restart_service: Option<RestartService>,
    /// Start the formula's service after install
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_service: Option<bool>,
    /// Link (or refuse to link) the formula into the prefix
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<bool>,
}

impl From<String> for Brew {
    fn from(name: String) -> Self {
        Brew {
            name,
            args: None,
            conflicts_with: None,
            restart_service: None,
            start_service: None,
            link: None,
        }
    }
}

impl From<&str> for Brew {
    fn from(name: &str) -> Self {
        Brew::from(name.to_string())
    }
}

impl Entry for Brew {
    fn to_line(&self) -> Result<Option<String>> {
        let mut line = Line::new("brew");
        line.positional(&self.name);
        line.option("args", string_list(&self.args))?;
        line.option("conflicts_with", string_list(&self.conflicts_with))?;
        line.raw_option(
            "restart_service",
            self.restart_service.map(RestartService::token),
        );
        line.option("start_service", self.start_service.map(Into::into))?;
        line.option("link", self.link.map(Into::into))?;
        Ok(Some(line.finish()))
    }
}
