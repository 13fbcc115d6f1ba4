//! Cask entries (`cask "name"`).

use super::{CaskArgs, Entry, Line};
use crate::error::Result;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A Homebrew cask.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Cask {
    /// Cask name (e.g., "firefox")
    pub name: String,
    /// Per-cask overrides of the global cask arguments
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<CaskArgs>,
    /// Upgrade even when the cask auto-updates or is versioned `latest`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub greedy: Option<bool>,
}

impl From<String> for Cask {
    fn from(name: String) -> Self {
        Cask {
            name,
            args: None,
            greedy: None,
        }
    }
}

impl From<&str> for Cask {
    fn from(name: &str) -> Self {
        Cask::from(name.to_string())
    }
}

impl Entry for Cask {
    fn to_line(&self) -> Result<Option<String>> {
        let mut line = Line::new("cask");
        line.positional(&self.name);
        line.option("args", self.args.as_ref().and_then(CaskArgs::to_value))?;
        line.option("greedy", self.greedy.map(Into::into))?;
        Ok(Some(line.finish()))
    }
}
