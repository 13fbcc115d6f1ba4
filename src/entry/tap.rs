//! Tap entries (`tap "owner/repo"`).

use super::{Entry, Line};
use crate::error::Result;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A third-party formula repository.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Tap {
    /// Tap name in `owner/repo` form (e.g., "homebrew/cask-fonts")
    pub name: String,
    /// URL to clone from when the tap is not hosted at `github.com/owner/homebrew-repo`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clone_target: Option<String>,
    /// Let `brew update` refresh this tap even with a custom clone target
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub force_auto_update: Option<bool>,
}

impl From<String> for Tap {
    fn from(name: String) -> Self {
        Tap {
            name,
            clone_target: None,
            force_auto_update: None,
        }
    }
}

impl From<&str> for Tap {
    fn from(name: &str) -> Self {
        Tap::from(name.to_string())
    }
}

impl Entry for Tap {
    fn to_line(&self) -> Result<Option<String>> {
        let mut line = Line::new("tap");
        line.positional(&self.name);
        if let Some(target) = &self.clone_target {
            line.positional(target);
        }
        line.option("force_auto_update", self.force_auto_update.map(Into::into))?;
        Ok(Some(line.finish()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_tap() {
        let tap = Tap::from("homebrew/cask-fonts");
        assert_eq!(
            tap.to_line().unwrap().unwrap(),
            r#"tap "homebrew/cask-fonts""#
        );
    }

    #[test]
    fn clone_target_is_positional() {
        let tap = Tap {
            name: "user/tap-repo".to_string(),
            clone_target: Some("https://user@bitbucket.org/user/homebrew-tap-repo.git".to_string()),
            force_auto_update: Some(true),
        };
        assert_eq!(
            tap.to_line().unwrap().unwrap(),
            r#"tap "user/tap-repo", "https://user@bitbucket.org/user/homebrew-tap-repo.git", force_auto_update: true"#
        );
    }

    #[test]
    fn force_auto_update_without_clone_target() {
        let tap = Tap {
            force_auto_update: Some(false),
            ..Tap::from("owner/repo")
        };
        assert_eq!(
            tap.to_line().unwrap().unwrap(),
            r#"tap "owner/repo", force_auto_update: false"#
        );
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result: std::result::Result<Tap, _> =
            serde_json::from_str(r#"{"name": "a/b", "clone": "x"}"#);
        assert!(result.is_err());
    }
}
