//! The brewbundle configuration document.
//!
//! A config file is JSON or YAML (picked by extension) describing the
//! desired Homebrew state. List shorthands (`"wget"` for `{"name": "wget"}`)
//! are coerced here, once, while the file is read.

use crate::activation::ActivationPolicy;
use crate::entry::{self, Brew, Cask, CaskArgs, MasApp, Tap, Whalebrew};
use crate::error::BrewfileError;
use anyhow::{Context, Result};
use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that points the CLI at a config file.
pub const CONFIG_ENV: &str = "BREWBUNDLE_CONFIG";

/// Environment-wide Homebrew settings exported to the operator's shell.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GlobalConfig {
    /// Export `HOMEBREW_BUNDLE_FILE` so a plain `brew bundle` uses the generated Brewfile
    #[serde(default)]
    pub brewfile: bool,
    /// Allow `brew bundle` to write `Brewfile.lock.json` (exports `HOMEBREW_BUNDLE_NO_LOCK=1` when false)
    #[serde(default)]
    pub lockfiles: bool,
}

/// The full Homebrew configuration.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct HomebrewConfig {
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    /// Run `brew bundle` on activation
    #[serde(default = "default_enable")]
    pub enable: bool,
    /// Directory containing the `brew` executable
    #[serde(default = "default_brew_prefix")]
    pub brew_prefix: PathBuf,
    /// How `brew bundle` behaves on activation
    #[serde(default)]
    pub on_activation: ActivationPolicy,
    /// Environment exported for interactive `brew bundle` use
    #[serde(default)]
    pub global: GlobalConfig,
    /// Taps to add
    #[serde(default, deserialize_with = "entry::coerce_list")]
    #[schemars(with = "Vec<entry::Shorthand<Tap>>")]
    pub taps: Vec<Tap>,
    /// Arguments applied to every cask
    #[serde(default)]
    pub cask_args: CaskArgs,
    /// Formulae to install
    #[serde(default, deserialize_with = "entry::coerce_list")]
    #[schemars(with = "Vec<entry::Shorthand<Brew>>")]
    pub brews: Vec<Brew>,
    /// Casks to install
    #[serde(default, deserialize_with = "entry::coerce_list")]
    #[schemars(with = "Vec<entry::Shorthand<Cask>>")]
    pub casks: Vec<Cask>,
    /// Mac App Store apps, name to app id (written in declaration order)
    #[serde(default)]
    pub mas_apps: IndexMap<String, u64>,
    /// Docker images to install as commands with whalebrew
    #[serde(default)]
    pub whalebrews: Vec<String>,
    /// Verbatim Brewfile text appended after the generated sections
    #[serde(default)]
    pub extra_config: String,
}

fn default_enable() -> bool {
    true
}

/// Where Homebrew installs `brew` on this architecture.
pub fn default_brew_prefix() -> PathBuf {
    if cfg!(target_arch = "aarch64") {
        PathBuf::from("/opt/homebrew/bin")
    } else {
        PathBuf::from("/usr/local/bin")
    }
}

impl Default for HomebrewConfig {
    fn default() -> Self {
        Self {
            schema: None,
            enable: default_enable(),
            brew_prefix: default_brew_prefix(),
            on_activation: ActivationPolicy::default(),
            global: GlobalConfig::default(),
            taps: Vec::new(),
            cask_args: CaskArgs::default(),
            brews: Vec::new(),
            casks: Vec::new(),
            mas_apps: IndexMap::new(),
            whalebrews: Vec::new(),
            extra_config: String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Yaml,
}

impl Format {
    fn of(path: &Path) -> Result<Self, BrewfileError> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Ok(Format::Json),
            Some("yaml" | "yml") => Ok(Format::Yaml),
            _ => Err(BrewfileError::UnsupportedConfigFormat {
                path: path.display().to_string(),
            }),
        }
    }
}

impl HomebrewConfig {
    /// Default config file name, relative to the working directory.
    pub const DEFAULT_PATH: &'static str = "brewbundle.json";

    /// Load a config from a path.
    pub fn load(path: &Path) -> Result<Self> {
        let format = Format::of(path)?;
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        let config = Self::parse(&content, format)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        tracing::debug!(
            path = %path.display(),
            taps = config.taps.len(),
            brews = config.brews.len(),
            casks = config.casks.len(),
            "Loaded config"
        );
        Ok(config)
    }

    fn parse(content: &str, format: Format) -> Result<Self> {
        let config: Self = match format {
            Format::Json => serde_json::from_str(content)?,
            Format::Yaml => serde_yaml::from_str(content)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse JSON config text.
    pub fn from_json(content: &str) -> Result<Self> {
        Self::parse(content, Format::Json)
    }

    /// Parse YAML config text.
    pub fn from_yaml(content: &str) -> Result<Self> {
        Self::parse(content, Format::Yaml)
    }

    /// Save a config to a path, in the format its extension names.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = match Format::of(path)? {
            Format::Json => {
                serde_json::to_string_pretty(self).context("Failed to serialize config")?
            }
            Format::Yaml => serde_yaml::to_string(self).context("Failed to serialize config")?,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        fs::write(path, content)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        Ok(())
    }

    fn validate(&self) -> Result<(), BrewfileError> {
        if let Some((name, _)) = self.mas_apps.iter().find(|(_, id)| **id == 0) {
            return Err(BrewfileError::InvalidMasId { name: name.clone() });
        }
        Ok(())
    }

    /// Mac App Store apps in declaration order.
    pub fn mas_entries(&self) -> Vec<MasApp> {
        self.mas_apps
            .iter()
            .map(|(name, id)| MasApp {
                name: name.clone(),
                id: *id,
            })
            .collect()
    }

    /// Whalebrew images in declaration order.
    pub fn whalebrew_entries(&self) -> Vec<Whalebrew> {
        self.whalebrews.iter().cloned().map(Whalebrew).collect()
    }

    /// Path of the `brew` executable under the configured prefix.
    pub fn brew_path(&self) -> PathBuf {
        self.brew_prefix.join("brew")
    }

    /// Environment variables for the operator's shell.
    pub fn environment(&self, brewfile: &Path) -> Vec<(String, String)> {
        let mut env = Vec::new();
        if self.global.brewfile {
            env.push((
                "HOMEBREW_BUNDLE_FILE".to_string(),
                brewfile.display().to_string(),
            ));
        }
        if !self.global.lockfiles {
            env.push(("HOMEBREW_BUNDLE_NO_LOCK".to_string(), "1".to_string()));
        }
        env
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::Cleanup;
    use crate::entry::RestartService;

    #[test]
    fn empty_document_uses_defaults() {
        let config = HomebrewConfig::from_json("{}").unwrap();
        assert_eq!(config, HomebrewConfig::default());
        assert!(config.enable);
        assert!(!config.on_activation.auto_update);
        assert_eq!(config.on_activation.cleanup, Cleanup::None);
    }

    #[test]
    fn shorthand_and_record_entries_are_equivalent() {
        let config = HomebrewConfig::from_json(
            r#"{
                "taps": ["homebrew/cask-fonts"],
                "brews": ["jq", {"name": "jq"}],
                "casks": [{"name": "firefox", "greedy": true}, "iterm2"]
            }"#,
        )
        .unwrap();
        assert_eq!(config.taps, vec![Tap::from("homebrew/cask-fonts")]);
        assert_eq!(config.brews[0], config.brews[1]);
        assert_eq!(config.casks[0].greedy, Some(true));
        assert_eq!(config.casks[1], Cask::from("iterm2"));
    }

    #[test]
    fn yaml_config() {
        let config = HomebrewConfig::from_yaml(
            r#"
onActivation:
  cleanup: zap
  autoUpdate: true
brews:
  - name: postgresql
    restart_service: changed
masApps:
  Xcode: 497799835
  Keynote: 409183694
"#,
        )
        .unwrap();
        assert_eq!(config.on_activation.cleanup, Cleanup::Zap);
        assert!(config.on_activation.auto_update);
        assert_eq!(
            config.brews[0].restart_service,
            Some(RestartService::OnChange)
        );
        let names: Vec<_> = config.mas_entries().into_iter().map(|m| m.name).collect();
        assert_eq!(names, vec!["Xcode", "Keynote"]);
    }

    #[test]
    fn mas_apps_keep_declaration_order_in_json() {
        let config =
            HomebrewConfig::from_json(r#"{"masApps": {"Zed": 3, "Alpha": 1, "Mid": 2}}"#).unwrap();
        let ids: Vec<_> = config.mas_entries().into_iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn invalid_restart_service_fails_at_load() {
        let err = HomebrewConfig::from_json(
            r#"{"brews": [{"name": "redis", "restart_service": "sometimes"}]}"#,
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("Invalid restart_service value"));
    }

    #[test]
    fn zero_mas_id_fails_at_load() {
        let err = HomebrewConfig::from_json(r#"{"masApps": {"Broken": 0}}"#).unwrap_err();
        assert!(err.to_string().contains("ids must be positive"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(HomebrewConfig::from_json(r#"{"brewz": []}"#).is_err());
    }

    #[test]
    fn environment_defaults_to_no_lock_only() {
        let config = HomebrewConfig::default();
        let env = config.environment(Path::new("/etc/Brewfile"));
        assert_eq!(
            env,
            vec![("HOMEBREW_BUNDLE_NO_LOCK".to_string(), "1".to_string())]
        );
    }

    #[test]
    fn environment_with_brewfile_and_lockfiles() {
        let config = HomebrewConfig {
            global: GlobalConfig {
                brewfile: true,
                lockfiles: true,
            },
            ..Default::default()
        };
        let env = config.environment(Path::new("/etc/Brewfile"));
        assert_eq!(
            env,
            vec![(
                "HOMEBREW_BUNDLE_FILE".to_string(),
                "/etc/Brewfile".to_string()
            )]
        );
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let err = HomebrewConfig::load(Path::new("brewbundle.toml")).unwrap_err();
        assert!(err.to_string().contains("Unsupported config format"));
    }

    #[test]
    fn save_and_load_preserve_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = HomebrewConfig {
            brews: vec![Brew {
                restart_service: Some(RestartService::OnChange),
                ..Brew::from("redis")
            }],
            whalebrews: vec!["whalebrew/wget".to_string()],
            ..Default::default()
        };
        for name in ["out.json", "out.yaml"] {
            let path = dir.path().join(name);
            config.save(&path).unwrap();
            assert_eq!(HomebrewConfig::load(&path).unwrap(), config);
        }
    }
}
