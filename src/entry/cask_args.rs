//! `cask_args` options.
//!
//! One instance applies to every cask (the `caskArgs` config key); a cask may
//! also carry its own instance, rendered inline as `args: { ... }`.

use super::Entry;
use crate::error::Result;
use crate::value::{Value, serialize_options};
use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Arguments passed to `brew install --cask`.
///
/// Field order here is the order options appear in the Brewfile.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct CaskArgs {
    /// Target location for Applications (default `/Applications`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appdir: Option<String>,
    /// Target location for Color Pickers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colorpickerdir: Option<String>,
    /// Target location for Preference Panes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefpanedir: Option<String>,
    /// Target location for QuickLook Plugins
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qlplugindir: Option<String>,
    /// Target location for Spotlight Plugins
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mdimporterdir: Option<String>,
    /// Target location for Dictionaries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dictionarydir: Option<String>,
    /// Target location for Fonts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fontdir: Option<String>,
    /// Target location for Services
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub servicedir: Option<String>,
    /// Target location for Input Methods
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_methoddir: Option<String>,
    /// Target location for Internet Plugins
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internet_plugindir: Option<String>,
    /// Target location for Audio Unit Plugins
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_unit_plugindir: Option<String>,
    /// Target location for VST Plugins
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vst_plugindir: Option<String>,
    /// Target location for VST3 Plugins
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vst3_plugindir: Option<String>,
    /// Target location for Screen Savers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screen_saverdir: Option<String>,
    /// Comma-separated list of language codes to prefer for cask installation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Require all casks to have a checksum
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub require_sha: Option<bool>,
    /// Disable quarantining of downloads
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_quarantine: Option<bool>,
    /// Disable linking of helper executables
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_binaries: Option<bool>,
}

impl CaskArgs {
    /// The set options, in declaration order.
    pub fn options(&self) -> IndexMap<String, Value> {
        let dirs = [
            ("appdir", &self.appdir),
            ("colorpickerdir", &self.colorpickerdir),
            ("prefpanedir", &self.prefpanedir),
            ("qlplugindir", &self.qlplugindir),
            ("mdimporterdir", &self.mdimporterdir),
            ("dictionarydir", &self.dictionarydir),
            ("fontdir", &self.fontdir),
            ("servicedir", &self.servicedir),
            ("input_methoddir", &self.input_methoddir),
            ("internet_plugindir", &self.internet_plugindir),
            ("audio_unit_plugindir", &self.audio_unit_plugindir),
            ("vst_plugindir", &self.vst_plugindir),
            ("vst3_plugindir", &self.vst3_plugindir),
            ("screen_saverdir", &self.screen_saverdir),
            ("language", &self.language),
        ];
        let flags = [
            ("require_sha", self.require_sha),
            ("no_quarantine", self.no_quarantine),
            ("no_binaries", self.no_binaries),
        ];

        let strings = dirs
            .into_iter()
            .filter_map(|(key, value)| Some((key.to_string(), Value::from(value.clone()?))));
        let bools = flags
            .into_iter()
            .filter_map(|(key, value)| Some((key.to_string(), Value::from(value?))));
        strings.chain(bools).collect()
    }

    /// The options as an inline mapping, or `None` when nothing is set.
    pub fn to_value(&self) -> Option<Value> {
        let options = self.options();
        (!options.is_empty()).then_some(Value::Mapping(options))
    }
}

impl Entry for CaskArgs {
    fn to_line(&self) -> Result<Option<String>> {
        let options = self.options();
        if options.is_empty() {
            return Ok(None);
        }
        Ok(Some(format!("cask_args {}", serialize_options(&options)?)))
    }
}
