//! Activation: turning a Brewfile into one idempotent `brew bundle` run.
//!
//! [`build_command`] derives the invocation from the [`ActivationPolicy`].
//! [`activation_script`] wraps it in a POSIX `sh` guard for provisioning
//! systems that run shell snippets, and [`activate`] performs the same guard
//! in-process through a [`CommandRunner`].
//!
//! A missing `brew` is not an error: the Brewfile stays useful on machines
//! where Homebrew has not been installed yet, so activation warns and skips.

use crate::command_runner::{CommandOptions, CommandRunner};
use crate::config::HomebrewConfig;
use crate::output::Output;
use anyhow::Result;
use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::Path;
use std::process::ExitStatus;

/// What happens to installed packages that are not in the Brewfile.
///
/// Each level does everything the previous one does.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    JsonSchema,
    ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Cleanup {
    /// Leave them installed
    #[default]
    None,
    /// Uninstall them (`--cleanup`)
    Uninstall,
    /// Uninstall them and remove their files (`--cleanup --zap`)
    Zap,
}

/// Flags controlling the `brew bundle` invocation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ActivationPolicy {
    /// Let Homebrew update its index during activation (off keeps runs repeatable)
    #[serde(default)]
    pub auto_update: bool,
    /// Upgrade outdated formulae and casks during activation
    #[serde(default)]
    pub upgrade: bool,
    /// Handling of packages missing from the Brewfile
    #[serde(default)]
    pub cleanup: Cleanup,
    /// Extra flags appended verbatim to `brew bundle`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_flags: Vec<String>,
}

/// Wrap a string in POSIX single quotes.
///
/// `shlex::try_quote` leaves plain paths bare; `--file` is always quoted.
fn single_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', r"'\''"))
}

/// Build the `brew bundle` command line for a Brewfile.
pub fn build_command(policy: &ActivationPolicy, brewfile: &Path) -> String {
    let mut parts = Vec::new();
    if !policy.auto_update {
        parts.push("HOMEBREW_NO_AUTO_UPDATE=1".to_string());
    }
    parts.push("brew bundle".to_string());
    parts.push(format!(
        "--file={}",
        single_quote(&brewfile.display().to_string())
    ));
    parts.push("--no-lock".to_string());
    if !policy.upgrade {
        parts.push("--no-upgrade".to_string());
    }
    if policy.cleanup >= Cleanup::Uninstall {
        parts.push("--cleanup".to_string());
    }
    if policy.cleanup >= Cleanup::Zap {
        parts.push("--zap".to_string());
    }
    parts.extend(policy.extra_flags.iter().map(|flag| {
        shlex::try_quote(flag)
            .map(|quoted| quoted.into_owned())
            .unwrap_or_else(|_| single_quote(flag))
    }));
    parts.join(" ")
}

/// Render the guarded activation snippet for `sh`.
pub fn activation_script(config: &HomebrewConfig, brewfile: &Path) -> String {
    let prefix = config.brew_prefix.display().to_string();
    let brew = config.brew_path().display().to_string();
    let quoted_prefix = shlex::try_quote(&prefix).unwrap_or_else(|_| prefix.as_str().into());
    let quoted_brew = shlex::try_quote(&brew).unwrap_or_else(|_| brew.as_str().into());
    let command = build_command(&config.on_activation, brewfile);

    let mut script = String::new();
    script.push_str("echo >&2 \"Homebrew bundle...\"\n");
    script.push_str(&format!("if [ -f {quoted_brew} ]; then\n"));
    script.push_str(&format!("  PATH={quoted_prefix}:\"$PATH\" {command}\n"));
    script.push_str("else\n");
    script.push_str(
        "  printf '\\033[1;31mwarning: Homebrew is not installed, skipping...\\033[0m\\n' >&2\n",
    );
    script.push_str("fi\n");
    script
}

/// Result of an activation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationOutcome {
    /// `enable` is false in the config
    Disabled,
    /// `brew` was not found under the configured prefix
    Skipped,
    /// Dry run: nothing executed
    DryRun,
    /// `brew bundle` ran; its exit status is passed through
    Ran(ExitStatus),
}

/// Run `brew bundle` against an already written Brewfile.
pub fn activate(
    config: &HomebrewConfig,
    brewfile: &Path,
    runner: &dyn CommandRunner,
    dry_run: bool,
) -> Result<ActivationOutcome> {
    if !config.enable {
        Output::info("Homebrew activation is disabled, skipping");
        return Ok(ActivationOutcome::Disabled);
    }

    let brew = config.brew_path();
    if !brew.is_file() {
        tracing::debug!(path = %brew.display(), "brew executable not found");
        Output::warning(format!(
            "Homebrew is not installed at {}, skipping...",
            brew.display()
        ));
        return Ok(ActivationOutcome::Skipped);
    }

    let command = build_command(&config.on_activation, brewfile);
    if dry_run {
        Output::dry_run(format!("Would run: {command}"));
        return Ok(ActivationOutcome::DryRun);
    }

    let mut path = OsString::from(config.brew_prefix.as_os_str());
    if let Some(existing) = std::env::var_os("PATH") {
        path.push(":");
        path.push(existing);
    }
    let options = CommandOptions::with_env(vec![(
        "PATH".to_string(),
        path.to_string_lossy().into_owned(),
    )]);

    Output::running(&command);
    let status = runner.run_status("sh", &["-c", &command], &options)?;
    tracing::info!(code = ?status.code(), "brew bundle finished");
    Ok(ActivationOutcome::Ran(status))
}
