//! Commands that print shell snippets for a provisioning system.
//!
//! `command` prints the guarded activation script and `env` prints the
//! `export` lines for the operator's shell. Neither touches the filesystem.

use crate::activation;
use crate::config::HomebrewConfig;
use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct ScriptArgs {
    /// Path the Brewfile is (or will be) written to
    #[arg(long, default_value = "Brewfile")]
    pub brewfile: PathBuf,
}

impl ScriptArgs {
    /// The Brewfile path made absolute, so snippets work from any directory.
    pub fn brewfile_path(&self) -> Result<PathBuf> {
        std::path::absolute(&self.brewfile)
            .with_context(|| format!("Failed to resolve {}", self.brewfile.display()))
    }
}

pub fn run_command(args: ScriptArgs, config_path: &Path) -> Result<()> {
    let config = HomebrewConfig::load(config_path)?;
    print!(
        "{}",
        activation::activation_script(&config, &args.brewfile_path()?)
    );
    Ok(())
}

pub fn run_env(args: ScriptArgs, config_path: &Path) -> Result<()> {
    let config = HomebrewConfig::load(config_path)?;
    for (key, value) in config.environment(&args.brewfile_path()?) {
        let quoted = shlex::try_quote(&value).unwrap_or_else(|_| value.as_str().into());
        println!("export {key}={quoted}");
    }
    Ok(())
}
