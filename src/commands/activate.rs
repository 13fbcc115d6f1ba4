//! Activation command implementation.
//!
//! Writes the Brewfile, then runs `brew bundle` against it. With `enable`
//! off nothing is written or run. A missing
//! Homebrew installation is reported and skipped, not treated as a failure;
//! a failing `brew bundle` passes its exit code through.

use crate::activation::{self, ActivationOutcome, Cleanup};
use crate::brewfile;
use crate::command_runner::RealCommandRunner;
use crate::config::HomebrewConfig;
use crate::output::Output;
use anyhow::Result;
use clap::Args;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct ActivateArgs {
    /// Where to write the Brewfile
    #[arg(long, default_value = "Brewfile")]
    pub brewfile: PathBuf,

    /// Override the configured cleanup mode
    #[arg(long, value_enum)]
    pub cleanup: Option<Cleanup>,

    /// Show what would be done without running brew
    #[arg(long, short = 'n')]
    pub dry_run: bool,
}

pub fn run(args: ActivateArgs, config_path: &Path) -> Result<()> {
    let mut config = HomebrewConfig::load(config_path)?;
    if !config.enable {
        Output::info("Homebrew activation is disabled, skipping");
        return Ok(());
    }
    if let Some(cleanup) = args.cleanup {
        config.on_activation.cleanup = cleanup;
    }

    let brewfile = std::path::absolute(&args.brewfile)?;
    if args.dry_run {
        Output::dry_run(format!("Would write Brewfile to {}", brewfile.display()));
    } else {
        brewfile::write_brewfile(&config, &brewfile)?;
        Output::success(format!("Wrote Brewfile to {}", brewfile.display()));
    }

    match activation::activate(&config, &brewfile, &RealCommandRunner, args.dry_run)? {
        ActivationOutcome::Ran(status) if !status.success() => {
            Output::error(format!("brew bundle failed ({status})"));
            std::process::exit(status.code().unwrap_or(1));
        }
        ActivationOutcome::Ran(_) => Output::success("Homebrew bundle complete"),
        ActivationOutcome::Disabled | ActivationOutcome::Skipped | ActivationOutcome::DryRun => {}
    }

    Ok(())
}
