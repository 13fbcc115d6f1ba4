//! Brewfile compilation command.

use crate::brewfile;
use crate::config::HomebrewConfig;
use crate::output::Output;
use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct CompileArgs {
    /// Write the Brewfile here instead of printing it
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: CompileArgs, config_path: &Path) -> Result<()> {
    let config = HomebrewConfig::load(config_path)?;

    match args.output {
        Some(path) => {
            brewfile::write_brewfile(&config, &path)?;
            Output::success(format!("Wrote Brewfile to {}", path.display()));
        }
        None => {
            let text = brewfile::compile(&config).context("Failed to compile Brewfile")?;
            print!("{text}");
        }
    }

    Ok(())
}
