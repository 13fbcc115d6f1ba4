//! CLI argument definitions for brewbundle.
//!
//! Kept out of `main.rs` so shell completion generation can reference them.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::commands;
use crate::config::{CONFIG_ENV, HomebrewConfig};

#[derive(Debug, Parser)]
#[command(name = "brewbundle")]
#[command(about = "Compile a Homebrew configuration into a Brewfile and activate it")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Config file (.json, .yaml or .yml)
    #[arg(short, long, global = true, env = CONFIG_ENV, default_value = HomebrewConfig::DEFAULT_PATH)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Compile the config into a Brewfile
    Compile(commands::compile::CompileArgs),

    /// Print the guarded `brew bundle` activation script
    Command(commands::script::ScriptArgs),

    /// Print the environment exported for interactive `brew bundle` use
    Env(commands::script::ScriptArgs),

    /// Write the Brewfile and run `brew bundle` against it
    Activate(commands::activate::ActivateArgs),

    /// Print the JSON schema of the config file
    Schema,

    /// Generate shell completions
    Completions(commands::completions::CompletionsArgs),
}
