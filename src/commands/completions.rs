//! Shell completion generation for the brewbundle CLI.

use anyhow::Result;
use clap::{Args, CommandFactory, ValueEnum};
use clap_complete::{Generator, generate};
use clap_complete_nushell::Nushell;
use std::io::{self, Write};

use crate::cli::Cli;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Nushell,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

fn write_completions(generator: impl Generator, out: &mut dyn Write) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(generator, &mut cmd, name, out);
}

pub fn run(args: CompletionsArgs) -> Result<()> {
    let out = &mut io::stdout();
    match args.shell {
        Shell::Bash => write_completions(clap_complete::Shell::Bash, out),
        Shell::Zsh => write_completions(clap_complete::Shell::Zsh, out),
        Shell::Fish => write_completions(clap_complete::Shell::Fish, out),
        Shell::Nushell => write_completions(Nushell, out),
    }
    Ok(())
}
