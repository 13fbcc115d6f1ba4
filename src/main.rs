use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use brewbundle::commands;
use brewbundle::output::Output;
use brewbundle::{Cli, Commands};

fn run(cli: Cli) -> Result<()> {
    tracing::debug!(config = %cli.config.display(), "Starting brewbundle");

    match cli.command {
        Commands::Compile(args) => commands::compile::run(args, &cli.config),
        Commands::Command(args) => commands::script::run_command(args, &cli.config),
        Commands::Env(args) => commands::script::run_env(args, &cli.config),
        Commands::Activate(args) => commands::activate::run(args, &cli.config),
        Commands::Schema => commands::schema::run(),
        Commands::Completions(args) => commands::completions::run(args),
    }
}

fn main() {
    // Initialize tracing with RUST_LOG env filter
    // e.g., RUST_LOG=brewbundle=debug
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        Output::error(format!("{err:#}"));
        std::process::exit(1);
    }
}
