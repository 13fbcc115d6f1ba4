//! Abstraction over external command execution for testability.
//!
//! Activation is the only place brewbundle spawns a process. It goes through
//! the [`CommandRunner`] trait so tests can record the invocation instead of
//! running `brew`.

use anyhow::{Context, Result};
use std::process::{Command, ExitStatus};

/// Trait for abstracting external command execution.
pub trait CommandRunner: Send + Sync {
    /// Run a command and return only its exit status (inherits stdio).
    fn run_status(
        &self,
        program: &str,
        args: &[&str],
        options: &CommandOptions,
    ) -> Result<ExitStatus>;
}

/// Options for command execution.
#[derive(Debug, Default, Clone)]
pub struct CommandOptions {
    /// Additional environment variables.
    pub env: Vec<(String, String)>,
}

impl CommandOptions {
    /// Create options with extra environment variables.
    pub fn with_env(env: Vec<(String, String)>) -> Self {
        Self { env }
    }
}

/// Production implementation that delegates to [`std::process::Command`].
pub struct RealCommandRunner;

impl CommandRunner for RealCommandRunner {
    fn run_status(
        &self,
        program: &str,
        args: &[&str],
        options: &CommandOptions,
    ) -> Result<ExitStatus> {
        let mut cmd = Command::new(program);
        cmd.args(args);
        for (k, v) in &options.env {
            cmd.env(k, v);
        }
        cmd.status()
            .with_context(|| format!("Failed to run '{program}'"))
    }
}
