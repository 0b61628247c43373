//! # ShellOut Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the subcommand groups of the `shellout` binary and
//! the small amount of plumbing they share: turning CLI words into a
//! `ShellCommand`, and running a command with the loaded configuration.
//!
//! ## Command Groups
//!
//! - `run`: Run an arbitrary program with quoted (or verbatim) arguments
//! - `line`: Print the composed command line without running it
//! - `git`: Catalog git commands
//! - `fs`: Catalog filesystem commands
//!
use anyhow::Context;
use shellout::core::config;
use shellout::core::error::Result;
use shellout::{Argument, OutputSink, RunOptions, ShellCommand};
use std::path::Path;
use tracing::{debug, info};

/// Catalog filesystem commands (`shellout fs ...`).
pub mod fs;
/// Catalog git commands (`shellout git ...`).
pub mod git;
/// Print a composed command line (`shellout line ...`).
pub mod line;
/// Run an arbitrary program (`shellout run ...`).
pub mod run;

/// Builds a `ShellCommand` from a program name and CLI words.
///
/// Words become quoted tokens unless `verbatim` is set.
pub(crate) fn command_from(program: &str, args: &[String], verbatim: bool) -> Result<ShellCommand> {
    let command = ShellCommand::named(program)
        .with_context(|| format!("Cannot use '{}' as a program name", program))?;
    Ok(command.args(args.iter().map(|word| {
        if verbatim {
            Argument::verbatim(word.as_str())
        } else {
            Argument::quoted(word.as_str())
        }
    })))
}

/// Parses a `KEY=VALUE` pair for `--env`.
pub(crate) fn parse_env_pair(raw: &str) -> std::result::Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{}'", raw)),
    }
}

/// Runs `command` in `at` with the user's configuration and prints its output.
///
/// With `tee` (or `runner.tee` in the config) output streams to the terminal
/// while it is captured, and is not printed a second time afterwards.
pub(crate) async fn execute(
    command: &ShellCommand,
    at: &Path,
    env_overrides: &[(String, String)],
    tee: bool,
) -> Result<()> {
    let cfg = config::load_config()?;
    let tee = tee || cfg.runner.tee;

    let mut options = RunOptions::default().at(at);
    if let Some(environment) = cfg.environment_with(env_overrides) {
        debug!("Running with {} environment variables.", environment.len());
        options = options.environment(environment);
    }
    if tee {
        options = options
            .output_to(OutputSink::Stdout)
            .error_to(OutputSink::Stderr);
    }

    info!("Executing: {}", command);
    let output = cfg.runner().shell_out(command, options).await?;
    if !tee && !output.is_empty() {
        println!("{}", output);
    }
    Ok(())
}
