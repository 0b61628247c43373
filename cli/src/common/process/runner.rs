//! # Process Runner (`common::process::runner`)
//!
//! File: cli/src/common/process/runner.rs
//!
//! ## Overview
//!
//! `ProcessRunner` takes a finished `CommandLine`, runs it through the
//! configured shell, and turns the exit status plus the two captured streams
//! into an outcome:
//!
//! - exit status 0: `Ok(stdout)`, decoded as UTF-8 (invalid bytes give an
//!   empty string) with exactly one trailing newline removed
//! - any other status: `Err(ShellOutError::Failed(..))` carrying the status and
//!   the raw bytes of both streams
//! - the shell could not be started: `Err(ShellOutError::SpawnFailed { .. })`
//!
//! ## Architecture
//!
//! A runner holds only the shell path and a `DrainStrategy`, both passed in
//! explicitly; there is no process-wide default configuration. Each call creates
//! a fresh `Capture`, hands it to the selected `PipeDrain`, and reads it once
//! the drain reports the child has exited and both pipes are at EOF.
//!
//! - **`run` / `run_blocking`**: Execute a prepared command line.
//! - **`shell_out` / `shell_out_blocking`**: Build a `ShellCommand`, prefix it
//!   with `cd <at> &&`, then run it.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use shellout::{catalog::git, ProcessRunner, RunOptions};
//!
//! # async fn example() -> Result<(), shellout::ShellOutError> {
//! let runner = ProcessRunner::new("/bin/bash");
//! let head = runner
//!     .shell_out(&git::current_commit(), RunOptions::default().at("/path/to/repo"))
//!     .await?;
//! println!("HEAD is {}", head);
//! # Ok(())
//! # }
//! ```
//!
use super::capture::Capture;
use super::command::{CommandLine, ShellCommand};
use super::drain::{BlockingDrain, DrainStrategy, Invocation, Sinks};
use super::sink::OutputSink;
use crate::core::error::{decode_trimmed, ShellOutError, ShellOutFailure};
use std::collections::HashMap;
use std::path::PathBuf;
use std::process::ExitStatus;
use tracing::{debug, info, instrument};

/// Shell used when none is configured.
pub const DEFAULT_SHELL: &str = "/bin/sh";

/// Per-call options for `shell_out`.
#[derive(Debug)]
pub struct RunOptions {
    /// Directory the command runs in (via a `cd` prefix). Defaults to `.`.
    pub at: PathBuf,
    /// Receives a copy of standard output.
    pub output: Option<OutputSink>,
    /// Receives a copy of standard error.
    pub error: Option<OutputSink>,
    /// Complete child environment. `None` inherits this process's environment.
    pub environment: Option<HashMap<String, String>>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            at: PathBuf::from("."),
            output: None,
            error: None,
            environment: None,
        }
    }
}

impl RunOptions {
    pub fn at(mut self, directory: impl Into<PathBuf>) -> Self {
        self.at = directory.into();
        self
    }

    pub fn output_to(mut self, sink: OutputSink) -> Self {
        self.output = Some(sink);
        self
    }

    pub fn error_to(mut self, sink: OutputSink) -> Self {
        self.error = Some(sink);
        self
    }

    pub fn environment(mut self, environment: HashMap<String, String>) -> Self {
        self.environment = Some(environment);
        self
    }

    fn into_parts(self) -> (PathBuf, Option<HashMap<String, String>>, Sinks) {
        (
            self.at,
            self.environment,
            Sinks {
                output: self.output,
                error: self.error,
            },
        )
    }
}

/// Runs command lines through a shell and collects their output.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    shell: String,
    strategy: DrainStrategy,
}

impl Default for ProcessRunner {
    fn default() -> Self {
        Self::new(DEFAULT_SHELL)
    }
}

impl ProcessRunner {
    pub fn new(shell: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
            strategy: DrainStrategy::Auto,
        }
    }

    pub fn with_strategy(mut self, strategy: DrainStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn shell(&self) -> &str {
        &self.shell
    }

    pub fn strategy(&self) -> DrainStrategy {
        self.strategy
    }

    fn invocation(
        &self,
        command_line: &CommandLine,
        environment: Option<HashMap<String, String>>,
    ) -> Invocation {
        Invocation {
            shell: self.shell.clone(),
            command_line: command_line.clone(),
            environment,
        }
    }

    /// Runs `command_line` and waits for the child to exit and its output to drain.
    ///
    /// # Errors
    ///
    /// * `ShellOutError::SpawnFailed` if the shell could not be started.
    /// * `ShellOutError::Failed` if the command exited nonzero.
    /// * `ShellOutError::Drain` / `ShellOutError::Wait` on I/O failures after spawn.
    #[instrument(skip_all, fields(shell = %self.shell, strategy = %self.strategy))]
    pub async fn run(
        &self,
        command_line: &CommandLine,
        environment: Option<HashMap<String, String>>,
        sinks: Sinks,
    ) -> Result<String, ShellOutError> {
        debug!("Running command line: {}", command_line);
        let invocation = self.invocation(command_line, environment);
        let capture = Capture::new();
        let status = self
            .strategy
            .drain()
            .run_to_exit(&invocation, sinks, &capture)
            .await?;
        finish(status, &capture)
    }

    /// Blocking form of `run`. Always uses blocking reads and never needs a runtime.
    #[instrument(skip_all, fields(shell = %self.shell))]
    pub fn run_blocking(
        &self,
        command_line: &CommandLine,
        environment: Option<HashMap<String, String>>,
        sinks: Sinks,
    ) -> Result<String, ShellOutError> {
        debug!("Running command line (blocking): {}", command_line);
        let invocation = self.invocation(command_line, environment);
        let capture = Capture::new();
        let status = BlockingDrain.run_to_exit_blocking(&invocation, sinks, &capture)?;
        finish(status, &capture)
    }

    /// Runs `command` inside `options.at`.
    pub async fn shell_out(
        &self,
        command: &ShellCommand,
        options: RunOptions,
    ) -> Result<String, ShellOutError> {
        let (at, environment, sinks) = options.into_parts();
        let line = command.command_line_in(&at);
        self.run(&line, environment, sinks).await
    }

    /// Blocking form of `shell_out`.
    pub fn shell_out_blocking(
        &self,
        command: &ShellCommand,
        options: RunOptions,
    ) -> Result<String, ShellOutError> {
        let (at, environment, sinks) = options.into_parts();
        let line = command.command_line_in(&at);
        self.run_blocking(&line, environment, sinks)
    }
}

/// Assembles the outcome once draining is complete.
fn finish(status: ExitStatus, capture: &Capture) -> Result<String, ShellOutError> {
    let (output, error) = capture.take();
    let code = exit_code(status);
    info!(
        "Command exited with status {} ({} bytes stdout, {} bytes stderr)",
        code,
        output.len(),
        error.len()
    );
    if status.success() {
        Ok(decode_trimmed(&output))
    } else {
        Err(ShellOutError::Failed(ShellOutFailure {
            status: code,
            output,
            error,
        }))
    }
}

/// Numeric exit status. Signal terminations map to `128 + signal` on Unix.
fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    -1
}
