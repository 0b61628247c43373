//! # ShellOut Process Execution (`common::process`)
//!
//! File: cli/src/common/process/mod.rs
//!
//! ## Overview
//!
//! This module is the core of ShellOut: it builds shell-safe command lines
//! from typed arguments and runs them as child processes, capturing standard
//! output and standard error concurrently.
//!
//! ## Architecture
//!
//! - **`argument`**: `Argument::Quoted` / `Argument::Verbatim` tokens and the
//!   double-quote escaping rules.
//! - **`command`**: `SafeCommandName`, `CommandLine`, `build`, `in_directory`
//!   and the `ShellCommand` pair consumed by the runner.
//! - **`capture`**: The single lock guarding both output buffers.
//! - **`sink`**: `OutputSink` tee destinations.
//! - **`drain`**: The `PipeDrain` trait with readiness-driven and blocking
//!   implementations, selected by `DrainStrategy`.
//! - **`runner`**: `ProcessRunner`, `RunOptions`, outcome assembly.
//!
//! Control flow for one call:
//! 1. The caller builds a `ShellCommand` (by hand or from the catalog).
//! 2. The builder escapes and joins it into one `CommandLine`, prefixed with `cd <at> &&`.
//! 3. The runner spawns `<shell> -c <line>` with both streams piped.
//! 4. The drain reads both pipes to EOF, teeing to any sinks, and waits for exit.
//! 5. The runner classifies the exit status into output text or a `ShellOutFailure`.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use shellout::{shell_out_blocking, Argument, RunOptions, ShellCommand};
//!
//! let command = ShellCommand::named("ls")
//!     .unwrap()
//!     .arg("-la")
//!     .arg(Argument::verbatim("| head -n 5"));
//! let listing = shell_out_blocking(&command, RunOptions::default().at("/tmp")).unwrap();
//! println!("{}", listing);
//! ```
//!

/// Typed argument tokens and escaping.
pub mod argument;
/// Shared output buffers.
pub mod capture;
/// Command-line composition.
pub mod command;
/// Pipe draining strategies.
pub mod drain;
/// Process runner and outcome assembly.
pub mod runner;
/// Output tee destinations.
pub mod sink;

pub use argument::Argument;
pub use capture::Capture;
pub use command::{build, in_directory, CommandLine, SafeCommandName, ShellCommand};
pub use drain::{BlockingDrain, DrainStrategy, Invocation, PipeDrain, ReadinessDrain, Sinks};
pub use runner::{ProcessRunner, RunOptions, DEFAULT_SHELL};
pub use sink::OutputSink;

use crate::core::error::ShellOutError;

/// Runs `command` with a default runner (`/bin/sh`, automatic drain strategy).
pub async fn shell_out(command: &ShellCommand, options: RunOptions) -> Result<String, ShellOutError> {
    ProcessRunner::default().shell_out(command, options).await
}

/// Blocking form of `shell_out`; needs no async runtime.
pub fn shell_out_blocking(command: &ShellCommand, options: RunOptions) -> Result<String, ShellOutError> {
    ProcessRunner::default().shell_out_blocking(command, options)
}
