//! # ShellOut Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error taxonomy shared by the library and the
//! command-line front end.
//!
//! ## Architecture
//!
//! The error system consists of three parts:
//! - `ShellOutError`: A `thiserror` enum covering every way a single invocation can fail
//! - `ShellOutFailure`: The structured payload of a command that ran and exited nonzero
//! - `Result<T>`: A type alias for `anyhow::Result<T>`, used by configuration loading
//!   and the CLI handlers where context matters more than matching on variants
//!
//! The runner's public functions return `std::result::Result<_, ShellOutError>` so
//! callers can tell "the shell never started" apart from "the program ran and failed".
//!
//! ## Examples
//!
//! ```rust
//! use shellout::{ShellOutError, shell_out_blocking, ShellCommand, RunOptions};
//!
//! # fn demo(command: ShellCommand) {
//! match shell_out_blocking(&command, RunOptions::default()) {
//!     Ok(output) => println!("{}", output),
//!     Err(ShellOutError::Failed(failure)) => {
//!         eprintln!("exit {}: {}", failure.status, failure.message());
//!     }
//!     Err(other) => eprintln!("could not run: {}", other),
//! }
//! # }
//! ```
//!
use std::fmt;
use std::io;
use thiserror::Error;

/// Errors produced while building or running a shell command.
#[derive(Error, Debug)]
pub enum ShellOutError {
    /// The program name did not pass the safe-name check.
    #[error("Invalid command name '{name}': {reason}")]
    InvalidCommandName { name: String, reason: String },

    /// The shell could not be started, so no pipes or buffers exist.
    #[error("Failed to spawn shell '{shell}': {source}")]
    SpawnFailed {
        shell: String,
        #[source]
        source: io::Error,
    },

    /// Reading one of the child's output pipes failed.
    #[error("Failed to read {stream} of child process: {source}")]
    Drain {
        stream: StreamKind,
        #[source]
        source: io::Error,
    },

    /// Waiting for the child to terminate failed.
    #[error("Failed to wait for child process: {source}")]
    Wait {
        #[source]
        source: io::Error,
    },

    /// The program ran and exited with a nonzero status.
    #[error("{0}")]
    Failed(ShellOutFailure),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ShellOutError {
    /// Returns the structured failure if the program ran and exited nonzero.
    pub fn failure(&self) -> Option<&ShellOutFailure> {
        match self {
            ShellOutError::Failed(failure) => Some(failure),
            _ => None,
        }
    }
}

/// Identifies one of the two captured output streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamKind {
    Stdout,
    Stderr,
}

impl fmt::Display for StreamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamKind::Stdout => f.write_str("stdout"),
            StreamKind::Stderr => f.write_str("stderr"),
        }
    }
}

/// A command that ran to completion but reported failure through its exit status.
///
/// The raw bytes of both streams are kept untouched; `message()` and `output()`
/// give the decoded, newline-trimmed text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellOutFailure {
    /// Exit status of the shell. On Unix a signal-terminated child reports `128 + signal`.
    pub status: i32,
    /// Everything the child wrote to standard output.
    pub output: Vec<u8>,
    /// Everything the child wrote to standard error.
    pub error: Vec<u8>,
}

impl ShellOutFailure {
    /// Standard error decoded as text.
    pub fn message(&self) -> String {
        decode_trimmed(&self.error)
    }

    /// Standard output decoded as text.
    pub fn output(&self) -> String {
        decode_trimmed(&self.output)
    }
}

impl fmt::Display for ShellOutFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ShellOut encountered an error\nStatus code: {}\nMessage: \"{}\"\nOutput: \"{}\"",
            self.status,
            self.message(),
            self.output()
        )
    }
}

/// Decodes captured bytes as UTF-8 and strips exactly one trailing `\n`.
///
/// Invalid UTF-8 degrades to an empty string rather than an error.
pub fn decode_trimmed(bytes: &[u8]) -> String {
    let text = match std::str::from_utf8(bytes) {
        Ok(text) => text,
        Err(_) => return String::new(),
    };
    text.strip_suffix('\n').unwrap_or(text).to_string()
}

/// Type alias for Result using anyhow::Error for application-level code.
pub type Result<T> = anyhow::Result<T>;
