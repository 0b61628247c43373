//! # ShellOut Library
//!
//! File: cli/src/lib.rs
//!
//! ## Overview
//!
//! ShellOut runs external command-line programs through the system shell.
//! Arguments are supplied as typed tokens, either quoted (escaped before they
//! reach the shell) or verbatim (inserted as raw shell syntax). The library
//! hands back the program's standard output, or a structured failure holding
//! the exit status and both captured streams.
//!
//! ## Architecture
//!
//! - `common::process`: command builder, process runner, concurrent capture
//! - `common::catalog`: ready-made commands (git, filesystem, cargo)
//! - `core::error`: `ShellOutError` / `ShellOutFailure`
//! - `core::config`: TOML configuration used by the `shellout` binary
//!
//! The most used items are re-exported at the crate root.
//!
//! ## Examples
//!
//! ```rust,no_run
//! use shellout::{shell_out, Argument, RunOptions, ShellCommand};
//!
//! # async fn example() -> Result<(), shellout::ShellOutError> {
//! let greeting = ShellCommand::named("echo")?
//!     .arg("Hello, \"world\"")
//!     .arg(Argument::verbatim("| tr a-z A-Z"));
//! let output = shell_out(&greeting, RunOptions::default()).await?;
//! assert_eq!(output, "HELLO, \"WORLD\"");
//! # Ok(())
//! # }
//! ```
//!
pub mod common;
pub mod core;

pub use crate::common::catalog;
pub use crate::common::process::{
    build, in_directory, shell_out, shell_out_blocking, Argument, CommandLine, DrainStrategy,
    OutputSink, ProcessRunner, RunOptions, SafeCommandName, ShellCommand, Sinks,
};
pub use crate::core::error::{ShellOutError, ShellOutFailure, StreamKind};
