//! # ShellOut Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! This module groups the reusable building blocks of ShellOut, kept apart
//! from the clap front end (`commands::`) and the infrastructure (`core::`):
//!
//! - **`process`**: Command-line building, process spawning, concurrent output
//!   capture. This is the part every other piece is layered on.
//! - **`catalog`**: Pre-built command templates (git, filesystem, cargo) that
//!   produce `ShellCommand` values for `process` to run.
//!

/// Pre-built command templates.
pub mod catalog;
/// Building and running shell command lines.
pub mod process;
