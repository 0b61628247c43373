//! # ShellOut Command Catalog (`common::catalog`)
//!
//! File: cli/src/common/catalog/mod.rs
//!
//! ## Overview
//!
//! Ready-made `ShellCommand` templates for frequent tasks. Every entry is a
//! pure function returning a program name plus argument tokens; nothing here
//! spawns processes or touches shared state. Run the result with
//! `ProcessRunner::shell_out` or the free `shell_out` functions.
//!
//! - **`git`**: init, clone, commit, push, pull, submodule update, checkout, rev-parse.
//! - **`fs`**: create / read / move / copy / remove files, symlinks, open with the desktop.
//! - **`cargo`**: init a package, build, test, run, update.
//!

/// Rust package-manager commands.
pub mod cargo;
/// File and directory commands.
pub mod fs;
/// Version-control commands.
pub mod git;
