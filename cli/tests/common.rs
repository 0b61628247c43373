//! # ShellOut Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration test crates in `cli/tests/`. Each test
//! file declares `mod common;` and uses what it needs.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use parking_lot::Mutex;
use shellout::{Argument, CommandLine, SafeCommandName, ShellCommand};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

/// Returns an `assert_cmd::Command` for the compiled `shellout` binary.
///
/// The command runs inside `sandbox` with `HOME` and `XDG_CONFIG_HOME`
/// pointing into it, so no user or project configuration leaks into the test.
pub fn shellout_cmd(sandbox: &Path) -> Command {
    let mut cmd = Command::cargo_bin("shellout").expect("Failed to find shellout binary for testing");
    cmd.current_dir(sandbox)
        .env("HOME", sandbox)
        .env("XDG_CONFIG_HOME", sandbox.join(".config"))
        .env_remove("RUST_LOG");
    cmd
}

/// A temporary directory that also acts as a repository root (it contains
/// `.git`), which bounds the project config search.
pub fn sandbox() -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    std::fs::create_dir(dir.path().join(".git")).expect("Failed to create .git");
    dir
}

/// `eval "<script>"`, letting a test run arbitrary shell code through the
/// quoting path.
pub fn script(source: &str) -> ShellCommand {
    ShellCommand::new(SafeCommandName::new("eval").expect("eval is a valid name"))
        .arg(Argument::quoted(source))
}

/// The command line for `script(source)`.
pub fn script_line(source: &str) -> CommandLine {
    script(source).command_line()
}

/// A cloneable in-memory writer, usable as an `OutputSink::Writer`.
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> Vec<u8> {
        self.0.lock().clone()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
