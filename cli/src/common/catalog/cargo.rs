//! # Cargo Commands (`common::catalog::cargo`)
//!
//! File: cli/src/common/catalog/cargo.rs
//!
//! Package-manager commands for Rust projects.
//!
use crate::common::process::{SafeCommandName, ShellCommand};

/// Kind of package created by `new_package`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageKind {
    Binary,
    Library,
}

/// Build profile for `build` / `test`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuildProfile {
    #[default]
    Debug,
    Release,
}

fn cargo(subcommand: &str) -> ShellCommand {
    ShellCommand::new(SafeCommandName::trusted("cargo")).verbatim(subcommand.to_string())
}

fn with_profile(command: ShellCommand, profile: BuildProfile) -> ShellCommand {
    match profile {
        BuildProfile::Debug => command,
        BuildProfile::Release => command.verbatim("--release"),
    }
}

/// `cargo init --bin|--lib [--name <name>] --vcs none --quiet` in the run directory.
pub fn new_package(kind: PackageKind, name: Option<&str>) -> ShellCommand {
    let flag = match kind {
        PackageKind::Binary => "--bin",
        PackageKind::Library => "--lib",
    };
    let mut command = cargo("init").verbatim(flag);
    if let Some(name) = name {
        command = command.verbatim("--name").arg(name);
    }
    command.verbatim("--vcs none --quiet")
}

/// `cargo build [--release] --quiet`
pub fn build(profile: BuildProfile) -> ShellCommand {
    with_profile(cargo("build"), profile).verbatim("--quiet")
}

/// `cargo test [--release] --quiet`
pub fn test(profile: BuildProfile) -> ShellCommand {
    with_profile(cargo("test"), profile).verbatim("--quiet")
}

/// `cargo run --quiet [-- <arguments...>]`
pub fn run(arguments: &[&str]) -> ShellCommand {
    let command = cargo("run").verbatim("--quiet");
    if arguments.is_empty() {
        command
    } else {
        command.verbatim("--").args(arguments.iter().copied())
    }
}

/// `cargo update --quiet`
pub fn update() -> ShellCommand {
    cargo("update").verbatim("--quiet")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(command: ShellCommand) -> String {
        command.command_line().into_string()
    }

    #[test]
    fn test_new_package() {
        assert_eq!(
            line(new_package(PackageKind::Library, None)),
            "cargo init --lib --vcs none --quiet"
        );
        assert_eq!(
            line(new_package(PackageKind::Binary, Some("my_tool"))),
            "cargo init --bin --name \"my_tool\" --vcs none --quiet"
        );
    }

    #[test]
    fn test_build_test_run_update() {
        assert_eq!(line(build(BuildProfile::Debug)), "cargo build --quiet");
        assert_eq!(line(build(BuildProfile::Release)), "cargo build --release --quiet");
        assert_eq!(line(test(BuildProfile::default())), "cargo test --quiet");
        assert_eq!(line(run(&[])), "cargo run --quiet");
        assert_eq!(line(run(&["--port", "80 80"])), "cargo run --quiet -- \"--port\" \"80 80\"");
        assert_eq!(line(update()), "cargo update --quiet");
    }
}
