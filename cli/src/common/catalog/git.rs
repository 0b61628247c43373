//! # Git Commands (`common::catalog::git`)
//!
//! File: cli/src/common/catalog/git.rs
//!
//! Pre-built `git` invocations. When `allowing_prompt` is false the command is
//! run as `env GIT_TERMINAL_PROMPT=0 git ...`, so a missing credential fails
//! the command instead of hanging on a terminal prompt.
//!
use crate::common::process::{Argument, SafeCommandName, ShellCommand};
use std::path::Path;

/// Options shared by the networked / mutating git commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GitOptions {
    /// Let git prompt on the terminal for credentials.
    pub allowing_prompt: bool,
    /// Append `--quiet`.
    pub quiet: bool,
}

impl Default for GitOptions {
    fn default() -> Self {
        Self {
            allowing_prompt: true,
            quiet: true,
        }
    }
}

impl GitOptions {
    /// Options for unattended use: no prompts, quiet output.
    pub fn non_interactive() -> Self {
        Self {
            allowing_prompt: false,
            quiet: true,
        }
    }
}

fn git(allowing_prompt: bool) -> ShellCommand {
    if allowing_prompt {
        ShellCommand::new(SafeCommandName::trusted("git"))
    } else {
        ShellCommand::new(SafeCommandName::trusted("env"))
            .verbatim("GIT_TERMINAL_PROMPT=0")
            .verbatim("git")
    }
}

/// The `git` prefix as a verbatim token, for commands chained after `&&`.
fn git_token(allowing_prompt: bool) -> Argument {
    if allowing_prompt {
        Argument::verbatim("git")
    } else {
        Argument::verbatim("env GIT_TERMINAL_PROMPT=0 git")
    }
}

fn quiet(command: ShellCommand, options: GitOptions) -> ShellCommand {
    if options.quiet {
        command.verbatim("--quiet")
    } else {
        command
    }
}

/// `git init`
pub fn init() -> ShellCommand {
    git(true).verbatim("init")
}

/// `git clone <url> [<path>]`
pub fn clone(url: &str, to: Option<&Path>, options: GitOptions) -> ShellCommand {
    let mut command = git(options.allowing_prompt).verbatim("clone").arg(url);
    if let Some(path) = to {
        command = command.arg(path.to_string_lossy().into_owned());
    }
    quiet(command, options)
}

/// `git add . && git commit -a -m <message>`
pub fn commit(message: &str, options: GitOptions) -> ShellCommand {
    let command = git(options.allowing_prompt)
        .verbatim("add .")
        .verbatim("&&")
        .arg(git_token(options.allowing_prompt))
        .verbatim("commit -a -m")
        .arg(message);
    quiet(command, options)
}

/// `git push [<remote> [<branch>]]`
pub fn push(remote: Option<&str>, branch: Option<&str>, options: GitOptions) -> ShellCommand {
    let command = git(options.allowing_prompt)
        .verbatim("push")
        .args(remote)
        .args(branch);
    quiet(command, options)
}

/// `git pull [<remote> [<branch>]]`
pub fn pull(remote: Option<&str>, branch: Option<&str>, options: GitOptions) -> ShellCommand {
    let command = git(options.allowing_prompt)
        .verbatim("pull")
        .args(remote)
        .args(branch);
    quiet(command, options)
}

/// `git submodule update [--init] [--recursive]`
pub fn submodule_update(initialize: bool, recursive: bool, options: GitOptions) -> ShellCommand {
    let mut command = git(options.allowing_prompt).verbatim("submodule update");
    if initialize {
        command = command.verbatim("--init");
    }
    if recursive {
        command = command.verbatim("--recursive");
    }
    quiet(command, options)
}

/// `git checkout <branch>`
pub fn checkout(branch: &str, quiet_output: bool) -> ShellCommand {
    quiet(
        git(true).verbatim("checkout").arg(branch),
        GitOptions {
            allowing_prompt: true,
            quiet: quiet_output,
        },
    )
}

/// `git rev-parse HEAD`
pub fn current_commit() -> ShellCommand {
    git(true).verbatim("rev-parse HEAD")
}

/// `git rev-parse --abbrev-ref HEAD`
pub fn current_branch() -> ShellCommand {
    git(true).verbatim("rev-parse --abbrev-ref HEAD")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(command: ShellCommand) -> String {
        command.command_line().into_string()
    }

    #[test]
    fn test_init() {
        assert_eq!(line(init()), "git init");
    }

    #[test]
    fn test_clone_with_path_and_prompt_disabled() {
        assert_eq!(
            line(clone(
                "https://github.com/example/repo.git",
                Some(Path::new("my repo")),
                GitOptions::non_interactive()
            )),
            "env GIT_TERMINAL_PROMPT=0 git clone \"https://github.com/example/repo.git\" \"my repo\" --quiet"
        );
    }

    #[test]
    fn test_commit_chains_add_and_quotes_message() {
        assert_eq!(
            line(commit("Fix \"quoting\" in $PATH", GitOptions::default())),
            "git add . && git commit -a -m \"Fix \\\"quoting\\\" in \\$PATH\" --quiet"
        );
        assert_eq!(
            line(commit("m", GitOptions { allowing_prompt: false, quiet: false })),
            "env GIT_TERMINAL_PROMPT=0 git add . && env GIT_TERMINAL_PROMPT=0 git commit -a -m \"m\""
        );
    }

    #[test]
    fn test_push_and_pull() {
        assert_eq!(line(push(None, None, GitOptions::default())), "git push --quiet");
        assert_eq!(
            line(pull(Some("origin"), Some("main"), GitOptions::default())),
            "git pull \"origin\" \"main\" --quiet"
        );
    }

    #[test]
    fn test_submodule_update() {
        assert_eq!(
            line(submodule_update(true, true, GitOptions::default())),
            "git submodule update --init --recursive --quiet"
        );
        assert_eq!(
            line(submodule_update(false, false, GitOptions { quiet: false, ..Default::default() })),
            "git submodule update"
        );
    }

    #[test]
    fn test_checkout_and_rev_parse() {
        assert_eq!(line(checkout("feature/x", true)), "git checkout \"feature/x\" --quiet");
        assert_eq!(line(checkout("main", false)), "git checkout \"main\"");
        assert_eq!(line(current_commit()), "git rev-parse HEAD");
        assert_eq!(line(current_branch()), "git rev-parse --abbrev-ref HEAD");
    }
}
