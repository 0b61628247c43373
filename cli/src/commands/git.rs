//! # ShellOut Git Command Group
//!
//! File: cli/src/commands/git.rs
//!
//! ## Overview
//!
//! Exposes the git entries of the command catalog as `shellout git <subcommand>`.
//! Each subcommand builds a catalog `ShellCommand` and runs it through the same
//! path as `shellout run`.
//!
//! ## Usage
//!
//! ```bash
//! shellout git -C ~/src/project commit -m "Update docs"
//! shellout git clone https://github.com/example/repo.git checkout-dir --no-prompt
//! shellout git submodule-update
//! ```
//!
use super::execute;
use clap::{Parser, Subcommand};
use shellout::catalog::git::{self, GitOptions};
use shellout::core::error::Result;
use shellout::ShellCommand;
use std::path::PathBuf;

/// # Git Command Group Arguments (`GitArgs`)
#[derive(Parser, Debug)]
pub struct GitArgs {
    /// Repository directory to run in.
    #[arg(long, short = 'C', default_value = ".")]
    at: PathBuf,

    /// Stream git's output to the terminal while capturing it.
    #[arg(long)]
    tee: bool,

    #[command(subcommand)]
    command: GitCommand,
}

/// Flags shared by networked git subcommands.
#[derive(Parser, Debug, Clone, Copy)]
struct PromptArgs {
    /// Fail instead of prompting for credentials.
    #[arg(long)]
    no_prompt: bool,
    /// Show git's progress output instead of passing --quiet.
    #[arg(long)]
    verbose_git: bool,
}

impl From<PromptArgs> for GitOptions {
    fn from(args: PromptArgs) -> Self {
        GitOptions {
            allowing_prompt: !args.no_prompt,
            quiet: !args.verbose_git,
        }
    }
}

/// # Git Subcommands (`GitCommand`)
#[derive(Subcommand, Debug)]
enum GitCommand {
    /// `git init`
    Init,
    /// `git clone <url> [path]`
    Clone {
        url: String,
        path: Option<PathBuf>,
        #[command(flatten)]
        prompt: PromptArgs,
    },
    /// `git add . && git commit -a -m <message>`
    Commit {
        #[arg(short, long)]
        message: String,
        #[command(flatten)]
        prompt: PromptArgs,
    },
    /// `git push [remote [branch]]`
    Push {
        remote: Option<String>,
        branch: Option<String>,
        #[command(flatten)]
        prompt: PromptArgs,
    },
    /// `git pull [remote [branch]]`
    Pull {
        remote: Option<String>,
        branch: Option<String>,
        #[command(flatten)]
        prompt: PromptArgs,
    },
    /// `git checkout <branch>`
    Checkout { branch: String },
    /// `git submodule update --init --recursive`
    SubmoduleUpdate {
        /// Do not pass --init.
        #[arg(long)]
        no_init: bool,
        /// Do not pass --recursive.
        #[arg(long)]
        no_recursive: bool,
        #[command(flatten)]
        prompt: PromptArgs,
    },
}

impl GitCommand {
    fn into_shell_command(self) -> ShellCommand {
        match self {
            GitCommand::Init => git::init(),
            GitCommand::Clone { url, path, prompt } => {
                git::clone(&url, path.as_deref(), prompt.into())
            }
            GitCommand::Commit { message, prompt } => git::commit(&message, prompt.into()),
            GitCommand::Push {
                remote,
                branch,
                prompt,
            } => git::push(remote.as_deref(), branch.as_deref(), prompt.into()),
            GitCommand::Pull {
                remote,
                branch,
                prompt,
            } => git::pull(remote.as_deref(), branch.as_deref(), prompt.into()),
            GitCommand::Checkout { branch } => git::checkout(&branch, true),
            GitCommand::SubmoduleUpdate {
                no_init,
                no_recursive,
                prompt,
            } => git::submodule_update(!no_init, !no_recursive, prompt.into()),
        }
    }
}

/// Handles `shellout git`.
pub async fn handle_git(args: GitArgs) -> Result<()> {
    let command = args.command.into_shell_command();
    execute(&command, &args.at, &[], args.tee).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(words: &[&str]) -> GitArgs {
        GitArgs::try_parse_from(words).unwrap()
    }

    #[test]
    fn test_parses_commit() {
        let args = parse(&["git", "-C", "/repo", "commit", "-m", "msg", "--no-prompt"]);
        assert_eq!(args.at, PathBuf::from("/repo"));
        assert_eq!(
            args.command.into_shell_command().to_string(),
            "env GIT_TERMINAL_PROMPT=0 git add . && env GIT_TERMINAL_PROMPT=0 git commit -a -m \"msg\" --quiet"
        );
    }

    #[test]
    fn test_parses_clone_with_path() {
        let args = parse(&["git", "clone", "https://example.com/r.git", "dest", "--verbose-git"]);
        assert_eq!(
            args.command.into_shell_command().to_string(),
            "git clone \"https://example.com/r.git\" \"dest\""
        );
    }

    #[test]
    fn test_parses_submodule_update_flags() {
        let args = parse(&["git", "submodule-update", "--no-recursive"]);
        assert_eq!(
            args.command.into_shell_command().to_string(),
            "git submodule update --init --quiet"
        );
    }

    #[test]
    fn test_commit_requires_message() {
        assert!(GitArgs::try_parse_from(["git", "commit"]).is_err());
    }
}
