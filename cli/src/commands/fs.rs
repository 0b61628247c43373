//! # ShellOut Filesystem Command Group
//!
//! File: cli/src/commands/fs.rs
//!
//! Exposes the filesystem entries of the command catalog as
//! `shellout fs <subcommand>`.
//!
//! ```bash
//! shellout fs -C /tmp create-folder "my notes"
//! shellout fs -C /tmp create-file "my notes/todo.txt" "buy milk"
//! shellout fs -C /tmp read "my notes/todo.txt"
//! shellout fs remove build --recursive --force
//! ```
//!
use super::execute;
use clap::{Parser, Subcommand};
use shellout::catalog::fs;
use shellout::core::error::Result;
use shellout::ShellCommand;
use std::path::PathBuf;

#[derive(Parser, Debug)]
pub struct FsArgs {
    /// Directory paths are relative to.
    #[arg(long, short = 'C', default_value = ".")]
    at: PathBuf,

    #[command(subcommand)]
    command: FsCommand,
}

#[derive(Subcommand, Debug)]
enum FsCommand {
    /// Create a folder (and missing parents).
    CreateFolder { name: String },
    /// Create or overwrite a file with the given contents.
    CreateFile { name: String, contents: String },
    /// Print a file.
    Read { path: String },
    /// Move or rename a file.
    Move { from: String, to: String },
    /// Copy a file.
    Copy { from: String, to: String },
    /// Remove a file or directory.
    Remove {
        path: String,
        #[arg(short, long)]
        recursive: bool,
        #[arg(short, long)]
        force: bool,
    },
    /// Create a symbolic link `name` pointing at `target`.
    Symlink { target: String, name: String },
    /// Print the target of a symbolic link.
    ExpandSymlink { path: String },
    /// Open a file with the desktop's default application.
    Open { path: String },
}

impl FsCommand {
    fn into_shell_command(self) -> ShellCommand {
        match self {
            FsCommand::CreateFolder { name } => fs::create_folder(&name),
            FsCommand::CreateFile { name, contents } => fs::create_file(&name, &contents),
            FsCommand::Read { path } => fs::read_file(&path),
            FsCommand::Move { from, to } => fs::move_file(&from, &to),
            FsCommand::Copy { from, to } => fs::copy_file(&from, &to),
            FsCommand::Remove {
                path,
                recursive,
                force,
            } => {
                let mut flags = Vec::new();
                if recursive {
                    flags.push("-r");
                }
                if force {
                    flags.push("-f");
                }
                fs::remove_file(&path, &flags)
            }
            FsCommand::Symlink { target, name } => fs::create_symlink(&target, &name),
            FsCommand::ExpandSymlink { path } => fs::expand_symlink(&path),
            FsCommand::Open { path } => fs::open_file(&path),
        }
    }
}

/// Handles `shellout fs`.
pub async fn handle_fs(args: FsArgs) -> Result<()> {
    let command = args.command.into_shell_command();
    execute(&command, &args.at, &[], false).await
}
