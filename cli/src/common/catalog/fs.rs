//! # Filesystem Commands (`common::catalog::fs`)
//!
//! File: cli/src/common/catalog/fs.rs
//!
//! ## Overview
//!
//! Pre-built commands for common file operations, expressed as shell commands
//! so they compose with the rest of the catalog and run relative to the
//! `RunOptions::at` directory like everything else.
//!
//! All paths are passed as quoted tokens.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use shellout::{catalog::fs, shell_out_blocking, RunOptions};
//!
//! let options = || RunOptions::default().at("/tmp/scratch");
//! shell_out_blocking(&fs::create_folder("notes"), options()).unwrap();
//! shell_out_blocking(&fs::create_file("notes/todo.txt", "buy milk"), options()).unwrap();
//! let text = shell_out_blocking(&fs::read_file("notes/todo.txt"), options()).unwrap();
//! assert_eq!(text, "buy milk");
//! ```
//!
use crate::common::process::{SafeCommandName, ShellCommand};

/// `mkdir -p <name>`
pub fn create_folder(name: &str) -> ShellCommand {
    ShellCommand::new(SafeCommandName::trusted("mkdir"))
        .verbatim("-p")
        .arg(name)
}

/// `printf '%s\n' <contents> > <name>`
///
/// The file ends with a single newline after `contents`, which `read_file`
/// strips again.
pub fn create_file(name: &str, contents: &str) -> ShellCommand {
    ShellCommand::new(SafeCommandName::trusted("printf"))
        .verbatim("'%s\\n'")
        .arg(contents)
        .verbatim(">")
        .arg(name)
}

/// `cat <path>`
pub fn read_file(path: &str) -> ShellCommand {
    ShellCommand::new(SafeCommandName::trusted("cat")).arg(path)
}

/// `mv <from> <to>`
pub fn move_file(from: &str, to: &str) -> ShellCommand {
    ShellCommand::new(SafeCommandName::trusted("mv"))
        .arg(from)
        .arg(to)
}

/// `cp <from> <to>`
pub fn copy_file(from: &str, to: &str) -> ShellCommand {
    ShellCommand::new(SafeCommandName::trusted("cp"))
        .arg(from)
        .arg(to)
}

/// `rm <arguments...> <path>`, e.g. `remove_file("build", &["-rf"])`.
pub fn remove_file(path: &str, arguments: &[&str]) -> ShellCommand {
    ShellCommand::new(SafeCommandName::trusted("rm"))
        .args(arguments.iter().copied())
        .arg(path)
}

/// `ln -s <target> <name>`
pub fn create_symlink(target: &str, name: &str) -> ShellCommand {
    ShellCommand::new(SafeCommandName::trusted("ln"))
        .verbatim("-s")
        .arg(target)
        .arg(name)
}

/// `readlink <path>`
pub fn expand_symlink(path: &str) -> ShellCommand {
    ShellCommand::new(SafeCommandName::trusted("readlink")).arg(path)
}

/// Opens a file with the desktop's default application (`open` on macOS,
/// `xdg-open` elsewhere).
pub fn open_file(path: &str) -> ShellCommand {
    let opener = if cfg!(target_os = "macos") {
        "open"
    } else {
        "xdg-open"
    };
    ShellCommand::new(SafeCommandName::trusted(opener)).arg(path)
}
