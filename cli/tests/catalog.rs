//! # ShellOut Catalog Integration Tests
//!
//! File: cli/tests/catalog.rs
//!
//! Runs catalog commands against a temporary directory. The git tests need
//! a `git` executable and are ignored by default.
//!
mod common;

use shellout::catalog::{fs, git};
use shellout::{shell_out_blocking, RunOptions};
use std::path::Path;
use tempfile::tempdir;

fn at(dir: &Path) -> RunOptions {
    RunOptions::default().at(dir)
}

#[test]
fn test_filesystem_commands_in_directory_with_spaces() {
    let tmp = tempdir().unwrap();
    let root = tmp.path().join("work space");
    std::fs::create_dir(&root).unwrap();

    shell_out_blocking(&fs::create_folder("a/b"), at(&root)).unwrap();
    shell_out_blocking(&fs::create_file("a/b/note.txt", "line $1 \"quoted\""), at(&root)).unwrap();
    assert_eq!(
        shell_out_blocking(&fs::read_file("a/b/note.txt"), at(&root)).unwrap(),
        "line $1 \"quoted\""
    );

    shell_out_blocking(&fs::copy_file("a/b/note.txt", "copy.txt"), at(&root)).unwrap();
    shell_out_blocking(&fs::move_file("copy.txt", "moved.txt"), at(&root)).unwrap();
    assert!(root.join("moved.txt").is_file());
    assert!(!root.join("copy.txt").exists());

    shell_out_blocking(&fs::create_symlink("moved.txt", "link.txt"), at(&root)).unwrap();
    assert_eq!(
        shell_out_blocking(&fs::expand_symlink("link.txt"), at(&root)).unwrap(),
        "moved.txt"
    );

    shell_out_blocking(&fs::remove_file("a", &["-r", "-f"]), at(&root)).unwrap();
    assert!(!root.join("a").exists());
}

#[test]
fn test_reading_missing_file_fails_with_message() {
    let tmp = tempdir().unwrap();
    let err = shell_out_blocking(&fs::read_file("nope.txt"), at(tmp.path())).unwrap_err();
    let failure = err.failure().unwrap();
    assert_ne!(failure.status, 0);
    assert!(failure.message().contains("nope.txt"));
    assert_eq!(failure.output(), "");
}

#[test]
#[ignore = "requires git"]
fn test_git_init_commit_and_branch() {
    let tmp = tempdir().unwrap();
    let repo = tmp.path();
    let options = || {
        RunOptions::default().at(repo).environment(
            std::env::vars()
                .chain([
                    ("GIT_AUTHOR_NAME".to_string(), "Test".to_string()),
                    ("GIT_AUTHOR_EMAIL".to_string(), "test@example.com".to_string()),
                    ("GIT_COMMITTER_NAME".to_string(), "Test".to_string()),
                    ("GIT_COMMITTER_EMAIL".to_string(), "test@example.com".to_string()),
                ])
                .collect(),
        )
    };

    shell_out_blocking(&git::init(), options()).unwrap();
    shell_out_blocking(&fs::create_file("README", "hello"), options()).unwrap();
    shell_out_blocking(
        &git::commit("Initial \"commit\"", git::GitOptions::non_interactive()),
        options(),
    )
    .unwrap();

    let commit = shell_out_blocking(&git::current_commit(), options()).unwrap();
    assert_eq!(commit.len(), 40);
    let branch = shell_out_blocking(&git::current_branch(), options()).unwrap();
    assert!(!branch.is_empty());

    shell_out_blocking(&git::checkout(&branch, true), options()).unwrap();
}
