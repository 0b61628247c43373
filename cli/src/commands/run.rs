//! # ShellOut Run Handler
//!
//! File: cli/src/commands/run.rs
//!
//! ## Overview
//!
//! Implements `shellout run`, which runs a program through the configured
//! shell and prints its captured standard output.
//!
//! ## Usage
//!
//! ```bash
//! # Arguments are quoted: the shell sees one argument "hello world"
//! shellout run echo "hello world"
//!
//! # Run in another directory with an extra variable
//! shellout run -C ~/src/project -e RUST_LOG=debug cargo test
//!
//! # Pass shell syntax through untouched
//! shellout run --verbatim ls -la '|' wc -l
//!
//! # Stream output while it is captured
//! shellout run --tee make
//! ```
//!
use super::{command_from, execute, parse_env_pair};
use shellout::core::error::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

/// # Run Arguments (`RunArgs`)
#[derive(Parser, Debug)]
#[command(about = "Run a program through the shell and print its output")]
pub struct RunArgs {
    /// Directory to run the program in.
    #[arg(long, short = 'C', default_value = ".")]
    at: PathBuf,

    /// Extra environment variable for the child, as KEY=VALUE. Repeatable.
    #[arg(long = "env", short = 'e', value_parser = parse_env_pair)]
    env: Vec<(String, String)>,

    /// Stream the child's output to the terminal while capturing it.
    #[arg(long)]
    tee: bool,

    /// Insert arguments into the command line unescaped.
    #[arg(long)]
    verbatim: bool,

    /// Program to run.
    program: String,

    /// Arguments for the program.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

/// Handles `shellout run`.
pub async fn handle_run(args: RunArgs) -> Result<()> {
    info!(
        "Handling run command for '{}' ({} args, verbatim: {})",
        args.program,
        args.args.len(),
        args.verbatim
    );
    let command = command_from(&args.program, &args.args, args.verbatim)?;
    execute(&command, &args.at, &args.env, args.tee).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_args_parsing() {
        let args = RunArgs::try_parse_from([
            "run", "-C", "/tmp", "-e", "A=1", "--env", "B=2", "--tee", "git", "log", "--oneline",
        ])
        .unwrap();
        assert_eq!(args.at, PathBuf::from("/tmp"));
        assert_eq!(
            args.env,
            vec![("A".to_string(), "1".to_string()), ("B".to_string(), "2".to_string())]
        );
        assert!(args.tee);
        assert!(!args.verbatim);
        assert_eq!(args.program, "git");
        assert_eq!(args.args, vec!["log", "--oneline"]);
    }

    #[test]
    fn test_run_args_requires_program() {
        assert!(RunArgs::try_parse_from(["run"]).is_err());
    }

    #[test]
    fn test_run_args_rejects_malformed_env() {
        assert!(RunArgs::try_parse_from(["run", "-e", "NOEQUALS", "ls"]).is_err());
    }
}
