//! # ShellOut Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! This file is the entry point of the `shellout` binary. It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Routing execution to the command handlers
//! - Turning a failed child process into this process's exit status
//!
//! ## Architecture
//!
//! Each top-level command (`run`, `line`, `git`, `fs`) is a variant of the
//! `Commands` enum and maps to a handler in `commands::*`. The handlers
//! delegate to the `shellout` library. All errors are propagated to this level.
//!
//! When the child exits nonzero, the failure (status, error output and
//! standard output) is printed to stderr and `shellout` exits with the child's
//! status. Any other error prints `Error: ...` and exits with status 1.
//!
//! ## Examples
//!
//! ```bash
//! # Get help
//! shellout --help
//!
//! # Run a command with increased verbosity
//! shellout -vv run ls -la
//! ```
//!
use clap::Parser;
use shellout::ShellOutError;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

/// Top-level command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "shellout",
    about = "Run command-line programs through the shell with safely quoted arguments",
    long_about = "Compose shell command lines from quoted or verbatim arguments, run them,\n\
                  and capture standard output and standard error concurrently.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

/// All available top-level commands.
#[derive(Parser, Debug)]
enum Commands {
    #[command(alias = "r")]
    Run(commands::run::RunArgs),
    #[command(alias = "l")]
    Line(commands::line::LineArgs),
    #[command(alias = "g", about = "Run catalog git commands")]
    Git(commands::git::GitArgs),
    #[command(about = "Run catalog filesystem commands")]
    Fs(commands::fs::FsArgs),
}

/// Maps a child's status onto a valid process exit code.
fn exit_code_for(status: i32) -> i32 {
    if (1..=255).contains(&status) {
        status
    } else {
        1
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let command_result = match cli.command {
        Commands::Run(args) => commands::run::handle_run(args).await,
        Commands::Line(args) => commands::line::handle_line(args).await,
        Commands::Git(args) => commands::git::handle_git(args).await,
        Commands::Fs(args) => commands::fs::handle_fs(args).await,
    };

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        if let Some(failure) = e.downcast_ref::<ShellOutError>().and_then(|err| err.failure()) {
            eprintln!("{}", failure);
            std::process::exit(exit_code_for(failure.status));
        }
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_for() {
        assert_eq!(exit_code_for(7), 7);
        assert_eq!(exit_code_for(137), 137);
        assert_eq!(exit_code_for(0), 1);
        assert_eq!(exit_code_for(-1), 1);
        assert_eq!(exit_code_for(300), 1);
    }

    #[test]
    fn test_cli_routes_subcommands() {
        let cli = Cli::try_parse_from(["shellout", "-vv", "run", "echo", "hi"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Run(_)));
        let cli = Cli::try_parse_from(["shellout", "l", "ls"]).unwrap();
        assert!(matches!(cli.command, Commands::Line(_)));
    }
}
