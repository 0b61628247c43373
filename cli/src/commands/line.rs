//! # ShellOut Line Handler
//!
//! File: cli/src/commands/line.rs
//!
//! Implements `shellout line`, which prints the command line `shellout run`
//! would hand to the shell, without running anything.
//!
//! ```bash
//! $ shellout line echo 'say "hi"'
//! echo "say \"hi\""
//! $ shellout line -C "my dir" ls
//! cd my\ dir && ls
//! ```
//!
use super::command_from;
use shellout::core::error::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "Print the composed command line without running it")]
pub struct LineArgs {
    /// Prefix the line with a change into this directory.
    #[arg(long, short = 'C')]
    at: Option<PathBuf>,

    /// Insert arguments into the command line unescaped.
    #[arg(long)]
    verbatim: bool,

    /// Program name.
    program: String,

    /// Arguments for the program.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

/// Handles `shellout line`.
pub async fn handle_line(args: LineArgs) -> Result<()> {
    let command = command_from(&args.program, &args.args, args.verbatim)?;
    let line = match &args.at {
        Some(dir) => command.command_line_in(dir),
        None => command.command_line(),
    };
    println!("{}", line);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_args_parsing() {
        let args = LineArgs::try_parse_from(["line", "--verbatim", "echo", "-n", "x"]).unwrap();
        assert!(args.verbatim);
        assert!(args.at.is_none());
        assert_eq!(args.program, "echo");
        assert_eq!(args.args, vec!["-n", "x"]);
    }
}
