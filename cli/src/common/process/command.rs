//! # Command Builder (`common::process::command`)
//!
//! File: cli/src/common/process/command.rs
//!
//! ## Overview
//!
//! Turns a validated program name and a list of `Argument` tokens into one
//! shell command line. The builder is pure: no I/O, no shared state.
//!
//! ## Architecture
//!
//! - **`SafeCommandName`**: A program name that passed validation. It is
//!   rendered verbatim, so it may only contain characters that cannot start a
//!   second word or command.
//! - **`CommandLine`**: The finished, immutable shell source.
//! - **`build`**: Renders the name, then each token (quoted or verbatim), joined
//!   by single spaces.
//! - **`in_directory`**: Prefixes a line with `cd <path> && `, escaping spaces in
//!   the path with backslashes.
//! - **`ShellCommand`**: The `(name, arguments)` pair every catalog entry returns.
//!
//! ## Usage
//!
//! ```rust
//! use shellout::{build, Argument, SafeCommandName};
//!
//! let name = SafeCommandName::new("git").unwrap();
//! let line = build(&name, &[Argument::verbatim("commit"), "-m".into(), "fix \"it\"".into()]);
//! assert_eq!(line.as_str(), r#"git commit "-m" "fix \"it\"""#);
//! ```
//!
use super::argument::{escape_spaces, Argument};
use crate::core::error::ShellOutError;
use std::fmt;
use std::path::Path;

/// A program name that can be placed at the head of a command line unescaped.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SafeCommandName(String);

impl SafeCommandName {
    /// Validates `name`.
    ///
    /// Accepted characters are ASCII letters, digits and `_ - . / + : @ % ,`.
    /// Anything that could end the word or start another command (whitespace,
    /// quotes, `;&|<>$` and friends) is rejected, as is the empty string.
    ///
    /// # Errors
    ///
    /// `ShellOutError::InvalidCommandName` naming the offending character.
    pub fn new(name: impl Into<String>) -> Result<Self, ShellOutError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ShellOutError::InvalidCommandName {
                name,
                reason: "name is empty".to_string(),
            });
        }
        if let Some(bad) = name.chars().find(|c| !is_safe_name_char(*c)) {
            return Err(ShellOutError::InvalidCommandName {
                reason: format!("contains {:?}", bad),
                name,
            });
        }
        Ok(SafeCommandName(name))
    }

    /// For names compiled into the catalog.
    pub(crate) fn trusted(name: &'static str) -> Self {
        debug_assert!(
            !name.is_empty() && name.chars().all(is_safe_name_char),
            "catalog command name {:?} is not safe",
            name
        );
        SafeCommandName(name.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_safe_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '/' | '+' | ':' | '@' | '%' | ',')
}

impl fmt::Display for SafeCommandName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for SafeCommandName {
    type Error = ShellOutError;

    fn try_from(name: &str) -> Result<Self, Self::Error> {
        SafeCommandName::new(name)
    }
}

/// Fully composed shell source, ready to be handed to `<shell> -c`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommandLine(String);

impl CommandLine {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CommandLine {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Composes `name` and `args` into a single command line.
///
/// Quoted tokens are escaped and wrapped in double quotes; verbatim tokens are
/// copied unchanged. Tokens are separated by one space, with no trailing space.
pub fn build(name: &SafeCommandName, args: &[Argument]) -> CommandLine {
    let mut line = String::from(name.as_str());
    for arg in args {
        let rendered = arg.render();
        // An empty verbatim token contributes nothing to the line.
        if rendered.is_empty() {
            continue;
        }
        line.push(' ');
        line.push_str(&rendered);
    }
    CommandLine(line)
}

/// Prefixes `line` with a change into `directory`.
///
/// Produces `cd <directory> && <line>` where spaces in the directory are
/// backslash-escaped. Other shell-special characters in the path are not
/// escaped.
pub fn in_directory(directory: &Path, line: &CommandLine) -> CommandLine {
    let path = directory.to_string_lossy();
    CommandLine(format!("cd {} && {}", escape_spaces(&path), line.as_str()))
}

/// A program name plus its argument tokens.
///
/// This is the shape every catalog entry produces; the runner consumes it
/// without looking at what the command means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellCommand {
    pub name: SafeCommandName,
    pub arguments: Vec<Argument>,
}

impl ShellCommand {
    pub fn new(name: SafeCommandName) -> Self {
        Self {
            name,
            arguments: Vec::new(),
        }
    }

    /// Validates `name` and creates a command with no arguments.
    pub fn named(name: &str) -> Result<Self, ShellOutError> {
        SafeCommandName::new(name).map(Self::new)
    }

    /// Appends one argument. Plain strings become quoted tokens.
    pub fn arg(mut self, argument: impl Into<Argument>) -> Self {
        self.arguments.push(argument.into());
        self
    }

    /// Appends several arguments.
    pub fn args<I, A>(mut self, arguments: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<Argument>,
    {
        self.arguments.extend(arguments.into_iter().map(Into::into));
        self
    }

    /// Appends a token that is passed to the shell unescaped.
    pub fn verbatim(self, text: impl Into<String>) -> Self {
        self.arg(Argument::verbatim(text))
    }

    /// Builds the command line for this command.
    pub fn command_line(&self) -> CommandLine {
        build(&self.name, &self.arguments)
    }

    /// Builds the command line prefixed with a change into `directory`.
    pub fn command_line_in(&self, directory: &Path) -> CommandLine {
        in_directory(directory, &self.command_line())
    }
}

impl fmt::Display for ShellCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.command_line().as_str())
    }
}
