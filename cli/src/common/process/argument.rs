//! # Argument Tokens (`common::process::argument`)
//!
//! File: cli/src/common/process/argument.rs
//!
//! ## Overview
//!
//! Every argument handed to the command builder is an `Argument`: either
//! `Quoted` text that is escaped and double-quoted before it reaches the shell,
//! or `Verbatim` text that is inserted as-is so it can carry shell syntax
//! (`&&`, redirections, pre-quoted fragments).
//!
//! Plain strings convert into `Quoted`. Getting a `Verbatim` token always takes
//! an explicit `Argument::verbatim(..)` call, so escaping cannot be skipped by
//! accident.
//!
//! ## Escaping
//!
//! Inside POSIX double quotes the shell still interprets `\`, `"`, `$` and
//! `` ` ``. Each of those is prefixed with a backslash; everything else,
//! including spaces, newlines and `;|&<>*?'`, is literal inside the quotes.
//!
//! ```rust
//! use shellout::Argument;
//!
//! assert_eq!(Argument::from("a \"b\"").render(), r#""a \"b\"""#);
//! assert_eq!(Argument::verbatim("&&").render(), "&&");
//! ```
//!
use std::borrow::Cow;
use std::fmt;

/// One unit of an argument list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Argument {
    /// Text that is escaped and wrapped in double quotes.
    Quoted(String),
    /// Text inserted into the command line unchanged.
    Verbatim(String),
}

impl Argument {
    /// Creates a token that will be quoted.
    pub fn quoted(text: impl Into<String>) -> Self {
        Argument::Quoted(text.into())
    }

    /// Creates a token that is passed to the shell unescaped.
    pub fn verbatim(text: impl Into<String>) -> Self {
        Argument::Verbatim(text.into())
    }

    /// The text as supplied by the caller, before any escaping.
    pub fn as_str(&self) -> &str {
        match self {
            Argument::Quoted(text) | Argument::Verbatim(text) => text,
        }
    }

    /// Renders the token as it appears in a command line.
    pub fn render(&self) -> Cow<'_, str> {
        match self {
            Argument::Quoted(text) => Cow::Owned(quote(text)),
            Argument::Verbatim(text) => Cow::Borrowed(text),
        }
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl From<&str> for Argument {
    fn from(text: &str) -> Self {
        Argument::Quoted(text.to_string())
    }
}

impl From<String> for Argument {
    fn from(text: String) -> Self {
        Argument::Quoted(text)
    }
}

impl From<&String> for Argument {
    fn from(text: &String) -> Self {
        Argument::Quoted(text.clone())
    }
}

/// Wraps `text` in double quotes, escaping the characters the shell still
/// interprets inside them.
pub fn quote(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for c in text.chars() {
        if matches!(c, '"' | '\\' | '$' | '`') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

/// Escapes the spaces of a path with backslashes, leaving everything else alone.
///
/// Only spaces are handled. Quotes and other metacharacters in a directory
/// name pass through unescaped.
pub fn escape_spaces(path: &str) -> String {
    path.replace(' ', "\\ ")
}
