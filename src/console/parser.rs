//! Command line tokenizer
//!
//! A line splits at its first space into a name and a raw remainder. The
//! remainder is trimmed and cut on spaces and tabs into at most
//! [`MAX_ARGS`] tokens; extra tokens are dropped. Tokens borrow the line.

use heapless::Vec;

/// Maximum number of argument tokens passed to a command or application.
pub const MAX_ARGS: usize = 5;

const SEPARATORS: &[char] = &[' ', '\t'];

/// Argument tokens following the command name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Args<'l> {
    tokens: Vec<&'l str, MAX_ARGS>,
}

impl<'l> Args<'l> {
    /// Argument list with no tokens.
    pub const fn empty() -> Self {
        Self { tokens: Vec::new() }
    }

    /// Tokenize a raw argument string.
    pub fn parse(raw: &'l str) -> Self {
        let mut tokens = Vec::new();
        for token in raw.split(SEPARATORS).filter(|t| !t.is_empty()) {
            if tokens.push(token).is_err() {
                break;
            }
        }
        Self { tokens }
    }

    /// Get argument by index (0-based, the name is not counted)
    pub fn get(&self, idx: usize) -> Option<&'l str> {
        self.tokens.get(idx).copied()
    }

    /// Number of tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether no token followed the name.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// All tokens, in order.
    pub fn as_slice(&self) -> &[&'l str] {
        &self.tokens
    }

    /// Iterate over the tokens.
    pub fn iter(&self) -> impl Iterator<Item = &'l str> + '_ {
        self.tokens.iter().copied()
    }
}

/// A line split into its name and arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine<'l> {
    /// Everything before the first space.
    pub name: &'l str,
    /// Tokens after the name.
    pub args: Args<'l>,
}

/// Split off the name. Returns the name and the trimmed remainder.
pub fn split_name(line: &str) -> (&str, &str) {
    match line.split_once(' ') {
        Some((name, rest)) => (name, rest.trim_matches(SEPARATORS)),
        None => (line, ""),
    }
}

/// Parse a command line into name and arguments
pub fn parse_line(line: &str) -> ParsedLine<'_> {
    let (name, rest) = split_name(line);
    ParsedLine {
        name,
        args: Args::parse(rest),
    }
}
