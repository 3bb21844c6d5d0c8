//! Tokenizer for turtle command lines
//!
//! Splits a raw line on single spaces into a command name and its raw
//! argument tokens. Consecutive spaces yield empty tokens, which the parser
//! later rejects as invalid arguments.

/// A command line split into name and argument tokens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizedLine {
    /// Command name, lower-cased
    pub name: String,
    /// Positional argument tokens, verbatim
    pub args: Vec<String>,
}

impl TokenizedLine {
    /// Create a new tokenized line
    pub fn new(name: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }
}

/// Tokenize a turtle command line
pub fn tokenize(source_line: &str) -> TokenizedLine {
    let mut parts = source_line.split(' ');
    let name = parts.next().unwrap_or_default().to_lowercase();
    let args = parts.map(str::to_string).collect();
    TokenizedLine::new(name, args)
}
