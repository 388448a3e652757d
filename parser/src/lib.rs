pub mod cst;
pub mod parser;

use std::str::Utf8Error;

use parser::parser_entrypoint;

pub use parser::{Cause, Diagnostic, Expected};

pub type ParseResult<T> = Result<T, ParseError>;

/// Nesting limit used by [`parse_nix`].
pub const DEFAULT_MAX_DEPTH: usize = 128;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// How deeply expressions may nest before the parse is abandoned.
    /// Each parenthesis, list, set, splice, operand and body counts as one level.
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Input is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] Utf8Error),
    #[error("{0}")]
    Syntax(Diagnostic),
    #[error("Expressions nest deeper than {limit} levels at byte {offset}")]
    NestedTooDeep { limit: usize, offset: usize },
    #[error("Could not start the parser thread: {0}")]
    Spawn(String),
}

/// Parse a whole buffer into a concrete syntax tree.
///
/// An empty or trivia-only buffer yields a [`cst::Root`] without an expression.
pub fn parse_nix(input: &[u8]) -> ParseResult<cst::Root<'_>> {
    parse_nix_with(input, ParseOptions::default())
}

pub fn parse_nix_with(input: &[u8], options: ParseOptions) -> ParseResult<cst::Root<'_>> {
    let source = std::str::from_utf8(input)?;
    parser_entrypoint(source, options)
}

#[cfg(test)]
mod tests;
