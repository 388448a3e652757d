use std::fmt::Display;

mod lexer;

pub use lexer::{
    ident::{RESERVED_WORDS, at_keyword, lex_identifier, lex_keyword, reserved_word},
    input::Input,
    literals::{Number, Uri, lex_number, lex_uri},
    path::{Path, PathKind, lex_path},
    trivia::{Trivia, TriviaPiece, lex_trivia},
    util::{is_identifier_char, is_identifier_start, is_path_char},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct SourcePosition {
    pub line: u32,
    pub column: u32,
}
impl Display for SourcePosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{}:{}", self.line, self.column))
    }
}

/// A half-open byte range into the parsed buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// The smallest span covering both `self` and `other`.
    pub fn to(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

/// The broad class of a failure, used to group diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureKind {
    /// No terminal form matches at the position.
    Lexical,
    /// A required delimiter, separator or closing token is missing.
    Structural,
    /// The input is lexically fine but collides with a reserved word
    /// or an operator rule.
    Ambiguity,
}

#[derive(Debug, PartialEq, Eq, Clone, thiserror::Error)]
pub enum LexError {
    #[error("Expected {expected} at byte {offset}")]
    NoMatch {
        expected: &'static str,
        offset: usize,
    },
    #[error("Found the reserved word `{word}` where an identifier was expected at byte {offset}")]
    Reserved { word: &'static str, offset: usize },
    #[error("Found an empty path segment at byte {offset}")]
    EmptyPathSegment { offset: usize },
}

impl LexError {
    pub fn offset(&self) -> usize {
        match self {
            LexError::NoMatch { offset, .. }
            | LexError::Reserved { offset, .. }
            | LexError::EmptyPathSegment { offset } => *offset,
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            LexError::NoMatch { .. } | LexError::EmptyPathSegment { .. } => FailureKind::Lexical,
            LexError::Reserved { .. } => FailureKind::Ambiguity,
        }
    }
}

pub type LexResult<T> = Result<T, LexError>;
