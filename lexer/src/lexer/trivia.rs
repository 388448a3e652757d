use std::fmt::{Display, Write};

use memchr::memmem;

use super::input::Input;

/// One insignificant unit of source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriviaPiece<'a> {
    /// A run of spaces and tabs.
    HorizontalSpace(&'a str),
    /// A run of line breaks (`\n`, `\r`).
    VerticalSpace(&'a str),
    /// The text after `#`. The terminating newline is not part of the comment.
    LineComment(&'a str),
    /// The text between `/*` and `*/`.
    /// An unterminated comment runs to the end of the input.
    BlockComment { text: &'a str, terminated: bool },
}

impl Display for TriviaPiece<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TriviaPiece::HorizontalSpace(text) | TriviaPiece::VerticalSpace(text) => {
                f.write_str(text)
            }
            TriviaPiece::LineComment(text) => {
                f.write_char('#')?;
                f.write_str(text)
            }
            TriviaPiece::BlockComment { text, terminated } => {
                f.write_str("/*")?;
                f.write_str(text)?;
                if *terminated {
                    f.write_str("*/")?;
                }
                Ok(())
            }
        }
    }
}

/// Consecutive trivia pieces between two significant tokens.
/// An empty `Trivia` marks an anchor where nothing was found.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Trivia<'a> {
    pub pieces: Vec<TriviaPiece<'a>>,
}

impl<'a> Trivia<'a> {
    pub fn empty() -> Self {
        Self { pieces: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }
}

impl Display for Trivia<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for piece in &self.pieces {
            piece.fmt(f)?;
        }
        Ok(())
    }
}

/// Recognize one or more trivia pieces, merged into a single unit.
/// Returns `None` (and does not move) if there is no trivia at the cursor.
pub fn lex_trivia<'a>(input: &mut Input<'a>) -> Option<Trivia<'a>> {
    let mut pieces = Vec::new();
    while let Some(piece) = lex_trivia_piece(input) {
        pieces.push(piece);
    }
    if pieces.is_empty() {
        None
    } else {
        Some(Trivia { pieces })
    }
}

fn lex_trivia_piece<'a>(input: &mut Input<'a>) -> Option<TriviaPiece<'a>> {
    let piece = match input.get(0)? {
        horizontal_space_pat!() => {
            TriviaPiece::HorizontalSpace(input.consume_while(|c| matches!(c, horizontal_space_pat!())))
        }
        vertical_space_pat!() => {
            TriviaPiece::VerticalSpace(input.consume_while(|c| matches!(c, vertical_space_pat!())))
        }
        b'#' => {
            input.consume(1);
            let text = match memchr::memchr2(b'\n', b'\r', input.bytes()) {
                Some(end) => input.consume(end),
                None => input.consume_rest(),
            };
            TriviaPiece::LineComment(text)
        }
        b'/' if input.get(1) == Some(b'*') => {
            input.consume(2);
            match memmem::find(input.bytes(), b"*/") {
                Some(end) => {
                    let text = input.consume(end);
                    input.consume(2);
                    TriviaPiece::BlockComment {
                        text,
                        terminated: true,
                    }
                }
                None => TriviaPiece::BlockComment {
                    text: input.consume_rest(),
                    terminated: false,
                },
            }
        }
        _ => return None,
    };
    Some(piece)
}
