use std::fmt::{Display, Write};

use crate::{LexError, LexResult};

use super::{input::Input, util::is_path_char};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    /// `foo/bar`, `./foo`, `/abs/olute`
    Plain,
    /// `~/foo`
    Home,
    /// `<nixpkgs/lib>`
    Search,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path<'a> {
    pub kind: PathKind,
    /// The component before the first separator: the (possibly empty)
    /// relative prefix of a plain path, or the first name of a search path.
    /// Always empty for home paths.
    pub head: &'a str,
    /// Every component that follows a `/`.
    pub segments: Vec<&'a str>,
    pub trailing_slash: bool,
}

impl Display for Path<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            PathKind::Plain => {}
            PathKind::Home => f.write_char('~')?,
            PathKind::Search => f.write_char('<')?,
        }
        f.write_str(self.head)?;
        for segment in &self.segments {
            f.write_char('/')?;
            f.write_str(segment)?;
        }
        if self.trailing_slash {
            f.write_char('/')?;
        }
        if self.kind == PathKind::Search {
            f.write_char('>')?;
        }
        Ok(())
    }
}

pub fn lex_path<'a>(input: &mut Input<'a>) -> LexResult<Path<'a>> {
    let mut ahead = *input;
    let path = match ahead.get(0) {
        Some(b'~') => {
            ahead.consume(1);
            lex_separated(&mut ahead, PathKind::Home, "")?
        }
        Some(b'<') => lex_search_path(&mut ahead)?,
        _ => {
            let head = ahead.consume_while(is_path_char);
            lex_separated(&mut ahead, PathKind::Plain, head)?
        }
    };
    *input = ahead;
    Ok(path)
}

/// Lex one or more `/segment` groups and an optional trailing slash.
fn lex_separated<'a>(input: &mut Input<'a>, kind: PathKind, head: &'a str) -> LexResult<Path<'a>> {
    let segments = lex_segments(input);
    if segments.is_empty() {
        return Err(match input.get(0) {
            Some(b'/') => LexError::EmptyPathSegment {
                offset: input.offset() + 1,
            },
            _ => LexError::NoMatch {
                expected: "path",
                offset: input.offset(),
            },
        });
    }
    let trailing_slash = input.eat("/");
    Ok(Path {
        kind,
        head,
        segments,
        trailing_slash,
    })
}

fn lex_search_path<'a>(input: &mut Input<'a>) -> LexResult<Path<'a>> {
    input.consume(1);
    let head = input.consume_while(is_path_char);
    if head.is_empty() {
        return Err(LexError::EmptyPathSegment {
            offset: input.offset(),
        });
    }
    let segments = lex_segments(input);
    match input.get(0) {
        Some(b'>') => {
            input.consume(1);
            Ok(Path {
                kind: PathKind::Search,
                head,
                segments,
                trailing_slash: false,
            })
        }
        Some(b'/') => Err(LexError::EmptyPathSegment {
            offset: input.offset() + 1,
        }),
        _ => Err(LexError::NoMatch {
            expected: "`>`",
            offset: input.offset(),
        }),
    }
}

fn lex_segments<'a>(input: &mut Input<'a>) -> Vec<&'a str> {
    let mut segments = Vec::new();
    while input.get(0) == Some(b'/') && input.get(1).is_some_and(is_path_char) {
        input.consume(1);
        segments.push(input.consume_while(is_path_char));
    }
    segments
}
