pub mod assert_expr;
pub mod attrset;
pub mod expr;
pub mod function;
pub mod if_expr;
pub mod inherit;
pub mod let_expr;
pub mod list;
pub mod operators;
pub mod string;
pub mod with;

use lexer::{
    Input, LexError, LexResult, RESERVED_WORDS, Trivia, at_keyword, is_identifier_start,
    lex_identifier, lex_keyword, lex_trivia,
};
use log::trace;

use crate::{ParseOptions, cst::*};

use super::diagnostics::{Diagnostic, Expected, Failure, Furthest};

pub type PResult<T> = Result<T, Failure>;

pub struct Parser<'a> {
    input: Input<'a>,
    options: ParseOptions,
    depth: usize,
    /// names of the rules currently being parsed, outermost first
    rules: Vec<&'static str>,
    furthest: Furthest,
}

impl<'a> Parser<'a> {
    pub fn new(input: Input<'a>, options: ParseOptions) -> Self {
        Self {
            input,
            options,
            depth: 0,
            rules: Vec::new(),
            furthest: Furthest::default(),
        }
    }

    pub fn parse_root(&mut self) -> PResult<Root<'a>> {
        self.rule("root", |p| {
            let leading = p.trivia();
            let expr = if p.input.is_at_end() {
                None
            } else {
                Some(p.parse_expr()?)
            };
            let trailing = p.trivia();
            if !p.input.is_at_end() {
                return p.fail(Expected::EndOfInput);
            }
            Ok(Root {
                leading,
                expr,
                trailing,
            })
        })
    }

    pub fn into_diagnostic(self) -> Diagnostic {
        let position = self.input.position_of(self.furthest.offset());
        self.furthest.into_diagnostic(self.input.source(), position)
    }

    /// run `f` as the named rule, so failures inside it are reported with it.
    fn rule<T>(&mut self, name: &'static str, f: impl FnOnce(&mut Self) -> PResult<T>) -> PResult<T> {
        trace!("{name} at byte {}", self.input.offset());
        self.rules.push(name);
        let res = f(self);
        self.rules.pop();
        res
    }

    /// run `f` one nesting level deeper, aborting the parse past the configured limit.
    fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> PResult<T>) -> PResult<T> {
        if self.depth >= self.options.max_depth {
            return Err(Failure::Abort {
                offset: self.input.offset(),
            });
        }
        self.depth += 1;
        let res = f(self);
        self.depth -= 1;
        res
    }

    #[cold]
    fn record_at(&mut self, offset: usize, expected: Expected) {
        self.furthest.record(offset, &self.rules, expected);
    }

    fn record(&mut self, expected: Expected) {
        self.record_at(self.input.offset(), expected);
    }

    #[cold]
    fn fail<T>(&mut self, expected: Expected) -> PResult<T> {
        self.record(expected);
        Err(Failure::Mismatch)
    }

    fn record_lex_error(&mut self, e: &LexError) {
        self.record_at(e.offset(), e.into());
    }

    fn offset(&self) -> usize {
        self.input.offset()
    }

    fn reset(&mut self, offset: usize) {
        self.input.reset(offset);
    }

    /// trivia at the cursor, empty if there is none.
    fn trivia(&mut self) -> Trivia<'a> {
        lex_trivia(&mut self.input).unwrap_or_default()
    }

    /// consume `token` if the input continues with it.
    /// A miss is recorded as an expectation.
    fn eat(&mut self, token: &'static str) -> bool {
        if self.input.eat(token) {
            true
        } else {
            self.record(Expected::Token(token));
            false
        }
    }

    fn expect(&mut self, token: &'static str) -> PResult<()> {
        if self.eat(token) {
            Ok(())
        } else {
            Err(Failure::Mismatch)
        }
    }

    fn at_keyword(&self, keyword: &str) -> bool {
        at_keyword(&self.input, keyword)
    }

    fn eat_keyword(&mut self, keyword: &'static str) -> bool {
        if lex_keyword(&mut self.input, keyword) {
            true
        } else {
            self.record(Expected::Keyword(keyword));
            false
        }
    }

    fn expect_keyword(&mut self, keyword: &'static str) -> PResult<()> {
        if self.eat_keyword(keyword) {
            Ok(())
        } else {
            Err(Failure::Mismatch)
        }
    }

    fn identifier(&mut self) -> PResult<&'a str> {
        match lex_identifier(&mut self.input) {
            Ok(ident) => Ok(ident),
            Err(e) => {
                self.record_lex_error(&e);
                Err(Failure::Mismatch)
            }
        }
    }

    /// run a terminal recognizer.
    /// `NoMatch` stays silent so the caller can try the next alternative,
    /// other lexical errors are recorded.
    fn lexed<T>(&mut self, lex: impl FnOnce(&mut Input<'a>) -> LexResult<T>) -> Option<T> {
        match lex(&mut self.input) {
            Ok(res) => Some(res),
            Err(LexError::NoMatch { .. }) => None,
            Err(e) => {
                self.record_lex_error(&e);
                None
            }
        }
    }

    /// run a terminal recognizer whose failure only means another term
    /// starts here, as for `a/ b` or `1/ 2`. Nothing is recorded.
    fn attempted<T>(&mut self, lex: impl FnOnce(&mut Input<'a>) -> LexResult<T>) -> Option<T> {
        lex(&mut self.input).ok()
    }

    /// could a term (a select-level operand) start at the cursor?
    fn at_term_start(&self) -> bool {
        match self.input.get(0) {
            Some(b'(' | b'"' | b'[' | b'{' | b'0'..=b'9') => true,
            Some(b'\'') => self.input.get(1) == Some(b'\''),
            Some(b'.') => matches!(self.input.get(1), Some(b'.' | b'/' | b'0'..=b'9')),
            Some(b'~') => self.input.get(1) == Some(b'/'),
            Some(b'/') => self.input.get(1).is_some_and(lexer::is_path_char),
            Some(b'<') => operators::starts_search_path(&self.input),
            Some(c) if is_identifier_start(c) => !RESERVED_WORDS
                .iter()
                .any(|word| *word != "rec" && self.at_keyword(word)),
            _ => false,
        }
    }

    fn expr(&self, start: usize, kind: ExprKind<'a>) -> Expr<'a> {
        Expr {
            span: self.input.span_from(start),
            kind,
        }
    }
}
