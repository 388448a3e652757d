use lexer::{Trivia, lex_identifier, lex_number, lex_path, lex_trivia, lex_uri};

use super::operators::{PREFIX_MAX_BP, call_binding_power, peek_binary, peek_unary};
use super::*;

impl<'a> Parser<'a> {
    /// parse a full expression, including the keyword forms
    /// (`let`, `if`, `assert`, `with`) that may not appear as operands.
    pub fn parse_expr(&mut self) -> PResult<Expr<'a>> {
        self.rule("expression", |p| {
            let start = p.offset();
            let kind = if p.at_keyword("let") {
                ExprKind::Let(p.nested(Self::parse_let)?)
            } else if p.at_keyword("if") {
                ExprKind::If(p.nested(Self::parse_if)?)
            } else if p.at_keyword("assert") {
                ExprKind::Assert(p.nested(Self::parse_assert)?)
            } else if p.at_keyword("with") {
                ExprKind::With(p.nested(Self::parse_with)?)
            } else {
                return p.parse_with_bindingpower(0);
            };
            Ok(p.expr(start, kind))
        })
    }

    pub fn parse_with_bindingpower(&mut self, min_bp: u8) -> PResult<Expr<'a>> {
        self.nested(|p| p.climb(min_bp))
    }

    fn climb(&mut self, min_bp: u8) -> PResult<Expr<'a>> {
        let mut lhs = match peek_unary(&self.input) {
            Some(op) if min_bp <= PREFIX_MAX_BP => self.parse_unary(op)?,
            _ => self.parse_term()?,
        };
        // the operator that produced `lhs` in this loop, for non-associativity checks
        let mut previous: Option<BinaryOperator> = None;

        loop {
            let checkpoint = self.offset();
            let gap = self.trivia();

            let (select_bp, _) = BinaryOperator::Select.binding_power();
            if lhs.is_select() && select_bp >= min_bp && self.at_keyword("or") {
                lhs = self.parse_or_default(lhs, gap)?;
                previous = None;
                continue;
            }

            if let Some(op) = peek_binary(&self.input) {
                let (l_bp, r_bp) = op.binding_power();
                if l_bp < min_bp {
                    self.reset(checkpoint);
                    break;
                }
                if op.is_non_associative() && previous.is_some_and(|prev| prev.level() == op.level()) {
                    return self.fail(Expected::Unchained(op.symbol()));
                }
                self.input.consume(op.symbol().len());
                let after_op = self.trivia();
                let right = match op {
                    BinaryOperator::Select => self.parse_attr_name_expr()?,
                    BinaryOperator::HasAttr => self.parse_attr_path_expr()?,
                    _ => self.parse_with_bindingpower(r_bp)?,
                };
                lhs = binary(op, lhs, gap, after_op, right);
                previous = Some(op);
                continue;
            }

            let (call_l_bp, call_r_bp) = call_binding_power();
            if call_l_bp >= min_bp && self.at_term_start() {
                let argument = self.parse_with_bindingpower(call_r_bp)?;
                lhs = Expr {
                    span: lhs.span.to(argument.span),
                    kind: ExprKind::Call(Call {
                        callee: Box::new(lhs),
                        gap,
                        argument: Box::new(argument),
                    }),
                };
                previous = None;
                continue;
            }

            self.reset(checkpoint);
            break;
        }

        Ok(lhs)
    }

    fn parse_unary(&mut self, op: UnaryOperator) -> PResult<Expr<'a>> {
        let start = self.offset();
        self.input.consume(op.symbol().len());
        let after_op = self.trivia();
        let operand = self.parse_with_bindingpower(op.operand_bp())?;
        Ok(self.expr(
            start,
            ExprKind::Unary(UnaryOp {
                op,
                after_op,
                operand: Box::new(operand),
            }),
        ))
    }

    /// parse the fallback of a select.
    /// assumes the cursor is at the `or` keyword.
    fn parse_or_default(&mut self, selection: Expr<'a>, before_or: Trivia<'a>) -> PResult<Expr<'a>> {
        self.rule("or default", |p| {
            p.expect_keyword("or")?;
            let after_or = p.trivia();
            // the fallback is a select-level term: `a.b or c.d`, but not `a.b or f x`
            let (select_bp, _) = BinaryOperator::Select.binding_power();
            let default = p.parse_with_bindingpower(select_bp)?;
            Ok(Expr {
                span: selection.span.to(default.span),
                kind: ExprKind::OrDefault(OrDefault {
                    selection: Box::new(selection),
                    before_or,
                    after_or,
                    default: Box::new(default),
                }),
            })
        })
    }

    /// parse a single attribute name as an expression, the right-hand side of `.`
    fn parse_attr_name_expr(&mut self) -> PResult<Expr<'a>> {
        let start = self.offset();
        let kind = match self.parse_attr_name()? {
            AttrName::Identifier(ident) => ExprKind::Identifier(ident),
            AttrName::String(string) => ExprKind::String(string),
            AttrName::Splice(splice) => ExprKind::Splice(splice),
        };
        Ok(self.expr(start, kind))
    }

    /// parse an attribute path as a chain of selects, the right-hand side of `?`
    fn parse_attr_path_expr(&mut self) -> PResult<Expr<'a>> {
        self.rule("attribute path", |p| {
            let mut path = p.parse_attr_name_expr()?;
            loop {
                let checkpoint = p.offset();
                let before_dot = p.trivia();
                if peek_binary(&p.input) != Some(BinaryOperator::Select) {
                    p.reset(checkpoint);
                    return Ok(path);
                }
                p.input.consume(1);
                let after_dot = p.trivia();
                let name = p.parse_attr_name_expr()?;
                path = binary(BinaryOperator::Select, path, before_dot, after_dot, name);
            }
        })
    }

    /// parse a term: a literal, identifier, list, set, function or
    /// parenthesized expression.
    pub fn parse_term(&mut self) -> PResult<Expr<'a>> {
        let start = self.offset();
        let kind = match self.input.get(0) {
            Some(b'(') => ExprKind::Parenthesized(self.parse_parenthesized()?),
            Some(b'"') => ExprKind::String(self.parse_string()?),
            Some(b'\'') if self.input.get(1) == Some(b'\'') => {
                ExprKind::IndentedString(self.parse_indented_string()?)
            }
            Some(b'[') => ExprKind::List(self.parse_list()?),
            Some(b'{') => {
                if self.at_destructured_function() {
                    ExprKind::Function(self.parse_function()?)
                } else {
                    ExprKind::Set(self.parse_set()?)
                }
            }
            Some(b'<' | b'~' | b'/') => match self.lexed(lex_path) {
                Some(path) => ExprKind::Path(path),
                None => return self.fail(Expected::Class("path")),
            },
            Some(c @ (b'0'..=b'9' | b'.')) => {
                // `1/ 2` is a division, but `./` can only be a broken path
                let path = if c == b'.' {
                    self.lexed(lex_path)
                } else {
                    self.attempted(lex_path)
                };
                if let Some(path) = path {
                    ExprKind::Path(path)
                } else if let Some(number) = self.lexed(lex_number) {
                    ExprKind::Number(number)
                } else {
                    return self.fail(Expected::Class("expression"));
                }
            }
            Some(c) if is_identifier_start(c) => self.parse_word_term()?,
            _ => return self.fail(Expected::Class("expression")),
        };
        Ok(self.expr(start, kind))
    }

    /// terms starting with a letter or underscore.
    fn parse_word_term(&mut self) -> PResult<ExprKind<'a>> {
        if let Some(uri) = self.attempted(lex_uri) {
            return Ok(ExprKind::Uri(uri));
        }
        if let Some(path) = self.attempted(lex_path) {
            return Ok(ExprKind::Path(path));
        }
        if self.at_simple_function() {
            return Ok(ExprKind::Function(self.parse_function()?));
        }
        if self.at_keyword("rec") {
            return Ok(ExprKind::Set(self.parse_set()?));
        }
        for (keyword, kind) in [
            ("null", ExprKind::Null),
            ("true", ExprKind::Boolean(true)),
            ("false", ExprKind::Boolean(false)),
        ] {
            if lex_keyword(&mut self.input, keyword) {
                return Ok(kind);
            }
        }
        match self.identifier() {
            Ok(ident) => Ok(ExprKind::Identifier(ident)),
            Err(e) => {
                self.record(Expected::Class("expression"));
                Err(e)
            }
        }
    }

    /// parse a parenthesized expression.
    fn parse_parenthesized(&mut self) -> PResult<Parenthesized<'a>> {
        self.rule("parenthesized expression", |p| {
            p.expect("(")?;
            let after_open = p.trivia();
            let inner = p.parse_expr()?;
            let before_close = p.trivia();
            p.expect(")")?;
            Ok(Parenthesized {
                after_open,
                inner: Box::new(inner),
                before_close,
            })
        })
    }

    /// does an identifier followed by `:` or `@` start here?
    fn at_simple_function(&self) -> bool {
        let mut ahead = self.input;
        if lex_identifier(&mut ahead).is_err() {
            return false;
        }
        lex_trivia(&mut ahead);
        matches!(ahead.get(0), Some(b':' | b'@'))
    }

    /// does the `{` at the cursor open a destructuring pattern rather than a set?
    fn at_destructured_function(&self) -> bool {
        let mut ahead = self.input;
        ahead.consume(1);
        lex_trivia(&mut ahead);
        if ahead.matches("...") {
            return true;
        }
        if !ahead.matches("}") {
            if lex_identifier(&mut ahead).is_err() {
                return false;
            }
            lex_trivia(&mut ahead);
            match ahead.get(0) {
                Some(b',' | b'?') => return true,
                Some(b'}') => {}
                _ => return false,
            }
        }
        // `{}` or `{ name }`: a pattern only if a colon or alias follows
        ahead.consume(1);
        lex_trivia(&mut ahead);
        matches!(ahead.get(0), Some(b':' | b'@'))
    }
}

fn binary<'a>(
    op: BinaryOperator,
    left: Expr<'a>,
    before_op: Trivia<'a>,
    after_op: Trivia<'a>,
    right: Expr<'a>,
) -> Expr<'a> {
    Expr {
        span: left.span.to(right.span),
        kind: ExprKind::Binary(BinaryOp {
            op,
            left: Box::new(left),
            before_op,
            after_op,
            right: Box::new(right),
        }),
    }
}
