use memchr::{memchr2, memchr3};

use super::*;

impl<'a> Parser<'a> {
    /// parse a double-quoted string.
    pub fn parse_string(&mut self) -> PResult<QuotedString<'a>> {
        self.rule("string", |p| {
            p.expect("\"")?;
            let mut parts = Vec::new();
            let mut literal_start = p.offset();

            loop {
                let Some(idx) = memchr3(b'"', b'\\', b'$', p.input.bytes()) else {
                    p.input.consume_rest();
                    return p.fail(Expected::Token("\""));
                };
                match p.input.get(idx) {
                    Some(b'"') => {
                        p.input.consume(idx);
                        p.push_literal(&mut parts, literal_start, StringPart::Literal);
                        p.input.consume(1);
                        return Ok(QuotedString { parts });
                    }
                    Some(b'\\') => {
                        p.input.consume(idx);
                        p.push_literal(&mut parts, literal_start, StringPart::Literal);
                        p.input.consume(1);
                        let Some(escaped) = p.input.consume_char() else {
                            return p.fail(Expected::Class("escaped character"));
                        };
                        parts.push(StringPart::Escape(escaped));
                        literal_start = p.offset();
                    }
                    _ => match p.input.get(idx + 1) {
                        Some(b'{') => {
                            p.input.consume(idx);
                            p.push_literal(&mut parts, literal_start, StringPart::Literal);
                            parts.push(StringPart::Splice(p.parse_splice()?));
                            literal_start = p.offset();
                        }
                        // `$${` stays literal
                        Some(b'$') => {
                            p.input.consume(idx + 2);
                        }
                        _ => {
                            p.input.consume(idx + 1);
                        }
                    },
                }
            }
        })
    }

    /// parse an indented (`''`-delimited) string.
    /// the raw text is kept as is, indentation included.
    pub fn parse_indented_string(&mut self) -> PResult<IndentedString<'a>> {
        self.rule("indented string", |p| {
            p.expect("''")?;
            let mut parts = Vec::new();
            let mut literal_start = p.offset();

            loop {
                let Some(idx) = memchr2(b'\'', b'$', p.input.bytes()) else {
                    p.input.consume_rest();
                    return p.fail(Expected::Token("''"));
                };
                p.input.consume(idx);
                let escape = if p.input.matches("'''") {
                    Some(IndentedPart::EscapedQuote)
                } else if p.input.matches("''$") {
                    Some(IndentedPart::EscapedDollar)
                } else if p.input.matches("''\\") {
                    None
                } else if p.input.matches("''") {
                    p.push_literal(&mut parts, literal_start, IndentedPart::Literal);
                    p.input.consume(2);
                    return Ok(IndentedString { parts });
                } else if p.input.matches("${") {
                    p.push_literal(&mut parts, literal_start, IndentedPart::Literal);
                    parts.push(IndentedPart::Splice(p.parse_splice()?));
                    literal_start = p.offset();
                    continue;
                } else {
                    // a lone `'`, a lone `$` or `$$`
                    let len = if p.input.matches("$$") { 2 } else { 1 };
                    p.input.consume(len);
                    continue;
                };

                p.push_literal(&mut parts, literal_start, IndentedPart::Literal);
                p.input.consume(3);
                let part = match escape {
                    Some(part) => part,
                    None => match p.input.consume_char() {
                        Some(escaped) => IndentedPart::Escape(escaped),
                        None => return p.fail(Expected::Class("escaped character")),
                    },
                };
                parts.push(part);
                literal_start = p.offset();
            }
        })
    }

    /// parse an interpolation `${ expr }`.
    pub fn parse_splice(&mut self) -> PResult<Splice<'a>> {
        self.rule("interpolation", |p| {
            p.expect("${")?;
            let after_open = p.trivia();
            let expr = p.parse_expr()?;
            let before_close = p.trivia();
            p.expect("}")?;
            Ok(Splice {
                after_open,
                expr: Box::new(expr),
                before_close,
            })
        })
    }

    /// push the text between `start` and the cursor, if there is any.
    fn push_literal<P>(&self, parts: &mut Vec<P>, start: usize, literal: impl FnOnce(&'a str) -> P) {
        let text = self.input.slice(self.input.span_from(start));
        if !text.is_empty() {
            parts.push(literal(text));
        }
    }
}
