use super::*;

impl<'a> Parser<'a> {
    /// parse an inherit clause, without its terminating semicolon.
    pub fn parse_inherit(&mut self) -> PResult<Inherit<'a>> {
        self.rule("inherit", |p| {
            p.expect_keyword("inherit")?;

            let checkpoint = p.offset();
            let before_open = p.trivia();
            let source = if p.eat("(") {
                let after_open = p.trivia();
                let expr = p.parse_expr()?;
                let before_close = p.trivia();
                p.expect(")")?;
                Some(InheritSource {
                    before_open,
                    after_open,
                    expr: Box::new(expr),
                    before_close,
                })
            } else {
                p.reset(checkpoint);
                None
            };

            let mut names = Vec::new();
            loop {
                let checkpoint = p.offset();
                let leading = p.trivia();
                match lex_identifier(&mut p.input) {
                    Ok(name) => names.push(InheritName { leading, name }),
                    Err(e) => {
                        p.record_lex_error(&e);
                        p.reset(checkpoint);
                        break;
                    }
                }
            }

            Ok(Inherit { source, names })
        })
    }
}
