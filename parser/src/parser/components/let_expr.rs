use super::*;

impl<'a> Parser<'a> {
    /// parse a let in expression.
    pub fn parse_let(&mut self) -> PResult<LetExpr<'a>> {
        self.rule("let", |p| {
            p.expect_keyword("let")?;
            let after_let = p.trivia();
            let bindings = p.parse_bindings(|p| p.eat_keyword("in"))?;
            let after_in = p.trivia();
            let body = p.parse_expr()?;
            Ok(LetExpr {
                after_let,
                bindings,
                after_in,
                body: Box::new(body),
            })
        })
    }
}
