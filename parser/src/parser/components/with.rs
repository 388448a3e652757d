use super::*;

impl<'a> Parser<'a> {
    /// parse a with expression.
    /// the scope is a full expression, the body extends as far as possible.
    pub fn parse_with(&mut self) -> PResult<WithExpr<'a>> {
        self.rule("with", |p| {
            p.expect_keyword("with")?;
            let after_with = p.trivia();
            let scope = p.parse_expr()?;
            let before_semicolon = p.trivia();
            p.expect(";")?;
            let after_semicolon = p.trivia();
            let body = p.parse_expr()?;
            Ok(WithExpr {
                after_with,
                scope: Box::new(scope),
                before_semicolon,
                after_semicolon,
                body: Box::new(body),
            })
        })
    }
}
