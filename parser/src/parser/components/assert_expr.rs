use super::*;

impl<'a> Parser<'a> {
    pub fn parse_assert(&mut self) -> PResult<AssertExpr<'a>> {
        self.rule("assert", |p| {
            p.expect_keyword("assert")?;
            let after_assert = p.trivia();
            let condition = p.parse_expr()?;
            let before_semicolon = p.trivia();
            p.expect(";")?;
            let after_semicolon = p.trivia();
            let body = p.parse_expr()?;
            Ok(AssertExpr {
                after_assert,
                condition: Box::new(condition),
                before_semicolon,
                after_semicolon,
                body: Box::new(body),
            })
        })
    }
}
