use super::*;

impl<'a> Parser<'a> {
    pub fn parse_if(&mut self) -> PResult<IfExpr<'a>> {
        self.rule("if", |p| {
            p.expect_keyword("if")?;
            let after_if = p.trivia();
            let condition = p.parse_expr()?;
            let before_then = p.trivia();
            p.expect_keyword("then")?;
            let after_then = p.trivia();
            let then_branch = p.parse_expr()?;
            let before_else = p.trivia();
            p.expect_keyword("else")?;
            let after_else = p.trivia();
            let else_branch = p.parse_expr()?;
            Ok(IfExpr {
                after_if,
                condition: Box::new(condition),
                before_then,
                after_then,
                then_branch: Box::new(then_branch),
                before_else,
                after_else,
                else_branch: Box::new(else_branch),
            })
        })
    }
}
