use super::*;

impl<'a> Parser<'a> {
    /// parse a function: a pattern, a colon and the body.
    pub fn parse_function(&mut self) -> PResult<Function<'a>> {
        self.rule("function", |p| {
            let pattern = p.parse_pattern()?;
            let before_colon = p.trivia();
            p.expect(":")?;
            let after_colon = p.trivia();
            let body = p.parse_expr()?;
            Ok(Function {
                pattern,
                before_colon,
                after_colon,
                body: Box::new(body),
            })
        })
    }

    fn parse_pattern(&mut self) -> PResult<Pattern<'a>> {
        if self.input.get(0) == Some(b'{') {
            let mut destructured = self.parse_destructured()?;
            let checkpoint = self.offset();
            let before_at = self.trivia();
            if self.eat("@") {
                let after_at = self.trivia();
                let name = self.identifier()?;
                destructured.alias = Some(Alias {
                    name,
                    placement: AliasPlacement::After,
                    before_at,
                    after_at,
                });
            } else {
                self.reset(checkpoint);
            }
            return Ok(Pattern::Destructured(destructured));
        }

        let name = self.identifier()?;
        let checkpoint = self.offset();
        let before_at = self.trivia();
        if !self.eat("@") {
            self.reset(checkpoint);
            return Ok(Pattern::Simple(name));
        }
        let after_at = self.trivia();
        let mut destructured = self.parse_destructured()?;
        destructured.alias = Some(Alias {
            name,
            placement: AliasPlacement::Before,
            before_at,
            after_at,
        });
        Ok(Pattern::Destructured(destructured))
    }

    /// parse a destructuring pattern `{ a, b ? default, ... }`.
    /// the ellipsis, if present, has to come last.
    fn parse_destructured(&mut self) -> PResult<Destructured<'a>> {
        self.rule("destructuring pattern", |p| {
            p.expect("{")?;
            let after_open = p.trivia();
            let mut fields = Vec::new();
            let mut ellipsis = None;

            loop {
                if p.eat("}") {
                    break;
                }
                if p.eat("...") {
                    ellipsis = Some(p.trivia());
                    p.expect("}")?;
                    break;
                }

                let name = p.identifier()?;
                let after_name = p.trivia();
                let default = if p.eat("?") {
                    let after_question = p.trivia();
                    let value = p.parse_expr()?;
                    let after_value = p.trivia();
                    Some(PatternDefault {
                        after_question,
                        value: Box::new(value),
                        after_value,
                    })
                } else {
                    None
                };
                let comma = if p.eat(",") { Some(p.trivia()) } else { None };
                let last = comma.is_none();
                fields.push(PatternField {
                    name,
                    after_name,
                    default,
                    comma,
                });
                if last {
                    p.expect("}")?;
                    break;
                }
            }

            Ok(Destructured {
                alias: None,
                after_open,
                fields,
                ellipsis,
            })
        })
    }
}
