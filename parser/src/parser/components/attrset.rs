use super::*;

impl<'a> Parser<'a> {
    /// parse an attribute set, optionally introduced by `rec`.
    pub fn parse_set(&mut self) -> PResult<Set<'a>> {
        self.rule("set", |p| {
            let rec = if lex_keyword(&mut p.input, "rec") {
                Some(p.trivia())
            } else {
                None
            };
            p.expect("{")?;
            let after_open = p.trivia();
            let bindings = p.parse_bindings(|p| p.eat("}"))?;
            Ok(Set {
                rec,
                after_open,
                bindings,
            })
        })
    }

    /// parse `;`-terminated bindings until `closed` consumes the closing token.
    pub fn parse_bindings(
        &mut self,
        mut closed: impl FnMut(&mut Self) -> bool,
    ) -> PResult<Vec<Terminated<'a>>> {
        let mut bindings = Vec::new();
        while !closed(self) {
            bindings.push(self.parse_terminated()?);
        }
        Ok(bindings)
    }

    fn parse_terminated(&mut self) -> PResult<Terminated<'a>> {
        self.rule("binding", |p| {
            let binding = if p.at_keyword("inherit") {
                Binding::Inherit(p.parse_inherit()?)
            } else {
                Binding::Pair(p.parse_pair()?)
            };
            let before_semicolon = p.trivia();
            p.expect(";")?;
            let after_semicolon = p.trivia();
            Ok(Terminated {
                binding,
                before_semicolon,
                after_semicolon,
            })
        })
    }

    fn parse_pair(&mut self) -> PResult<Pair<'a>> {
        let path = self.parse_attr_path()?;
        let before_eq = self.trivia();
        self.expect("=")?;
        let after_eq = self.trivia();
        let value = self.parse_expr()?;
        Ok(Pair {
            path,
            before_eq,
            after_eq,
            value,
        })
    }

    /// parse a dot-separated attribute path, the key of a binding.
    pub fn parse_attr_path(&mut self) -> PResult<AttrPath<'a>> {
        let first = self.parse_attr_name()?;
        let mut rest = Vec::new();
        loop {
            let checkpoint = self.offset();
            let before_dot = self.trivia();
            if !self.eat(".") {
                self.reset(checkpoint);
                return Ok(AttrPath { first, rest });
            }
            let after_dot = self.trivia();
            let name = self.parse_attr_name()?;
            rest.push(AttrPathSegment {
                before_dot,
                after_dot,
                name,
            });
        }
    }

    /// parse an identifier, a quoted string or an interpolation used as an attribute name.
    pub fn parse_attr_name(&mut self) -> PResult<AttrName<'a>> {
        match self.input.get(0) {
            Some(b'"') => Ok(AttrName::String(self.parse_string()?)),
            Some(b'$') if self.input.get(1) == Some(b'{') => {
                Ok(AttrName::Splice(self.parse_splice()?))
            }
            Some(c) if is_identifier_start(c) => Ok(AttrName::Identifier(self.identifier()?)),
            _ => self.fail(Expected::Class("attribute name")),
        }
    }
}
