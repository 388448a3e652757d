use super::operators::SELECT_TERM_BP;
use super::*;

impl<'a> Parser<'a> {
    /// parse a list expression.
    /// elements are select-level terms separated by nothing but trivia.
    pub fn parse_list(&mut self) -> PResult<List<'a>> {
        self.rule("list", |p| {
            p.expect("[")?;
            let after_open = p.trivia();
            let mut elements = Vec::new();
            while !p.eat("]") {
                let expr = p.parse_with_bindingpower(SELECT_TERM_BP)?;
                let trailing = p.trivia();
                elements.push(ListElement { expr, trailing });
            }
            Ok(List {
                after_open,
                elements,
            })
        })
    }
}
