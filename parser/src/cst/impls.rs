//! Source reconstruction and helpers.
//!
//! Every `Display` impl writes back exactly the text the node was parsed from.

use std::fmt::{Display, Write};

use super::*;

impl Expr<'_> {
    pub fn is_select(&self) -> bool {
        matches!(
            &self.kind,
            ExprKind::Binary(BinaryOp {
                op: BinaryOperator::Select,
                ..
            })
        )
    }

    /// Line and column of the first character, given the parsed source.
    pub fn position(&self, source: &str) -> SourcePosition {
        lexer::Input::new(source).position_of(self.span.start)
    }
}

impl Set<'_> {
    pub fn is_recursive(&self) -> bool {
        self.rec.is_some()
    }
}

impl Destructured<'_> {
    pub fn has_ellipsis(&self) -> bool {
        self.ellipsis.is_some()
    }
}

impl<'a> AttrName<'a> {
    /// The name, if it is known without evaluation.
    pub fn get_literal(&self) -> Option<&'a str> {
        match self {
            AttrName::Identifier(ident) => Some(ident),
            AttrName::String(QuotedString { parts }) => match parts.as_slice() {
                [] => Some(""),
                [StringPart::Literal(lit)] => Some(lit),
                _ => None,
            },
            AttrName::Splice(_) => None,
        }
    }
}

impl<'a> AttrPath<'a> {
    pub fn names(&self) -> impl Iterator<Item = &AttrName<'a>> {
        std::iter::once(&self.first).chain(self.rest.iter().map(|segment| &segment.name))
    }
}

impl IndentedString<'_> {
    /// The smallest number of leading spaces over all lines that have content.
    /// Whitespace-only lines do not count, an interpolation counts as content.
    pub fn indentation(&self) -> usize {
        let mut min: Option<usize> = None;
        let mut at_line_start = true;
        let mut current = 0;
        fn content_at(current: usize, min: &mut Option<usize>) {
            *min = Some(min.map_or(current, |min| min.min(current)));
        }

        for part in &self.parts {
            match part {
                IndentedPart::Literal(text) => {
                    for c in text.chars() {
                        match (at_line_start, c) {
                            (true, ' ') => current += 1,
                            (_, '\n') => {
                                at_line_start = true;
                                current = 0;
                            }
                            (true, _) => {
                                content_at(current, &mut min);
                                at_line_start = false;
                            }
                            (false, _) => {}
                        }
                    }
                }
                _ => {
                    if at_line_start {
                        content_at(current, &mut min);
                        at_line_start = false;
                    }
                }
            }
        }
        min.unwrap_or(0)
    }
}

impl UnaryOperator {
    pub const fn symbol(self) -> &'static str {
        match self {
            UnaryOperator::Negate => "-",
            UnaryOperator::Not => "!",
        }
    }
}

impl BinaryOperator {
    pub const fn symbol(self) -> &'static str {
        match self {
            BinaryOperator::Select => ".",
            BinaryOperator::Concat => "++",
            BinaryOperator::Mul => "*",
            BinaryOperator::Div => "/",
            BinaryOperator::Add => "+",
            BinaryOperator::Sub => "-",
            BinaryOperator::Merge => "//",
            BinaryOperator::Lt => "<",
            BinaryOperator::Le => "<=",
            BinaryOperator::Gt => ">",
            BinaryOperator::Ge => ">=",
            BinaryOperator::Eq => "==",
            BinaryOperator::Neq => "!=",
            BinaryOperator::And => "&&",
            BinaryOperator::Or => "||",
            BinaryOperator::Implies => "->",
            BinaryOperator::HasAttr => "?",
        }
    }
}

impl Display for Root<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.leading.fmt(f)?;
        if let Some(expr) = &self.expr {
            expr.fmt(f)?;
        }
        self.trailing.fmt(f)
    }
}

impl Display for Expr<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.kind.fmt(f)
    }
}

impl Display for ExprKind<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExprKind::Number(number) => number.fmt(f),
            ExprKind::String(string) => string.fmt(f),
            ExprKind::IndentedString(string) => string.fmt(f),
            ExprKind::Uri(uri) => uri.fmt(f),
            ExprKind::Path(path) => path.fmt(f),
            ExprKind::Identifier(ident) => f.write_str(ident),
            ExprKind::Boolean(true) => f.write_str("true"),
            ExprKind::Boolean(false) => f.write_str("false"),
            ExprKind::Null => f.write_str("null"),
            ExprKind::List(list) => list.fmt(f),
            ExprKind::Set(set) => set.fmt(f),
            ExprKind::Let(let_expr) => let_expr.fmt(f),
            ExprKind::Function(function) => function.fmt(f),
            ExprKind::If(if_expr) => if_expr.fmt(f),
            ExprKind::Assert(assert) => assert.fmt(f),
            ExprKind::With(with) => with.fmt(f),
            ExprKind::Unary(op) => op.fmt(f),
            ExprKind::Binary(op) => op.fmt(f),
            ExprKind::Call(call) => call.fmt(f),
            ExprKind::OrDefault(or) => or.fmt(f),
            ExprKind::Parenthesized(paren) => paren.fmt(f),
            ExprKind::Splice(splice) => splice.fmt(f),
        }
    }
}

impl Display for Splice<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!(
            "${{{}{}{}}}",
            self.after_open, self.expr, self.before_close
        ))
    }
}

impl Display for QuotedString<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_char('"')?;
        for part in &self.parts {
            match part {
                StringPart::Literal(lit) => f.write_str(lit)?,
                StringPart::Escape(c) => {
                    f.write_char('\\')?;
                    f.write_char(*c)?;
                }
                StringPart::Splice(splice) => splice.fmt(f)?,
            }
        }
        f.write_char('"')
    }
}

impl Display for IndentedString<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("''")?;
        for part in &self.parts {
            match part {
                IndentedPart::Literal(lit) => f.write_str(lit)?,
                IndentedPart::EscapedQuote => f.write_str("'''")?,
                IndentedPart::EscapedDollar => f.write_str("''$")?,
                IndentedPart::Escape(c) => {
                    f.write_str("''\\")?;
                    f.write_char(*c)?;
                }
                IndentedPart::Splice(splice) => splice.fmt(f)?,
            }
        }
        f.write_str("''")
    }
}

impl Display for List<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_char('[')?;
        self.after_open.fmt(f)?;
        for element in &self.elements {
            element.expr.fmt(f)?;
            element.trailing.fmt(f)?;
        }
        f.write_char(']')
    }
}

impl Display for Set<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(after_rec) = &self.rec {
            f.write_str("rec")?;
            after_rec.fmt(f)?;
        }
        f.write_char('{')?;
        self.after_open.fmt(f)?;
        for binding in &self.bindings {
            binding.fmt(f)?;
        }
        f.write_char('}')
    }
}

impl Display for Terminated<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.binding {
            Binding::Pair(pair) => pair.fmt(f)?,
            Binding::Inherit(inherit) => inherit.fmt(f)?,
        }
        f.write_fmt(format_args!(
            "{};{}",
            self.before_semicolon, self.after_semicolon
        ))
    }
}

impl Display for Pair<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!(
            "{}{}={}{}",
            self.path, self.before_eq, self.after_eq, self.value
        ))
    }
}

impl Display for AttrPath<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.first.fmt(f)?;
        for segment in &self.rest {
            f.write_fmt(format_args!(
                "{}.{}{}",
                segment.before_dot, segment.after_dot, segment.name
            ))?;
        }
        Ok(())
    }
}

impl Display for AttrName<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttrName::Identifier(ident) => f.write_str(ident),
            AttrName::String(string) => string.fmt(f),
            AttrName::Splice(splice) => splice.fmt(f),
        }
    }
}

impl Display for Inherit<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("inherit")?;
        if let Some(source) = &self.source {
            f.write_fmt(format_args!(
                "{}({}{}{})",
                source.before_open, source.after_open, source.expr, source.before_close
            ))?;
        }
        for name in &self.names {
            f.write_fmt(format_args!("{}{}", name.leading, name.name))?;
        }
        Ok(())
    }
}

impl Display for LetExpr<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("let")?;
        self.after_let.fmt(f)?;
        for binding in &self.bindings {
            binding.fmt(f)?;
        }
        f.write_fmt(format_args!("in{}{}", self.after_in, self.body))
    }
}

impl Display for Function<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!(
            "{}{}:{}{}",
            self.pattern, self.before_colon, self.after_colon, self.body
        ))
    }
}

impl Display for Pattern<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Pattern::Simple(name) => f.write_str(name),
            Pattern::Destructured(destructured) => destructured.fmt(f),
        }
    }
}

impl Display for Destructured<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(alias) = &self.alias
            && alias.placement == AliasPlacement::Before
        {
            f.write_fmt(format_args!(
                "{}{}@{}",
                alias.name, alias.before_at, alias.after_at
            ))?;
        }
        f.write_char('{')?;
        self.after_open.fmt(f)?;
        for field in &self.fields {
            f.write_str(field.name)?;
            field.after_name.fmt(f)?;
            if let Some(default) = &field.default {
                f.write_fmt(format_args!(
                    "?{}{}{}",
                    default.after_question, default.value, default.after_value
                ))?;
            }
            if let Some(after_comma) = &field.comma {
                f.write_char(',')?;
                after_comma.fmt(f)?;
            }
        }
        if let Some(after_ellipsis) = &self.ellipsis {
            f.write_str("...")?;
            after_ellipsis.fmt(f)?;
        }
        f.write_char('}')?;
        if let Some(alias) = &self.alias
            && alias.placement == AliasPlacement::After
        {
            f.write_fmt(format_args!(
                "{}@{}{}",
                alias.before_at, alias.after_at, alias.name
            ))?;
        }
        Ok(())
    }
}

impl Display for IfExpr<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!(
            "if{}{}{}then{}{}{}else{}{}",
            self.after_if,
            self.condition,
            self.before_then,
            self.after_then,
            self.then_branch,
            self.before_else,
            self.after_else,
            self.else_branch
        ))
    }
}

impl Display for AssertExpr<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!(
            "assert{}{}{};{}{}",
            self.after_assert, self.condition, self.before_semicolon, self.after_semicolon, self.body
        ))
    }
}

impl Display for WithExpr<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!(
            "with{}{}{};{}{}",
            self.after_with, self.scope, self.before_semicolon, self.after_semicolon, self.body
        ))
    }
}

impl Display for UnaryOp<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!(
            "{}{}{}",
            self.op.symbol(),
            self.after_op,
            self.operand
        ))
    }
}

impl Display for BinaryOp<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!(
            "{}{}{}{}{}",
            self.left,
            self.before_op,
            self.op.symbol(),
            self.after_op,
            self.right
        ))
    }
}

impl Display for Call<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{}{}{}", self.callee, self.gap, self.argument))
    }
}

impl Display for OrDefault<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!(
            "{}{}or{}{}",
            self.selection, self.before_or, self.after_or, self.default
        ))
    }
}

impl Display for Parenthesized<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!(
            "({}{}{})",
            self.after_open, self.inner, self.before_close
        ))
    }
}
