//! A compact s-expression view of a tree, without trivia.
//!
//! `1 + 1 > 2` renders as `(> (+ 1 1) 2)`. Literals and identifiers render
//! as their source text, parentheses are dropped since the nesting shows them.

use std::fmt::{Display, Write};

use super::*;

pub struct Outline<'r, 'a>(&'r Expr<'a>);

pub struct RootOutline<'r, 'a>(&'r Root<'a>);

impl<'a> Expr<'a> {
    pub fn outline(&self) -> Outline<'_, 'a> {
        Outline(self)
    }
}

impl<'a> Root<'a> {
    /// Empty for a buffer without an expression.
    pub fn outline(&self) -> RootOutline<'_, 'a> {
        RootOutline(self)
    }
}

impl Display for RootOutline<'_, '_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.0.expr {
            Some(expr) => write_expr(f, expr),
            None => Ok(()),
        }
    }
}

impl Display for Outline<'_, '_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write_expr(f, self.0)
    }
}

fn write_expr(f: &mut std::fmt::Formatter<'_>, expr: &Expr<'_>) -> std::fmt::Result {
    match &expr.kind {
        ExprKind::Number(_)
        | ExprKind::String(_)
        | ExprKind::IndentedString(_)
        | ExprKind::Uri(_)
        | ExprKind::Path(_)
        | ExprKind::Identifier(_)
        | ExprKind::Boolean(_)
        | ExprKind::Null => expr.fmt(f),
        ExprKind::List(list) => {
            f.write_char('[')?;
            for (idx, element) in list.elements.iter().enumerate() {
                if idx > 0 {
                    f.write_char(' ')?;
                }
                write_expr(f, &element.expr)?;
            }
            f.write_char(']')
        }
        ExprKind::Set(set) => {
            f.write_str(if set.is_recursive() { "(rec-set" } else { "(set" })?;
            write_bindings(f, &set.bindings)?;
            f.write_char(')')
        }
        ExprKind::Let(let_expr) => {
            f.write_str("(let")?;
            write_bindings(f, &let_expr.bindings)?;
            f.write_char(' ')?;
            write_expr(f, &let_expr.body)?;
            f.write_char(')')
        }
        ExprKind::Function(function) => {
            f.write_str("(fn ")?;
            write_pattern(f, &function.pattern)?;
            f.write_char(' ')?;
            write_expr(f, &function.body)?;
            f.write_char(')')
        }
        ExprKind::If(if_expr) => {
            write_form(f, "if", &[&*if_expr.condition, &*if_expr.then_branch, &*if_expr.else_branch])
        }
        ExprKind::Assert(assert) => write_form(f, "assert", &[&*assert.condition, &*assert.body]),
        ExprKind::With(with) => write_form(f, "with", &[&*with.scope, &*with.body]),
        ExprKind::Unary(op) => write_form(f, op.op.symbol(), &[&*op.operand]),
        ExprKind::Binary(op) => write_form(f, op.op.symbol(), &[&*op.left, &*op.right]),
        ExprKind::Call(call) => write_form(f, "call", &[&*call.callee, &*call.argument]),
        ExprKind::OrDefault(or) => write_form(f, "or", &[&*or.selection, &*or.default]),
        ExprKind::Parenthesized(paren) => write_expr(f, &paren.inner),
        ExprKind::Splice(splice) => {
            f.write_str("${")?;
            write_expr(f, &splice.expr)?;
            f.write_char('}')
        }
    }
}

fn write_form(f: &mut std::fmt::Formatter<'_>, head: &str, operands: &[&Expr<'_>]) -> std::fmt::Result {
    f.write_fmt(format_args!("({head}"))?;
    for operand in operands {
        f.write_char(' ')?;
        write_expr(f, operand)?;
    }
    f.write_char(')')
}

fn write_bindings(f: &mut std::fmt::Formatter<'_>, bindings: &[Terminated<'_>]) -> std::fmt::Result {
    for terminated in bindings {
        f.write_char(' ')?;
        match &terminated.binding {
            Binding::Pair(pair) => {
                f.write_str("(= ")?;
                write_attr_path(f, &pair.path)?;
                f.write_char(' ')?;
                write_expr(f, &pair.value)?;
                f.write_char(')')?;
            }
            Binding::Inherit(inherit) => {
                f.write_str("(inherit")?;
                if let Some(source) = &inherit.source {
                    f.write_str(" (")?;
                    write_expr(f, &source.expr)?;
                    f.write_char(')')?;
                }
                for name in &inherit.names {
                    f.write_fmt(format_args!(" {}", name.name))?;
                }
                f.write_char(')')?;
            }
        }
    }
    Ok(())
}

fn write_attr_path(f: &mut std::fmt::Formatter<'_>, path: &AttrPath<'_>) -> std::fmt::Result {
    for (idx, name) in path.names().enumerate() {
        if idx > 0 {
            f.write_char('.')?;
        }
        match name {
            AttrName::Splice(splice) => {
                f.write_str("${")?;
                write_expr(f, &splice.expr)?;
                f.write_char('}')?;
            }
            _ => name.fmt(f)?,
        }
    }
    Ok(())
}

fn write_pattern(f: &mut std::fmt::Formatter<'_>, pattern: &Pattern<'_>) -> std::fmt::Result {
    let destructured = match pattern {
        Pattern::Simple(name) => return f.write_str(name),
        Pattern::Destructured(destructured) => destructured,
    };
    let alias = destructured.alias.as_ref();
    if let Some(alias) = alias.filter(|alias| alias.placement == AliasPlacement::Before) {
        f.write_fmt(format_args!("{}@", alias.name))?;
    }
    f.write_char('{')?;
    for (idx, field) in destructured.fields.iter().enumerate() {
        if idx > 0 {
            f.write_char(' ')?;
        }
        f.write_str(field.name)?;
        if let Some(default) = &field.default {
            f.write_char('?')?;
            write_expr(f, &default.value)?;
        }
    }
    if destructured.has_ellipsis() {
        if !destructured.fields.is_empty() {
            f.write_char(' ')?;
        }
        f.write_str("...")?;
    }
    f.write_char('}')?;
    if let Some(alias) = alias.filter(|alias| alias.placement == AliasPlacement::After) {
        f.write_fmt(format_args!("@{}", alias.name))?;
    }
    Ok(())
}
