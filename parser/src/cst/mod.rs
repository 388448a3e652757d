//! The concrete syntax tree.
//!
//! Nodes keep every piece of trivia found between their tokens, so writing a
//! tree back out with [`Display`](std::fmt::Display) reproduces the parsed
//! source byte for byte. Trivia is owned by the innermost node that has a
//! token on both sides of it; a node never starts or ends with trivia, and
//! the [`Root`] holds whatever surrounds the top-level expression.
//!
//! Fixed tokens (keywords, punctuation, operator symbols) are implied by the
//! node type and not stored.

pub use lexer::{Number, Path, PathKind, SourcePosition, Span, Trivia, TriviaPiece, Uri};

pub mod impls;
pub mod outline;

#[derive(Debug, PartialEq, Clone)]
pub struct Root<'a> {
    pub leading: Trivia<'a>,
    /// `None` for an empty (or trivia-only) buffer.
    pub expr: Option<Expr<'a>>,
    pub trailing: Trivia<'a>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct Expr<'a> {
    pub span: Span,
    pub kind: ExprKind<'a>,
}

#[derive(Debug, PartialEq, Clone)]
pub enum ExprKind<'a> {
    Number(Number<'a>),
    String(QuotedString<'a>),
    IndentedString(IndentedString<'a>),
    Uri(Uri<'a>),
    Path(Path<'a>),
    Identifier(&'a str),
    Boolean(bool),
    Null,
    List(List<'a>),
    Set(Set<'a>),
    Let(LetExpr<'a>),
    Function(Function<'a>),
    If(IfExpr<'a>),
    Assert(AssertExpr<'a>),
    With(WithExpr<'a>),
    Unary(UnaryOp<'a>),
    Binary(BinaryOp<'a>),
    Call(Call<'a>),
    OrDefault(OrDefault<'a>),
    Parenthesized(Parenthesized<'a>),
    /// A `${...}` used as an attribute name after `.` or `?`.
    Splice(Splice<'a>),
}

/// `${ expr }`
#[derive(Debug, PartialEq, Clone)]
pub struct Splice<'a> {
    pub after_open: Trivia<'a>,
    pub expr: Box<Expr<'a>>,
    pub before_close: Trivia<'a>,
}

#[derive(Debug, PartialEq, Clone)]
pub enum StringPart<'a> {
    Literal(&'a str),
    /// A backslash and the single character following it.
    Escape(char),
    Splice(Splice<'a>),
}

#[derive(Debug, PartialEq, Clone, Default)]
pub struct QuotedString<'a> {
    pub parts: Vec<StringPart<'a>>,
}

#[derive(Debug, PartialEq, Clone)]
pub enum IndentedPart<'a> {
    /// Raw text, newlines and indentation included.
    Literal(&'a str),
    /// `'''`, standing for `''`
    EscapedQuote,
    /// `''$`, standing for `$`
    EscapedDollar,
    /// `''\` and the character following it.
    Escape(char),
    Splice(Splice<'a>),
}

#[derive(Debug, PartialEq, Clone, Default)]
pub struct IndentedString<'a> {
    pub parts: Vec<IndentedPart<'a>>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct List<'a> {
    pub after_open: Trivia<'a>,
    pub elements: Vec<ListElement<'a>>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct ListElement<'a> {
    pub expr: Expr<'a>,
    pub trailing: Trivia<'a>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct Set<'a> {
    /// `Some` if the set is introduced by `rec`, holding the trivia after it.
    pub rec: Option<Trivia<'a>>,
    pub after_open: Trivia<'a>,
    pub bindings: Vec<Terminated<'a>>,
}

/// A binding together with its closing `;`.
#[derive(Debug, PartialEq, Clone)]
pub struct Terminated<'a> {
    pub binding: Binding<'a>,
    pub before_semicolon: Trivia<'a>,
    pub after_semicolon: Trivia<'a>,
}

#[derive(Debug, PartialEq, Clone)]
pub enum Binding<'a> {
    Pair(Pair<'a>),
    Inherit(Inherit<'a>),
}

/// `path = value`
#[derive(Debug, PartialEq, Clone)]
pub struct Pair<'a> {
    pub path: AttrPath<'a>,
    pub before_eq: Trivia<'a>,
    pub after_eq: Trivia<'a>,
    pub value: Expr<'a>,
}

/// `a`, `a.b`, `"a".${b}`
#[derive(Debug, PartialEq, Clone)]
pub struct AttrPath<'a> {
    pub first: AttrName<'a>,
    pub rest: Vec<AttrPathSegment<'a>>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct AttrPathSegment<'a> {
    pub before_dot: Trivia<'a>,
    pub after_dot: Trivia<'a>,
    pub name: AttrName<'a>,
}

#[derive(Debug, PartialEq, Clone)]
pub enum AttrName<'a> {
    Identifier(&'a str),
    String(QuotedString<'a>),
    Splice(Splice<'a>),
}

/// `inherit (source) names...`
#[derive(Debug, PartialEq, Clone)]
pub struct Inherit<'a> {
    pub source: Option<InheritSource<'a>>,
    /// May be empty.
    pub names: Vec<InheritName<'a>>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct InheritSource<'a> {
    pub before_open: Trivia<'a>,
    pub after_open: Trivia<'a>,
    pub expr: Box<Expr<'a>>,
    pub before_close: Trivia<'a>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct InheritName<'a> {
    pub leading: Trivia<'a>,
    pub name: &'a str,
}

#[derive(Debug, PartialEq, Clone)]
pub struct LetExpr<'a> {
    pub after_let: Trivia<'a>,
    pub bindings: Vec<Terminated<'a>>,
    pub after_in: Trivia<'a>,
    pub body: Box<Expr<'a>>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct Function<'a> {
    pub pattern: Pattern<'a>,
    pub before_colon: Trivia<'a>,
    pub after_colon: Trivia<'a>,
    pub body: Box<Expr<'a>>,
}

#[derive(Debug, PartialEq, Clone)]
pub enum Pattern<'a> {
    Simple(&'a str),
    Destructured(Destructured<'a>),
}

/// `{ a, b ? 1, ... }`, optionally aliased with `name@` or `@name`.
#[derive(Debug, PartialEq, Clone)]
pub struct Destructured<'a> {
    pub alias: Option<Alias<'a>>,
    pub after_open: Trivia<'a>,
    pub fields: Vec<PatternField<'a>>,
    /// `Some` if the pattern ends in `...`, holding the trivia after it.
    pub ellipsis: Option<Trivia<'a>>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct PatternField<'a> {
    pub name: &'a str,
    pub after_name: Trivia<'a>,
    pub default: Option<PatternDefault<'a>>,
    /// `Some` if a comma follows, holding the trivia after the comma.
    pub comma: Option<Trivia<'a>>,
}

/// `? expr`
#[derive(Debug, PartialEq, Clone)]
pub struct PatternDefault<'a> {
    pub after_question: Trivia<'a>,
    pub value: Box<Expr<'a>>,
    pub after_value: Trivia<'a>,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum AliasPlacement {
    /// `name@{ ... }`
    Before,
    /// `{ ... }@name`
    After,
}

#[derive(Debug, PartialEq, Clone)]
pub struct Alias<'a> {
    pub name: &'a str,
    pub placement: AliasPlacement,
    pub before_at: Trivia<'a>,
    pub after_at: Trivia<'a>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct IfExpr<'a> {
    pub after_if: Trivia<'a>,
    pub condition: Box<Expr<'a>>,
    pub before_then: Trivia<'a>,
    pub after_then: Trivia<'a>,
    pub then_branch: Box<Expr<'a>>,
    pub before_else: Trivia<'a>,
    pub after_else: Trivia<'a>,
    pub else_branch: Box<Expr<'a>>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct AssertExpr<'a> {
    pub after_assert: Trivia<'a>,
    pub condition: Box<Expr<'a>>,
    pub before_semicolon: Trivia<'a>,
    pub after_semicolon: Trivia<'a>,
    pub body: Box<Expr<'a>>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct WithExpr<'a> {
    pub after_with: Trivia<'a>,
    pub scope: Box<Expr<'a>>,
    pub before_semicolon: Trivia<'a>,
    pub after_semicolon: Trivia<'a>,
    pub body: Box<Expr<'a>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Negate,
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Select,
    Concat,
    Mul,
    Div,
    Add,
    Sub,
    Merge,
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Neq,
    And,
    Or,
    Implies,
    HasAttr,
}

#[derive(Debug, PartialEq, Clone)]
pub struct UnaryOp<'a> {
    pub op: UnaryOperator,
    pub after_op: Trivia<'a>,
    pub operand: Box<Expr<'a>>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct BinaryOp<'a> {
    pub op: BinaryOperator,
    pub left: Box<Expr<'a>>,
    pub before_op: Trivia<'a>,
    pub after_op: Trivia<'a>,
    pub right: Box<Expr<'a>>,
}

/// Function application by juxtaposition.
#[derive(Debug, PartialEq, Clone)]
pub struct Call<'a> {
    pub callee: Box<Expr<'a>>,
    /// Whatever separates callee and argument, possibly nothing (`f(x)`).
    pub gap: Trivia<'a>,
    pub argument: Box<Expr<'a>>,
}

/// `a.b or fallback`
#[derive(Debug, PartialEq, Clone)]
pub struct OrDefault<'a> {
    /// Always a [`BinaryOperator::Select`] expression.
    pub selection: Box<Expr<'a>>,
    pub before_or: Trivia<'a>,
    pub after_or: Trivia<'a>,
    pub default: Box<Expr<'a>>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct Parenthesized<'a> {
    pub after_open: Trivia<'a>,
    pub inner: Box<Expr<'a>>,
    pub before_close: Trivia<'a>,
}
