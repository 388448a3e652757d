use std::fmt::{Display, Write};

use lexer::{FailureKind, LexError, SourcePosition};

/// Something the parser was looking for when it gave up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    /// A fixed delimiter, separator or operator.
    Token(&'static str),
    /// A terminal class such as "identifier" or "expression".
    Class(&'static str),
    Keyword(&'static str),
    EndOfInput,
    /// An identifier was found, but it is this reserved word.
    NotReserved(&'static str),
    /// A non-associative operator was used twice at the same level.
    Unchained(&'static str),
}

impl Expected {
    pub fn kind(&self) -> FailureKind {
        match self {
            Expected::Token(_) | Expected::Keyword(_) | Expected::EndOfInput => {
                FailureKind::Structural
            }
            Expected::Class(_) => FailureKind::Lexical,
            Expected::NotReserved(_) | Expected::Unchained(_) => FailureKind::Ambiguity,
        }
    }
}

impl From<&LexError> for Expected {
    fn from(value: &LexError) -> Self {
        match value {
            LexError::NoMatch { expected, .. } => Expected::Class(expected),
            LexError::Reserved { word, .. } => Expected::NotReserved(word),
            LexError::EmptyPathSegment { .. } => Expected::Class("path segment"),
        }
    }
}

impl Display for Expected {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expected::Token(token) => f.write_fmt(format_args!("`{token}`")),
            Expected::Class(class) => f.write_str(class),
            Expected::Keyword(keyword) => f.write_fmt(format_args!("keyword `{keyword}`")),
            Expected::EndOfInput => f.write_str("end of input"),
            Expected::NotReserved(word) => {
                f.write_fmt(format_args!("an identifier other than `{word}`"))
            }
            Expected::Unchained(op) => f.write_fmt(format_args!(
                "parentheses around the chained non-associative `{op}`"
            )),
        }
    }
}

/// One rule that was active when an expectation failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cause {
    pub rule: &'static str,
    /// Expectations that failed directly in this rule.
    pub expected: Vec<Expected>,
    /// Nested rules that failed at the same position.
    pub children: Vec<Cause>,
}

impl Cause {
    fn new(rule: &'static str) -> Self {
        Self {
            rule,
            expected: Vec::new(),
            children: Vec::new(),
        }
    }

    fn insert(&mut self, path: &[&'static str], expected: Expected) {
        match path.split_first() {
            None => {
                if !self.expected.contains(&expected) {
                    self.expected.push(expected);
                }
            }
            Some((rule, rest)) => child_for(&mut self.children, rule).insert(rest, expected),
        }
    }

    fn collect_expected(&self, into: &mut Vec<Expected>) {
        for expected in &self.expected {
            if !into.contains(expected) {
                into.push(*expected);
            }
        }
        for child in &self.children {
            child.collect_expected(into);
        }
    }

    fn render(&self, f: &mut std::fmt::Formatter<'_>, depth: usize) -> std::fmt::Result {
        for _ in 0..depth {
            f.write_str("  ")?;
        }
        f.write_fmt(format_args!("in {}", self.rule))?;
        if !self.expected.is_empty() {
            f.write_str(": expected ")?;
            write_alternatives(f, &self.expected)?;
        }
        f.write_char('\n')?;
        for child in &self.children {
            child.render(f, depth + 1)?;
        }
        Ok(())
    }
}

fn child_for<'c>(causes: &'c mut Vec<Cause>, rule: &'static str) -> &'c mut Cause {
    let idx = match causes.iter().position(|cause| cause.rule == rule) {
        Some(idx) => idx,
        None => {
            causes.push(Cause::new(rule));
            causes.len() - 1
        }
    };
    &mut causes[idx]
}

fn write_alternatives(f: &mut std::fmt::Formatter<'_>, expected: &[Expected]) -> std::fmt::Result {
    for (idx, item) in expected.iter().enumerate() {
        if idx > 0 {
            f.write_str(if idx + 1 == expected.len() { " or " } else { ", " })?;
        }
        item.fmt(f)?;
    }
    Ok(())
}

/// The furthest point the parser reached before failing, with every
/// expectation that failed there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub offset: usize,
    pub position: SourcePosition,
    /// `None` at the end of the input.
    pub found: Option<char>,
    pub causes: Vec<Cause>,
}

impl Diagnostic {
    /// Every distinct expectation in the cause tree, outermost rules first.
    pub fn expected(&self) -> Vec<Expected> {
        let mut expected = Vec::new();
        for cause in &self.causes {
            cause.collect_expected(&mut expected);
        }
        expected
    }

    /// The most specific failure class: ambiguity beats structural beats lexical.
    pub fn kind(&self) -> FailureKind {
        let kinds: Vec<_> = self.expected().iter().map(Expected::kind).collect();
        if kinds.contains(&FailureKind::Ambiguity) {
            FailureKind::Ambiguity
        } else if kinds.contains(&FailureKind::Structural) {
            FailureKind::Structural
        } else {
            FailureKind::Lexical
        }
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("expected ")?;
        write_alternatives(f, &self.expected())?;
        match self.found {
            Some(char) => f.write_fmt(format_args!(", found {char:?}"))?,
            None => f.write_str(", found end of input")?,
        }
        f.write_fmt(format_args!(" at {}", self.position))?;
        for cause in &self.causes {
            f.write_char('\n')?;
            cause.render(f, 0)?;
        }
        Ok(())
    }
}

/// Collects expectations, keeping only those at the furthest offset seen.
#[derive(Debug, Default)]
pub struct Furthest {
    offset: usize,
    entries: Vec<(Vec<&'static str>, Expected)>,
}

impl Furthest {
    pub fn record(&mut self, offset: usize, rules: &[&'static str], expected: Expected) {
        if offset < self.offset || (offset == self.offset && self.contains(rules, expected)) {
            return;
        }
        if offset > self.offset {
            self.offset = offset;
            self.entries.clear();
        }
        self.entries.push((rules.to_vec(), expected));
    }

    fn contains(&self, rules: &[&'static str], expected: Expected) -> bool {
        self.entries
            .iter()
            .any(|(path, item)| *item == expected && path == rules)
    }

    pub fn into_diagnostic(self, source: &str, position: SourcePosition) -> Diagnostic {
        let mut root = Cause::new("");
        for (path, expected) in &self.entries {
            root.insert(path, *expected);
        }
        Diagnostic {
            offset: self.offset,
            position,
            found: source.get(self.offset..).and_then(|rest| rest.chars().next()),
            causes: root.children,
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }
}

/// Why a rule did not produce a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    /// The rule does not match here; an enclosing choice may try something else.
    Mismatch,
    /// Nesting exceeded the configured limit at this offset. Ends the parse.
    Abort { offset: usize },
}
