use lexer::{Input, is_path_char, lex_path};

use crate::cst::{BinaryOperator, UnaryOperator};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    Left,
    Right,
    /// Chaining at the same level is an error.
    None,
}

/// Binary operators in matching order: longer symbols before their prefixes.
const BINARY_OPERATORS: [BinaryOperator; 17] = [
    BinaryOperator::Implies,
    BinaryOperator::Or,
    BinaryOperator::And,
    BinaryOperator::Eq,
    BinaryOperator::Neq,
    BinaryOperator::Le,
    BinaryOperator::Ge,
    BinaryOperator::Merge,
    BinaryOperator::Concat,
    BinaryOperator::Lt,
    BinaryOperator::Gt,
    BinaryOperator::Add,
    BinaryOperator::Sub,
    BinaryOperator::Mul,
    BinaryOperator::Div,
    BinaryOperator::HasAttr,
    BinaryOperator::Select,
];

/// Precedence level of function application.
pub const CALL_LEVEL: u8 = 14;

/// Prefix operators start an operand only where the minimum binding power
/// is at most this. List elements and call arguments are parsed above it.
pub const PREFIX_MAX_BP: u8 = UnaryOperator::Negate.operand_bp();

/// Minimum binding power for select-level terms: list elements, call
/// arguments and `or` fallbacks.
pub const SELECT_TERM_BP: u8 = CALL_LEVEL * 2 + 1;

impl BinaryOperator {
    /// Level and associativity. Higher levels bind tighter.
    pub fn precedence(self) -> (u8, Associativity) {
        match self {
            BinaryOperator::Select => (15, Associativity::Left),
            BinaryOperator::HasAttr => (12, Associativity::None),
            BinaryOperator::Concat => (11, Associativity::Right),
            BinaryOperator::Mul | BinaryOperator::Div => (10, Associativity::Left),
            BinaryOperator::Add | BinaryOperator::Sub => (9, Associativity::Left),
            BinaryOperator::Merge => (7, Associativity::Right),
            BinaryOperator::Lt | BinaryOperator::Le | BinaryOperator::Gt | BinaryOperator::Ge => {
                (6, Associativity::None)
            }
            BinaryOperator::Eq | BinaryOperator::Neq => (5, Associativity::None),
            BinaryOperator::And => (4, Associativity::Left),
            BinaryOperator::Or => (3, Associativity::Left),
            BinaryOperator::Implies => (2, Associativity::Right),
        }
    }

    pub fn level(self) -> u8 {
        self.precedence().0
    }

    /// Left and right binding power.
    /// Right-assoc ops have the higher power on the left, the others on the right.
    pub fn binding_power(self) -> (u8, u8) {
        let (level, associativity) = self.precedence();
        match associativity {
            Associativity::Left | Associativity::None => (level * 2, level * 2 + 1),
            Associativity::Right => (level * 2 + 1, level * 2),
        }
    }

    pub fn is_non_associative(self) -> bool {
        self.precedence().1 == Associativity::None
    }
}

impl UnaryOperator {
    /// Binding power the operand is parsed with.
    pub const fn operand_bp(self) -> u8 {
        match self {
            UnaryOperator::Negate => 13 * 2,
            UnaryOperator::Not => 8 * 2,
        }
    }
}

/// The call operator has no symbol, so it gets its own binding power.
pub fn call_binding_power() -> (u8, u8) {
    (CALL_LEVEL * 2, CALL_LEVEL * 2 + 1)
}

/// The binary operator at the cursor, if any.
///
/// Symbols that start another term instead are not operators: `/` directly
/// followed by a path character, `<` opening a search path, and `.` followed
/// by `.`, `/` or a digit.
pub fn peek_binary(input: &Input<'_>) -> Option<BinaryOperator> {
    let op = BINARY_OPERATORS
        .into_iter()
        .find(|op| input.matches(op.symbol()))?;
    let shadowed = match op {
        BinaryOperator::Div => input.get(1).is_some_and(is_path_char),
        BinaryOperator::Lt => starts_search_path(input),
        BinaryOperator::Select => matches!(input.get(1), Some(b'.' | b'/' | b'0'..=b'9')),
        _ => false,
    };
    if shadowed { None } else { Some(op) }
}

pub fn peek_unary(input: &Input<'_>) -> Option<UnaryOperator> {
    match (input.get(0), input.get(1)) {
        (Some(b'-'), next) if next != Some(b'>') => Some(UnaryOperator::Negate),
        (Some(b'!'), next) if next != Some(b'=') => Some(UnaryOperator::Not),
        _ => None,
    }
}

pub fn starts_search_path(input: &Input<'_>) -> bool {
    let mut ahead = *input;
    ahead.get(0) == Some(b'<') && lex_path(&mut ahead).is_ok()
}
