use crate::{LexError, LexResult};

use super::{input::Input, util::is_identifier_char};

/// Words that can never be identifiers.
pub const RESERVED_WORDS: [&str; 10] = [
    "if", "then", "else", "assert", "with", "let", "in", "rec", "inherit", "or",
];

/// Returns the reserved word equal to `word`, if there is one.
pub fn reserved_word(word: &str) -> Option<&'static str> {
    RESERVED_WORDS.iter().copied().find(|reserved| *reserved == word)
}

pub fn lex_identifier<'a>(input: &mut Input<'a>) -> LexResult<&'a str> {
    let offset = input.offset();
    if !matches!(input.get(0), Some(ident_pat!(start))) {
        return Err(LexError::NoMatch {
            expected: "identifier",
            offset,
        });
    }

    let mut ahead = *input;
    let ident = ahead.consume_while(is_identifier_char);
    if let Some(word) = reserved_word(ident) {
        return Err(LexError::Reserved { word, offset });
    }

    *input = ahead;
    Ok(ident)
}

/// Is the input at `keyword`, not followed by anything that would
/// extend it into a longer identifier?
pub fn at_keyword(input: &Input<'_>, keyword: &str) -> bool {
    input.matches(keyword) && !input.get(keyword.len()).is_some_and(is_identifier_char)
}

/// Consume `keyword` if [`at_keyword`] holds.
pub fn lex_keyword(input: &mut Input<'_>, keyword: &str) -> bool {
    if at_keyword(input, keyword) {
        input.consume(keyword.len());
        true
    } else {
        false
    }
}
