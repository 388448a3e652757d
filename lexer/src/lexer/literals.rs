use std::fmt::Display;

use crate::{LexError, LexResult};

use super::{input::Input, util::is_digit};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Number<'a> {
    /// One or more digits.
    Integer(&'a str),
    /// `integer_part` may be empty (`.45`). `fraction` is everything after
    /// the dot, exponent included (`45e1`, `e4`).
    Float {
        integer_part: &'a str,
        fraction: &'a str,
    },
}

impl Display for Number<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Number::Integer(digits) => f.write_str(digits),
            Number::Float {
                integer_part,
                fraction,
            } => f.write_fmt(format_args!("{integer_part}.{fraction}")),
        }
    }
}

pub fn lex_number<'a>(input: &mut Input<'a>) -> LexResult<Number<'a>> {
    if let Some(float) = lex_float(input) {
        return Ok(float);
    }

    let digits = input.consume_while(is_digit);
    if digits.is_empty() {
        Err(LexError::NoMatch {
            expected: "number",
            offset: input.offset(),
        })
    } else {
        Ok(Number::Integer(digits))
    }
}

fn lex_float<'a>(input: &mut Input<'a>) -> Option<Number<'a>> {
    let mut ahead = *input;
    let integer_part = ahead.consume_while(is_digit);
    if !ahead.eat(".") {
        return None;
    }

    let fraction_start = ahead.offset();
    let fraction_digits = ahead.consume_while(is_digit);
    let has_exponent = lex_exponent(&mut ahead);

    // a dot needs digits after it, unless an exponent follows (`1.e4`)
    if fraction_digits.is_empty() && !has_exponent {
        return None;
    }

    let fraction = ahead.slice(ahead.span_from(fraction_start));
    *input = ahead;
    Some(Number::Float {
        integer_part,
        fraction,
    })
}

fn lex_exponent(input: &mut Input<'_>) -> bool {
    let mut ahead = *input;
    if !matches!(ahead.get(0), Some(b'e' | b'E')) {
        return false;
    }
    ahead.consume(1);
    if matches!(ahead.get(0), Some(b'+' | b'-')) {
        ahead.consume(1);
    }
    if ahead.consume_while(is_digit).is_empty() {
        return false;
    }
    *input = ahead;
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Uri<'a> {
    pub scheme: &'a str,
    /// Everything after the first colon.
    pub rest: &'a str,
}

impl Display for Uri<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{}:{}", self.scheme, self.rest))
    }
}

pub fn lex_uri<'a>(input: &mut Input<'a>) -> LexResult<Uri<'a>> {
    let no_match = LexError::NoMatch {
        expected: "URI",
        offset: input.offset(),
    };

    let mut ahead = *input;
    if !matches!(ahead.get(0), Some(b'a'..=b'z' | b'A'..=b'Z')) {
        return Err(no_match);
    }
    let scheme = ahead.consume_while(|c| matches!(c, uri_scheme_pat!()));
    if !ahead.eat(":") {
        return Err(no_match);
    }
    let rest = ahead.consume_while(|c| matches!(c, uri_body_pat!()));
    if rest.is_empty() {
        return Err(no_match);
    }

    *input = ahead;
    Ok(Uri { scheme, rest })
}
