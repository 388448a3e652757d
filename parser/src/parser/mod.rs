use lexer::Input;
use log::debug;

use crate::{ParseError, ParseOptions, ParseResult, cst::Root};

use self::{components::Parser, diagnostics::Failure};

mod components;
mod diagnostics;

pub use diagnostics::{Cause, Diagnostic, Expected};

/// Stack reserved for the parser thread per allowed nesting level.
/// Unoptimized builds spend a few dozen KiB per level.
const STACK_PER_LEVEL: usize = 96 * 1024;
/// Stack for everything outside the nesting itself.
const BASE_STACK: usize = 1024 * 1024;
const MAX_STACK: usize = 1 << 30;

/// Parse on a thread whose stack is sized for `options.max_depth`, so
/// reaching the limit ends in `NestedTooDeep` rather than a stack overflow,
/// whatever the caller's own stack.
pub fn parser_entrypoint(source: &str, options: ParseOptions) -> ParseResult<Root<'_>> {
    let stack_size = options
        .max_depth
        .saturating_mul(STACK_PER_LEVEL)
        .saturating_add(BASE_STACK)
        .min(MAX_STACK);

    std::thread::scope(|scope| {
        let handle = std::thread::Builder::new()
            .name("nix-parser".to_owned())
            .stack_size(stack_size)
            .spawn_scoped(scope, || parse_source(source, options))
            .map_err(|e| ParseError::Spawn(e.to_string()))?;
        match handle.join() {
            Ok(res) => res,
            Err(panic) => std::panic::resume_unwind(panic),
        }
    })
}

fn parse_source(source: &str, options: ParseOptions) -> ParseResult<Root<'_>> {
    let mut parser = Parser::new(Input::new(source), options);
    let res = match parser.parse_root() {
        Ok(root) => Ok(root),
        Err(Failure::Abort { offset }) => Err(ParseError::NestedTooDeep {
            limit: options.max_depth,
            offset,
        }),
        Err(Failure::Mismatch) => Err(ParseError::Syntax(parser.into_diagnostic())),
    };
    match &res {
        Ok(root) => debug!(
            "parsed {} bytes, expression: {}",
            source.len(),
            root.expr.is_some()
        ),
        Err(e) => debug!("parse of {} bytes failed: {e}", source.len()),
    }
    res
}
