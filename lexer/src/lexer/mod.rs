//! Recognizers for the terminal forms of the language.
//!
//! Every recognizer takes the cursor by `&mut Input` and only advances it
//! when it matches. On failure the cursor is left where it was, so callers
//! can try the next alternative without bookkeeping.

// the byte-class macros have to be in scope before the recognizers
#[macro_use]
pub mod util;

pub mod ident;
pub mod input;
pub mod literals;
pub mod path;
pub mod trivia;
