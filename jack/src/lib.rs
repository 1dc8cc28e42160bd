#![forbid(unsafe_code)]
//! Tokenizer for the Jack language. Only the lexical layer is implemented:
//! no parser, symbol table, or code generator. This exists so a future
//! parser has a concrete token stream to build against.
use std::path::Path;

pub mod error;
pub mod lexer;
pub mod span;
pub mod token;

pub use error::LexError;
pub use lexer::Lexer;

pub fn is_jack_file<P: AsRef<Path>>(path: &P) -> bool {
    path.as_ref()
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("jack"))
}
