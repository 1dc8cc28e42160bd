//! Typed errors surfaced at the crate boundary. Only the lexical layer is
//! implemented, so this is a subset of what a full Jack compiler's error
//! enum would need (no parse/semantic variants).
use thiserror::Error;

#[derive(Error, Debug, Clone)]
#[error("{kind}")]
pub struct LexError<'s> {
    pub src: &'s str,
    pub span: crate::span::Span,
    pub kind: LexErrorKind<'s>,
}

#[derive(Error, Debug, Clone)]
pub enum LexErrorKind<'s> {
    #[error("unexpected character {0} found")]
    UnexpectedCharacter(char),
    #[error("cannot parse given number: {0}")]
    InvalidNumberFormat(#[from] std::num::ParseIntError),
    #[error("undefined keyword {0} found")]
    UndefinedKeyword(&'s str),
    #[error("could not find matching string quotation")]
    UnterminatedQuote,
    #[error("unterminated comment")]
    UnterminatedComment,
}
