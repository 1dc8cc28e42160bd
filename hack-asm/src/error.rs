//! Typed errors surfaced at the crate boundary.
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("line {line}: could not classify instruction `{code}`")]
    EmptyInstruction { line: usize, code: String },

    #[error("`@{value}`: negative addresses are not representable")]
    NegativeAddress { value: i32 },

    #[error("unknown dest mnemonic `{0}`")]
    UnknownDest(String),

    #[error("unknown jump mnemonic `{0}`")]
    UnknownJump(String),

    #[error("unknown comp mnemonic `{0}`")]
    UnknownComp(String),

    #[error("label command `{0}` is missing its closing brace")]
    UnterminatedLabel(String),

    #[error("symbol `{0}` was referenced but never bound")]
    UnboundSymbol(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
