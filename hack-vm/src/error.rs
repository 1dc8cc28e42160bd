//! Typed errors surfaced at the crate boundary.
use thiserror::Error;

use crate::segment::Segment;

#[derive(Error, Debug)]
pub enum Error {
    #[error("line {line}: expected vm instruction, nothing found")]
    EmptyInstruction { line: usize },

    #[error("line {line}: unknown vm instruction `{kind}`")]
    UnknownInstruction { line: usize, kind: String },

    #[error("line {line}: missing argument for `{instruction}`")]
    MissingArgument { line: usize, instruction: String },

    #[error("line {line}: invalid index `{value}`")]
    InvalidIndex { line: usize, value: String },

    #[error("line {line}: invalid symbol `{symbol}`")]
    InvalidSymbol { line: usize, symbol: String },

    #[error("line {line}: unknown segment `{segment}`")]
    UnknownSegment { line: usize, segment: String },

    #[error("line {line}: {segment} index {index} is out of range")]
    IndexOutOfRange {
        line: usize,
        segment: Segment,
        index: u16,
    },

    #[error("cannot pop into the constant segment")]
    PopIntoConstant,

    #[error("current file name is not set")]
    NoCurrentFile,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
