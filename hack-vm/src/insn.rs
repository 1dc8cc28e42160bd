use crate::{error::Error, segment::Segment};

pub type Symbol<'a> = &'a str;

#[derive(Debug)]
pub struct Instruction<'source> {
    pub kind: InsnKind<'source>,
    pub line: usize,
    // hold original code
    #[cfg(debug_assertions)]
    pub lexeme: &'source str,
}

#[derive(Debug)]
pub enum InsnKind<'source> {
    // Arithmetic
    Add,
    Sub,
    Neg,
    Eq,
    Gt,
    Lt,
    And,
    Or,
    Not,
    // Stack
    Push(Segment, u16),
    Pop(Segment, u16),
    // Program Flow
    Label(Symbol<'source>),
    Goto(Symbol<'source>),
    IfGoto(Symbol<'source>),
    // Function call
    // Function definition(name, num of local variables)
    DefFn(Symbol<'source>, u16),
    // Function call(name, num of arguments)
    CallFn(Symbol<'source>, u16),
    Return,
}

impl<'s> Instruction<'s> {
    pub fn parse(code: &'s str, line: usize) -> Result<Self, Error> {
        use InsnKind::*;

        let mut ops = code.split_whitespace();
        let kind = ops.next().ok_or(Error::EmptyInstruction { line })?;
        let kind = match kind {
            // Arithmetic
            "add" => Add,
            "sub" => Sub,
            "neg" => Neg,
            "eq" => Eq,
            "gt" => Gt,
            "lt" => Lt,
            "and" => And,
            "or" => Or,
            "not" => Not,
            // Stack
            "push" | "pop" => {
                let segment_str = ops.next().ok_or_else(|| Error::MissingArgument {
                    line,
                    instruction: kind.to_string(),
                })?;
                let segment: Segment =
                    segment_str
                        .try_into()
                        .map_err(|()| Error::UnknownSegment {
                            line,
                            segment: segment_str.to_string(),
                        })?;
                let index_str = ops.next().ok_or_else(|| Error::MissingArgument {
                    line,
                    instruction: kind.to_string(),
                })?;
                let index: u16 = index_str.parse().map_err(|_| Error::InvalidIndex {
                    line,
                    value: index_str.to_string(),
                })?;
                if !segment.index_in_range(index) {
                    return Err(Error::IndexOutOfRange {
                        line,
                        segment,
                        index,
                    });
                }

                match kind {
                    "push" => Push(segment, index),
                    "pop" if segment == Segment::Constant => return Err(Error::PopIntoConstant),
                    "pop" => Pop(segment, index),
                    _ => unreachable!(),
                }
            }
            "label" | "goto" | "if-goto" => {
                let symbol = ops.next().ok_or_else(|| Error::MissingArgument {
                    line,
                    instruction: kind.to_string(),
                })?;
                if !validate(symbol) {
                    return Err(Error::InvalidSymbol {
                        line,
                        symbol: symbol.to_string(),
                    });
                }

                match kind {
                    "label" => Label(symbol),
                    "goto" => Goto(symbol),
                    "if-goto" => IfGoto(symbol),
                    _ => unreachable!(),
                }
            }
            "function" => {
                let name = ops.next().ok_or_else(|| Error::MissingArgument {
                    line,
                    instruction: kind.to_string(),
                })?;
                if !validate(name) {
                    return Err(Error::InvalidSymbol {
                        line,
                        symbol: name.to_string(),
                    });
                }

                let n_locals_str = ops.next().ok_or_else(|| Error::MissingArgument {
                    line,
                    instruction: kind.to_string(),
                })?;
                let n_locals: u16 = n_locals_str.parse().map_err(|_| Error::InvalidIndex {
                    line,
                    value: n_locals_str.to_string(),
                })?;

                DefFn(name, n_locals)
            }
            "call" => {
                let name = ops.next().ok_or_else(|| Error::MissingArgument {
                    line,
                    instruction: kind.to_string(),
                })?;
                let n_args_str = ops.next().ok_or_else(|| Error::MissingArgument {
                    line,
                    instruction: kind.to_string(),
                })?;
                let n_args: u16 = n_args_str.parse().map_err(|_| Error::InvalidIndex {
                    line,
                    value: n_args_str.to_string(),
                })?;

                CallFn(name, n_args)
            }
            "return" => Return,
            _ => {
                return Err(Error::UnknownInstruction {
                    line,
                    kind: kind.to_string(),
                })
            }
        };

        Ok(Instruction {
            kind,
            line,
            #[cfg(debug_assertions)]
            lexeme: code,
        })
    }
}

fn validate(symbol: &str) -> bool {
    !symbol.starts_with(|c: char| c.is_ascii_digit())
        && symbol
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '.' | '_' | ':'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_push_constant() {
        let insn = Instruction::parse("push constant 7", 1).unwrap();
        assert!(matches!(insn.kind, InsnKind::Push(Segment::Constant, 7)));
    }

    #[test]
    fn rejects_pop_constant() {
        let err = Instruction::parse("pop constant 0", 1).unwrap_err();
        assert!(matches!(err, Error::PopIntoConstant));
    }

    #[test]
    fn rejects_out_of_range_pointer() {
        let err = Instruction::parse("push pointer 2", 1).unwrap_err();
        assert!(matches!(err, Error::IndexOutOfRange { .. }));
    }

    #[test]
    fn rejects_out_of_range_temp() {
        let err = Instruction::parse("pop temp 8", 1).unwrap_err();
        assert!(matches!(err, Error::IndexOutOfRange { .. }));
    }

    #[test]
    fn rejects_unknown_instruction() {
        let err = Instruction::parse("frobnicate", 1).unwrap_err();
        assert!(matches!(err, Error::UnknownInstruction { .. }));
    }

    #[test]
    fn parses_function_call_return() {
        let f = Instruction::parse("function Foo.bar 2", 1).unwrap();
        assert!(matches!(f.kind, InsnKind::DefFn("Foo.bar", 2)));

        let c = Instruction::parse("call Foo.bar 1", 2).unwrap();
        assert!(matches!(c.kind, InsnKind::CallFn("Foo.bar", 1)));

        let r = Instruction::parse("return", 3).unwrap();
        assert!(matches!(r.kind, InsnKind::Return));
    }
}
