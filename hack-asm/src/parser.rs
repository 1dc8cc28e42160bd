//! Hack Assembly parser
use crate::{
    commands::{ACommand, Command, LCommand},
    error::Error,
    symbol::SymbolTable,
};

const COMMENT: &str = "//";

pub type ParseResult<'source> = (Vec<Command<'source>>, Vec<Error>);

pub fn parse(program: &str) -> ParseResult {
    let mut commands = Vec::new();
    let mut errors = Vec::new();

    for (row, line) in program.lines().enumerate() {
        let valid_code_range = line.find(COMMENT).unwrap_or(line.len());
        let asm = line[..valid_code_range].trim();
        if asm.is_empty() {
            continue;
        }

        match Command::parse(asm, row + 1) {
            Ok(command) => commands.push(command),
            Err(e) => errors.push(e),
        }
    }

    (commands, errors)
}

/// Pass 1 (label definitions) followed by pass 2 (variable allocation), per
/// the two-pass resolution scheme (spec.md §4.8).
pub fn load_symbol<'s>(commands: &[Command<'s>], table: &mut SymbolTable<'s>) {
    // program counter
    let mut pc = 0;

    for command in commands {
        if let Command::L(LCommand(symbol)) = command {
            if !table.contains(symbol) {
                table.register_label(symbol, pc);
            }
        } else {
            pc += 1;
        }
    }

    for command in commands {
        if let Command::A(ACommand::Symbol(symbol)) = command {
            if table.address(symbol).is_none() {
                table.register_symbol(symbol);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_comments_and_blank_lines() {
        let program = "@1 // comment\n\n   \n// whole line comment\n@2";
        let (commands, errors) = parse(program);
        assert!(errors.is_empty());
        assert_eq!(commands.len(), 2);
    }

    #[test]
    fn malformed_line_is_collected_not_fatal() {
        let program = "@1\n@-1\n@2";
        let (commands, errors) = parse(program);
        assert_eq!(commands.len(), 2);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn labels_bind_to_the_following_instruction_index() {
        let program = "@1\n(LOOP)\n@2\n0;JMP";
        let (commands, errors) = parse(program);
        assert!(errors.is_empty());

        let mut table = SymbolTable::new();
        load_symbol(&commands, &mut table);
        assert_eq!(*table.address("LOOP").unwrap(), 1);
    }
}
