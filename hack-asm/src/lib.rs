#![forbid(unsafe_code)]

use std::{fs, path::Path};

use symbol::SymbolTable;

pub mod codegen;
pub mod commands;
pub mod error;
pub mod parser;
pub mod symbol;

pub use error::Error;

/// Reads the assembly source, stripping whitespace the grammar treats as
/// insignificant (the Hack assembly format permits spaces anywhere between
/// tokens on a line).
pub fn read_and_format<P: AsRef<Path>>(fname: P) -> anyhow::Result<String> {
    let program = fs::read_to_string(fname)?
        .chars()
        .filter(|c| *c != ' ')
        .collect();

    Ok(program)
}

/// Runs both assembler passes over `program`, returning one binary line per
/// emitted instruction. A malformed line is dropped rather than aborting the
/// whole file (spec.md §7); it is reported to stderr but does not withhold
/// the rest of the program's binary.
pub fn compile(program: &str) -> Result<Vec<String>, Error> {
    let mut table = SymbolTable::new();
    let (commands, errors) = parser::parse(program);
    parser::load_symbol(&commands, &mut table);

    for error in &errors {
        eprintln!("{error}");
    }

    codegen::generate(&commands, &table)
}
