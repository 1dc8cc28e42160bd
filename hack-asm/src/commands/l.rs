/// Represents L(abel) command
use crate::{error::Error, symbol::Symbol};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct LCommand<'source>(pub Symbol<'source>);

impl<'s> LCommand<'s> {
    /// code format: (Xxx)
    pub fn parse(code: &'s str) -> Result<Self, Error> {
        let right = code
            .find(')')
            .ok_or_else(|| Error::UnterminatedLabel(code.to_string()))?;
        let command = LCommand(&code[1..right]);
        Ok(command)
    }
}
