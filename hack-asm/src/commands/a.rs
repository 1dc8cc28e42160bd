//! Represents A(ddressing) command
use crate::{error::Error, symbol::Symbol};

#[derive(Debug, PartialEq, Eq)]
pub enum ACommand<'source> {
    Value(i16),
    Symbol(Symbol<'source>),
}

impl<'s> ACommand<'s> {
    /// code format: @{value,symbol}
    pub fn parse(code: &'s str) -> Result<Self, Error> {
        debug_assert!(&code[0..1] == "@");
        let code = &code[1..];

        let command = if let Ok(v) = code.parse::<i32>() {
            if v < 0 {
                return Err(Error::NegativeAddress { value: v });
            }
            Self::Value(v as i16)
        } else {
            Self::Symbol(code)
        };

        Ok(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_number_address() {
        let code = "@123";
        let command = ACommand::parse(code).unwrap();

        assert_eq!(command, ACommand::Value(123));
    }

    #[test]
    fn parse_symbol_address() {
        let code = "@some";
        let command = ACommand::parse(code).unwrap();

        assert_eq!(command, ACommand::Symbol("some"));
    }

    #[test]
    fn rejects_negative_address() {
        let code = "@-1";
        let err = ACommand::parse(code).unwrap_err();
        assert!(matches!(err, Error::NegativeAddress { value: -1 }));
    }
}
