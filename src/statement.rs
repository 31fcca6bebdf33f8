//! Turns one line of input into a [`Statement`] ready for execution.

use crate::error::{Error, Result};
use crate::row::{EMAIL_SIZE, Row, USERNAME_SIZE};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Insert(Row),
    Select,
}

impl Statement {
    /// Parses and validates a statement.
    ///
    /// The id is checked before the text fields, and only the first failed
    /// check is reported.
    pub fn prepare(input: &str) -> Result<Statement> {
        let mut tokens = input.split_whitespace();
        match tokens.next() {
            Some("insert") => prepare_insert(tokens.collect()),
            Some("select") => match tokens.next() {
                None => Ok(Statement::Select),
                Some(_) => Err(Error::Syntax),
            },
            _ => Err(Error::UnrecognizedStatement(input.to_string())),
        }
    }
}

fn prepare_insert(args: Vec<&str>) -> Result<Statement> {
    let [id, username, email] = args[..] else {
        return Err(Error::Syntax);
    };

    let id = parse_id(id)?;

    if username.len() > USERNAME_SIZE || email.len() > EMAIL_SIZE {
        return Err(Error::StringTooLong);
    }
    // Zero bytes pad the storage slots.
    if username.contains('\0') || email.contains('\0') {
        return Err(Error::Syntax);
    }

    Ok(Statement::Insert(Row::new(id, username, email)))
}

/// Any negative integer is `NegativeId`, however many digits it has.
/// Anything else that is not a `u32` is a syntax error.
fn parse_id(token: &str) -> Result<u32> {
    if let Some(digits) = token.strip_prefix('-') {
        let is_integer = !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit());
        let is_zero = digits.bytes().all(|b| b == b'0');
        return match (is_integer, is_zero) {
            (true, false) => Err(Error::NegativeId),
            (true, true) => Ok(0),
            (false, _) => Err(Error::Syntax),
        };
    }
    token.parse().map_err(|_| Error::Syntax)
}
