use std::io;

use thiserror::Error;

/// Everything that can go wrong while handling one line of input.
///
/// The `Display` text of every variant except [`Error::Io`] is the exact
/// line written back to the client, so the formatter prints errors with
/// `{}` and nothing else.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Syntax error. Could not parse statement.")]
    Syntax,

    #[error("Unrecognized keyword at start of '{0}'.")]
    UnrecognizedStatement(String),

    #[error("Unrecognized command '{0}'")]
    UnrecognizedCommand(String),

    #[error("ID must be positive.")]
    NegativeId,

    #[error("String is too long.")]
    StringTooLong,

    #[error("Error: Table full.")]
    TableFull,

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Statement-level failures are reported and the session goes on.
    /// Only a broken input or output stream ends it.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Error::Io(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
