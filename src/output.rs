//! Renders statement outcomes as protocol lines.

use std::io::Write;

use crate::error::{Error, Result};
use crate::executor::Executed;

pub const PROMPT: &str = "db > ";
pub const EXECUTED: &str = "Executed.";

pub fn write_prompt<W: Write>(out: &mut W) -> Result<()> {
    write!(out, "{PROMPT}")?;
    out.flush()?;
    Ok(())
}

/// Writes the rows of a select, if any, followed by `Executed.`.
pub fn write_executed<W: Write>(out: &mut W, executed: Executed<'_>) -> Result<()> {
    if let Executed::Rows(rows) = executed {
        for row in rows {
            writeln!(out, "{row}")?;
        }
    }
    writeln!(out, "{EXECUTED}")?;
    Ok(())
}

pub fn write_error<W: Write>(out: &mut W, err: &Error) -> Result<()> {
    writeln!(out, "{err}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row::Row;
    use crate::table::Table;

    #[test]
    fn insert_outcome() {
        let mut out = Vec::new();
        write_executed(&mut out, Executed::Inserted).unwrap();
        assert_eq!(out, b"Executed.\n");
    }

    #[test]
    fn select_outcome_lists_rows_then_summary() {
        let mut table = Table::new();
        table.append(&Row::new(1, "user1", "person1@example.com")).unwrap();
        table.append(&Row::new(2, "user2", "person2@example.com")).unwrap();

        let mut out = Vec::new();
        write_executed(&mut out, Executed::Rows(table.scan())).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "(1, user1, person1@example.com)\n(2, user2, person2@example.com)\nExecuted.\n"
        );
    }

    #[test]
    fn error_line() {
        let mut out = Vec::new();
        write_error(&mut out, &Error::TableFull).unwrap();
        assert_eq!(out, b"Error: Table full.\n");
    }
}
