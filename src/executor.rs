use crate::error::Result;
use crate::statement::Statement;
use crate::table::{Cursor, Table};

/// Successful outcome of a statement.
pub enum Executed<'a> {
    Inserted,
    /// Rows are decoded lazily as the cursor is drained.
    Rows(Cursor<'a>),
}

pub fn execute(statement: Statement, table: &mut Table) -> Result<Executed<'_>> {
    match statement {
        Statement::Insert(row) => {
            table.append(&row)?;
            Ok(Executed::Inserted)
        }
        Statement::Select => Ok(Executed::Rows(table.scan())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::row::{Row, TABLE_MAX_ROWS};

    fn insert(table: &mut Table, i: u32) -> Result<()> {
        let row = Row::new(i, format!("user{i}"), format!("person{i}@example.com"));
        execute(Statement::Insert(row), table).map(|_| ())
    }

    fn select(table: &mut Table) -> Vec<Row> {
        match execute(Statement::Select, table).unwrap() {
            Executed::Rows(rows) => rows.collect(),
            Executed::Inserted => panic!("select returned Inserted"),
        }
    }

    #[test]
    fn insert_then_select() {
        let mut table = Table::new();
        assert!(matches!(
            execute(Statement::prepare("insert 1 user1 person1@example.com").unwrap(), &mut table),
            Ok(Executed::Inserted)
        ));

        assert_eq!(select(&mut table), vec![Row::new(1, "user1", "person1@example.com")]);
    }

    #[test]
    fn select_on_empty_table() {
        let mut table = Table::new();
        assert!(select(&mut table).is_empty());
    }

    #[test]
    fn table_full_is_sticky_and_select_still_works() {
        let mut table = Table::new();
        for i in 0..TABLE_MAX_ROWS as u32 {
            insert(&mut table, i).unwrap();
        }

        assert!(matches!(insert(&mut table, 1400), Err(Error::TableFull)));
        assert!(matches!(insert(&mut table, 1401), Err(Error::TableFull)));

        let rows = select(&mut table);
        assert_eq!(rows.len(), TABLE_MAX_ROWS);
        assert!(rows.iter().all(|r| r.id < 1400));
    }
}
