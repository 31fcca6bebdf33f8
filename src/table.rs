//! In-memory table made of fixed-size pages.
//!
//! Rows are packed [`ROWS_PER_PAGE`] to a page and pages are allocated the
//! first time a row lands in them. The page array has a hard ceiling of
//! [`TABLE_MAX_PAGES`], which puts the table at [`TABLE_MAX_ROWS`] rows.

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::row::{PAGE_SIZE, ROW_SIZE, ROWS_PER_PAGE, Row, TABLE_MAX_PAGES, TABLE_MAX_ROWS};

type Page = [u8; PAGE_SIZE];

pub struct Table {
    num_rows: usize,
    pages: heapless::Vec<Box<Page>, TABLE_MAX_PAGES>,
}

impl Table {
    pub fn new() -> Self {
        Self {
            num_rows: 0,
            pages: heapless::Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.num_rows
    }

    pub fn is_empty(&self) -> bool {
        self.num_rows == 0
    }

    pub fn is_full(&self) -> bool {
        self.num_rows >= TABLE_MAX_ROWS
    }

    /// Number of pages allocated so far.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Appends a row after the last stored one.
    pub fn append(&mut self, row: &Row) -> Result<()> {
        if self.is_full() {
            warn!(num_rows = self.num_rows, "Table full, rejecting row.");
            return Err(Error::TableFull);
        }

        let row_num = self.num_rows;
        row.serialize(self.row_slot_mut(row_num)?);
        self.num_rows += 1;

        debug!(
            row_num,
            page_num = row_num / ROWS_PER_PAGE,
            id = row.id,
            "Appended a row."
        );
        Ok(())
    }

    /// Returns a cursor positioned at the first row.
    ///
    /// Each call starts over, so repeated scans yield the same rows in the
    /// same order.
    pub fn scan(&self) -> Cursor<'_> {
        Cursor {
            table: self,
            row_num: 0,
        }
    }

    fn row_slot(&self, row_num: usize) -> Option<&[u8]> {
        let (page_num, byte_offset) = slot_position(row_num);
        let page = self.pages.get(page_num)?;
        Some(&page[byte_offset..byte_offset + ROW_SIZE])
    }

    fn row_slot_mut(&mut self, row_num: usize) -> Result<&mut [u8]> {
        let (page_num, byte_offset) = slot_position(row_num);
        while self.pages.len() <= page_num {
            // push fails only past TABLE_MAX_PAGES, which append() rules out.
            self.pages
                .push(Box::new([0; PAGE_SIZE]))
                .map_err(|_| Error::TableFull)?;
            debug!(page_num = self.pages.len() - 1, "Allocated a page.");
        }
        Ok(&mut self.pages[page_num][byte_offset..byte_offset + ROW_SIZE])
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}

fn slot_position(row_num: usize) -> (usize, usize) {
    let page_num = row_num / ROWS_PER_PAGE;
    let row_offset = row_num % ROWS_PER_PAGE;
    (page_num, row_offset * ROW_SIZE)
}

/// Forward-only walk over the rows of a [`Table`], decoding one row per step.
pub struct Cursor<'a> {
    table: &'a Table,
    row_num: usize,
}

impl Cursor<'_> {
    pub fn end_of_table(&self) -> bool {
        self.row_num >= self.table.num_rows
    }
}

impl Iterator for Cursor<'_> {
    type Item = Row;

    fn next(&mut self) -> Option<Row> {
        if self.end_of_table() {
            return None;
        }
        let row = Row::deserialize(self.table.row_slot(self.row_num)?);
        self.row_num += 1;
        Some(row)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.table.num_rows.saturating_sub(self.row_num);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Cursor<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(i: u32) -> Row {
        Row::new(i, format!("user{i}"), format!("person{i}@example.com"))
    }

    #[test]
    fn starts_empty() {
        let table = Table::new();
        assert!(table.is_empty());
        assert_eq!(table.page_count(), 0);
        assert_eq!(table.scan().count(), 0);
        assert!(table.scan().end_of_table());
    }

    #[test]
    fn scans_in_insertion_order() {
        let mut table = Table::new();
        for i in [5, 3, 9, 3] {
            table.append(&row(i)).unwrap();
        }

        let ids: Vec<u32> = table.scan().map(|r| r.id).collect();
        assert_eq!(ids, vec![5, 3, 9, 3]);
    }

    #[test]
    fn scan_is_restartable() {
        let mut table = Table::new();
        table.append(&row(1)).unwrap();
        table.append(&row(2)).unwrap();

        let first: Vec<Row> = table.scan().collect();
        let second: Vec<Row> = table.scan().collect();
        assert_eq!(first, second);
        assert_eq!(table.scan().len(), 2);
    }

    #[test]
    fn allocates_pages_lazily() {
        let mut table = Table::new();
        for i in 0..ROWS_PER_PAGE as u32 {
            table.append(&row(i)).unwrap();
        }
        assert_eq!(table.page_count(), 1);

        table.append(&row(ROWS_PER_PAGE as u32)).unwrap();
        assert_eq!(table.page_count(), 2);
    }

    #[test]
    fn rows_crossing_a_page_boundary_survive() {
        let mut table = Table::new();
        for i in 0..(ROWS_PER_PAGE as u32 * 2 + 1) {
            table.append(&row(i)).unwrap();
        }

        let boundary: Vec<Row> = table
            .scan()
            .skip(ROWS_PER_PAGE - 1)
            .take(2)
            .collect();
        assert_eq!(boundary, vec![row(13), row(14)]);
    }

    #[test]
    fn fills_up_at_max_rows() {
        let mut table = Table::new();
        for i in 0..TABLE_MAX_ROWS as u32 {
            table.append(&row(i)).unwrap();
        }
        assert!(table.is_full());
        assert_eq!(table.page_count(), TABLE_MAX_PAGES);

        assert!(matches!(table.append(&row(1400)), Err(Error::TableFull)));
        assert!(matches!(table.append(&row(1401)), Err(Error::TableFull)));

        assert_eq!(table.len(), TABLE_MAX_ROWS);
        let last = table.scan().last().unwrap();
        assert_eq!(last, row(1399));
    }
}
