//! Fixed-width row layout.
//!
//! Every row occupies exactly [`ROW_SIZE`] bytes: a little-endian `u32` id
//! followed by the username and email slots, each zero-padded to its
//! maximum width. There is no length prefix; a text field ends at its first
//! zero byte or at the end of its slot.

use std::fmt;

pub const COLUMN_USERNAME_SIZE: usize = 32;
pub const COLUMN_EMAIL_SIZE: usize = 255;
pub const ID_SIZE: usize = size_of::<u32>();
pub const USERNAME_SIZE: usize = COLUMN_USERNAME_SIZE;
pub const EMAIL_SIZE: usize = COLUMN_EMAIL_SIZE;

pub const ID_OFFSET: usize = 0;
pub const USERNAME_OFFSET: usize = ID_OFFSET + ID_SIZE;
pub const EMAIL_OFFSET: usize = USERNAME_OFFSET + USERNAME_SIZE;
pub const ROW_SIZE: usize = ID_SIZE + USERNAME_SIZE + EMAIL_SIZE;

pub const PAGE_SIZE: usize = 4096;
pub const TABLE_MAX_PAGES: usize = 100;
pub const ROWS_PER_PAGE: usize = PAGE_SIZE / ROW_SIZE;
pub const TABLE_MAX_ROWS: usize = ROWS_PER_PAGE * TABLE_MAX_PAGES;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub id: u32,
    pub username: String,
    pub email: String,
}

impl Row {
    pub fn new(id: u32, username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            email: email.into(),
        }
    }

    /// Writes the row into the first [`ROW_SIZE`] bytes of `dst`.
    ///
    /// Text longer than its slot is cut at the slot boundary; callers are
    /// expected to have validated lengths already.
    pub fn serialize(&self, dst: &mut [u8]) {
        let dst = &mut dst[..ROW_SIZE];
        dst[ID_OFFSET..USERNAME_OFFSET].copy_from_slice(&self.id.to_le_bytes());
        write_text(&mut dst[USERNAME_OFFSET..EMAIL_OFFSET], &self.username);
        write_text(&mut dst[EMAIL_OFFSET..ROW_SIZE], &self.email);
    }

    /// Reads a row back from the first [`ROW_SIZE`] bytes of `src`.
    pub fn deserialize(src: &[u8]) -> Self {
        let src = &src[..ROW_SIZE];
        let mut id = [0u8; ID_SIZE];
        id.copy_from_slice(&src[ID_OFFSET..USERNAME_OFFSET]);

        Self {
            id: u32::from_le_bytes(id),
            username: read_text(&src[USERNAME_OFFSET..EMAIL_OFFSET]),
            email: read_text(&src[EMAIL_OFFSET..ROW_SIZE]),
        }
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.id, self.username, self.email)
    }
}

fn write_text(slot: &mut [u8], text: &str) {
    let bytes = text.as_bytes();
    let len = bytes.len().min(slot.len());
    slot[..len].copy_from_slice(&bytes[..len]);
    slot[len..].fill(0);
}

fn read_text(slot: &[u8]) -> String {
    let end = slot.iter().position(|&b| b == 0).unwrap_or(slot.len());
    String::from_utf8_lossy(&slot[..end]).into_owned()
}
