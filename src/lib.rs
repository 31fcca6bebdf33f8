pub mod error;
pub mod executor;
pub mod output;
pub mod repl;
pub mod row;
pub mod statement;
pub mod table;

pub use error::{Error, Result};
pub use repl::{Repl, State};
pub use row::{
    COLUMN_EMAIL_SIZE, COLUMN_USERNAME_SIZE, EMAIL_SIZE, ID_SIZE, PAGE_SIZE, ROW_SIZE,
    ROWS_PER_PAGE, Row, TABLE_MAX_PAGES, TABLE_MAX_ROWS, USERNAME_SIZE,
};
pub use statement::Statement;
pub use table::Table;
