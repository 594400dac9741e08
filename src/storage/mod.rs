//! Table file storage
//!
//! Reads and writes the account table and guards its rewrite cycle.

pub mod filesystem;
pub mod table;

pub use filesystem::{TableLock, ensure_table};
pub use table::{HEADER, read_table, write_table};
