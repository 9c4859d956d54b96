//! Data module - tabular input loading and table conversion

mod loader;
mod table;

pub use loader::{DataLoader, LoaderError};
pub use table::{Cell, Column, ColumnType, DataTable, TableError};
