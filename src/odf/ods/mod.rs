//! OpenDocument Spreadsheet (.ods) support.
//!
//! Sheets are read into a light element tree that keeps the row and column
//! repeat counts of the document; see [`crate::grid`] for the dense view.

mod cell;
mod parser;
mod row;
mod sheet;
mod spreadsheet;

pub use cell::{CellElement, extract_cell_text};
pub use row::RowElement;
pub use sheet::Sheet;
pub use spreadsheet::Spreadsheet;
