//! Sheet structures for ODS spreadsheets.

use super::RowElement;

/// A named table of an ODS spreadsheet, as written in the document.
///
/// Rows and cells keep their repeat counts; [`crate::grid::GridBuilder`]
/// turns them into a dense grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    /// Sheet name (`table:name`)
    pub name: String,
    /// Row elements in document order
    pub rows: Vec<RowElement>,
}

impl Sheet {
    /// Create an empty sheet.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
        }
    }

    /// Get the name of the sheet.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the row elements of the sheet.
    pub fn rows(&self) -> &[RowElement] {
        &self.rows
    }

    /// Number of logical rows, counting every repetition.
    pub fn logical_row_count(&self) -> usize {
        self.rows
            .iter()
            .fold(0usize, |acc, row| acc.saturating_add(row.repeated))
    }
}
