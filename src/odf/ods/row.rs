//! Row elements of an ODS table.

use super::CellElement;

/// One `table:table-row` element.
///
/// A single element may stand for several identical logical rows through
/// `table:number-rows-repeated`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowElement {
    /// Cells in document order, repeats not expanded
    pub cells: Vec<CellElement>,
    /// Value of `table:number-rows-repeated`, at least 1
    pub repeated: usize,
}

impl RowElement {
    /// Create an empty, non-repeated row.
    pub fn new() -> Self {
        Self {
            cells: Vec::new(),
            repeated: 1,
        }
    }

    /// Create a row of single-paragraph cells, one per column.
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cells: texts.into_iter().map(CellElement::with_text).collect(),
            repeated: 1,
        }
    }

    /// Set the row repeat count (clamped to at least 1).
    pub fn repeated(mut self, count: usize) -> Self {
        self.repeated = count.max(1);
        self
    }

    /// Append a cell.
    pub fn push(&mut self, cell: CellElement) {
        self.cells.push(cell);
    }
}

impl Default for RowElement {
    fn default() -> Self {
        Self::new()
    }
}
