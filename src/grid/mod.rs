//! Dense text grids built from ODS sheets.
//!
//! ODS stores runs of identical cells and rows once, with a repeat count.
//! The heuristics downstream want plain `(row, column)` lookups instead, so
//! [`GridBuilder`] expands the runs into a rectangular [`Grid`] bounded by a
//! column cap and a row cap.

mod builder;

pub use builder::{CoveredCells, DEFAULT_ROW_CEILING, GridBuilder, RowCap};

/// A rectangular grid of cell texts.
///
/// Every row has exactly [`Grid::width`] cells; absent cells are empty
/// strings. Grids are immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Grid {
    width: usize,
    rows: Vec<Vec<String>>,
}

impl Grid {
    /// Build a grid from explicit rows, padding or truncating each to `width`.
    pub fn from_rows<R, S>(width: usize, rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let rows = rows
            .into_iter()
            .map(|row| {
                let mut cells: Vec<String> = row.into_iter().take(width).map(Into::into).collect();
                cells.resize(width, String::new());
                cells
            })
            .collect();
        Self { width, rows }
    }

    /// Number of columns in every row.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Check whether the grid has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get one row, or `None` past the last row.
    pub fn row(&self, index: usize) -> Option<&[String]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// Get a cell's text; out-of-range positions read as empty.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(col))
            .map_or("", String::as_str)
    }

    /// Iterate over all rows top to bottom.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[String]> {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Iterate over `(index, row)` pairs of a half-open row range, clamped
    /// to the grid.
    pub fn rows_in(
        &self,
        range: std::ops::Range<usize>,
    ) -> impl Iterator<Item = (usize, &[String])> {
        let end = range.end.min(self.rows.len());
        let start = range.start.min(end);
        (start..end).map(move |index| (index, self.rows[index].as_slice()))
    }
}
