//! Expansion of repeated rows and cells into a [`Grid`].

use super::Grid;
use crate::odf::{RowElement, Sheet};
use serde::{Deserialize, Serialize};

/// Row ceiling applied when [`RowCap::All`] is requested.
pub const DEFAULT_ROW_CEILING: usize = 4096;

/// How many rows a grid holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowCap {
    /// Every logical row up to the last one with text, bounded by the
    /// builder's row ceiling.
    All,
    /// Exactly this many rows; missing rows are empty.
    Limit(usize),
}

/// Treatment of `table:covered-table-cell` elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoveredCells {
    /// Covered cells take no column.
    #[default]
    Skip,
    /// Covered cells take their columns, as empty text.
    Occupy,
}

/// Builds dense grids from sheets.
///
/// # Examples
///
/// ```
/// use charsheet::grid::{GridBuilder, RowCap};
/// use charsheet::odf::{CellElement, RowElement, Sheet};
///
/// let mut sheet = Sheet::new("Georg");
/// let mut row = RowElement::new();
/// row.push(CellElement::with_text("x").repeated(3));
/// sheet.rows.push(row);
///
/// let grid = GridBuilder::new(5).rows(RowCap::Limit(2)).build(&sheet);
/// assert_eq!(grid.row(0).unwrap(), ["x", "x", "x", "", ""]);
/// assert_eq!(grid.height(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridBuilder {
    width: usize,
    rows: RowCap,
    covered: CoveredCells,
    row_ceiling: usize,
}

impl GridBuilder {
    /// Create a builder for grids `width` columns wide, holding all rows.
    pub fn new(width: usize) -> Self {
        Self {
            width,
            rows: RowCap::All,
            covered: CoveredCells::Skip,
            row_ceiling: DEFAULT_ROW_CEILING,
        }
    }

    /// Set the row cap.
    pub fn rows(mut self, rows: RowCap) -> Self {
        self.rows = rows;
        self
    }

    /// Set how covered cells are treated.
    pub fn covered_cells(mut self, covered: CoveredCells) -> Self {
        self.covered = covered;
        self
    }

    /// Set the ceiling used by [`RowCap::All`].
    pub fn row_ceiling(mut self, ceiling: usize) -> Self {
        self.row_ceiling = ceiling;
        self
    }

    /// Expand a sheet into a grid.
    ///
    /// With [`RowCap::Limit`] the grid has exactly that many rows. With
    /// [`RowCap::All`] it ends at the last row holding any text within the
    /// column cap. Output depends only on document order.
    pub fn build(&self, sheet: &Sheet) -> Grid {
        let cap = match self.rows {
            RowCap::Limit(height) => height,
            RowCap::All => self.row_ceiling,
        };

        let mut rows: Vec<Vec<String>> = Vec::new();
        let mut content_end = 0;

        for row in sheet.rows() {
            if rows.len() >= cap {
                break;
            }
            let expanded = self.expand_row(row);
            let take = row.repeated.min(cap - rows.len());
            let has_text = expanded.iter().any(|cell| !cell.is_empty());
            rows.extend(std::iter::repeat_n(expanded, take));
            if has_text {
                content_end = rows.len();
            }
        }

        match self.rows {
            RowCap::Limit(height) => rows.resize(height, vec![String::new(); self.width]),
            RowCap::All => rows.truncate(content_end),
        }

        tracing::trace!(
            sheet = %sheet.name(),
            width = self.width,
            height = rows.len(),
            "built grid"
        );

        Grid {
            width: self.width,
            rows,
        }
    }

    /// Expand one row element to exactly `width` cells.
    ///
    /// Column repeats stop at the cap; short rows are padded.
    fn expand_row(&self, row: &RowElement) -> Vec<String> {
        let mut cells = Vec::with_capacity(self.width);
        for cell in &row.cells {
            if cells.len() >= self.width {
                break;
            }
            let text = match (cell.covered, self.covered) {
                (true, CoveredCells::Skip) => continue,
                (true, CoveredCells::Occupy) => String::new(),
                (false, _) => cell.text(),
            };
            let take = cell.repeated.min(self.width - cells.len());
            cells.extend(std::iter::repeat_n(text, take));
        }
        cells.resize(self.width, String::new());
        cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::odf::CellElement;

    fn sheet(rows: Vec<RowElement>) -> Sheet {
        Sheet {
            name: "Test".to_string(),
            rows,
        }
    }

    #[test]
    fn test_column_repeat_is_truncated_at_cap() {
        let mut row = RowElement::new();
        row.push(CellElement::with_text("a"));
        row.push(CellElement::with_text("x").repeated(1000));
        let grid = GridBuilder::new(4).build(&sheet(vec![row]));
        assert_eq!(grid.row(0).unwrap(), ["a", "x", "x", "x"]);
    }

    #[test]
    fn test_row_repeat_is_materialised() {
        let rows = vec![
            RowElement::from_texts(["top"]),
            RowElement::from_texts(["same"]).repeated(3),
            RowElement::from_texts(["bottom"]),
        ];
        let grid = GridBuilder::new(2).build(&sheet(rows));
        let firsts: Vec<&str> = grid.rows().map(|row| row[0].as_str()).collect();
        assert_eq!(firsts, vec!["top", "same", "same", "same", "bottom"]);
    }

    #[test]
    fn test_limit_pads_with_empty_rows() {
        let grid = GridBuilder::new(3)
            .rows(RowCap::Limit(4))
            .build(&sheet(vec![RowElement::from_texts(["a", "b"])]));
        assert_eq!(grid.height(), 4);
        assert_eq!(grid.row(0).unwrap(), ["a", "b", ""]);
        assert_eq!(grid.row(3).unwrap(), ["", "", ""]);
    }

    #[test]
    fn test_limit_cuts_repeated_run() {
        let rows = vec![RowElement::from_texts(["r"]).repeated(1_000_000)];
        let grid = GridBuilder::new(1).rows(RowCap::Limit(5)).build(&sheet(rows));
        assert_eq!(grid.height(), 5);
    }

    #[test]
    fn test_all_drops_trailing_blank_rows() {
        let rows = vec![
            RowElement::from_texts(["a"]),
            RowElement::new().repeated(10),
            RowElement::from_texts(["b"]),
            RowElement::new().repeated(1_048_000),
        ];
        let grid = GridBuilder::new(2).build(&sheet(rows));
        assert_eq!(grid.height(), 12);
        assert_eq!(grid.cell(11, 0), "b");
    }

    #[test]
    fn test_all_respects_ceiling() {
        let rows = vec![RowElement::from_texts(["x"]).repeated(100)];
        let grid = GridBuilder::new(1).row_ceiling(7).build(&sheet(rows));
        assert_eq!(grid.height(), 7);
    }

    #[test]
    fn test_covered_cells() {
        let mut row = RowElement::new();
        row.push(CellElement::with_text("Name"));
        let mut covered = CellElement::with_text("hidden").repeated(2);
        covered.covered = true;
        row.push(covered);
        row.push(CellElement::with_text("Alriik"));
        let sheet = sheet(vec![row]);

        let skipped = GridBuilder::new(4).build(&sheet);
        assert_eq!(skipped.row(0).unwrap(), ["Name", "Alriik", "", ""]);

        let occupied = GridBuilder::new(4)
            .covered_cells(CoveredCells::Occupy)
            .build(&sheet);
        assert_eq!(occupied.row(0).unwrap(), ["Name", "", "", "Alriik"]);
    }

    #[test]
    fn test_zero_width() {
        let grid = GridBuilder::new(0)
            .rows(RowCap::Limit(2))
            .build(&sheet(vec![RowElement::from_texts(["a"])]));
        assert_eq!(grid.height(), 2);
        assert!(grid.row(0).unwrap().is_empty());
    }

    #[cfg(test)]
    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        /// Strategy for a cell: short text and a small repeat count
        fn cell_strategy() -> impl Strategy<Value = CellElement> {
            ("[a-z]{0,3}", 1usize..6).prop_map(|(text, repeat)| {
                CellElement::with_text(text).repeated(repeat)
            })
        }

        /// Strategy for a row of cells with a small repeat count
        fn row_strategy() -> impl Strategy<Value = RowElement> {
            (prop::collection::vec(cell_strategy(), 0..8), 1usize..4).prop_map(
                |(cells, repeat)| RowElement { cells, repeated: repeat },
            )
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(200))]

            #[test]
            fn prop_grid_is_dense(
                rows in prop::collection::vec(row_strategy(), 0..12),
                width in 0usize..20,
                height in 0usize..40,
            ) {
                let grid = GridBuilder::new(width)
                    .rows(RowCap::Limit(height))
                    .build(&sheet(rows));
                prop_assert_eq!(grid.height(), height);
                for row in grid.rows() {
                    prop_assert_eq!(row.len(), width);
                }
            }

            #[test]
            fn prop_repeat_fills_until_cap(
                prefix in 0usize..10,
                repeat in 1usize..30,
                width in 1usize..20,
            ) {
                let mut row = RowElement::new();
                row.push(CellElement::new().repeated(prefix));
                row.push(CellElement::with_text("x").repeated(repeat));
                row.push(CellElement::with_text("tail"));
                let grid = GridBuilder::new(width).rows(RowCap::Limit(1)).build(&sheet(vec![row]));
                let cells = grid.row(0).unwrap();

                // An empty prefix cell still spans `prefix.max(1)` columns
                let start = prefix.max(1);
                let end = (start + repeat).min(width);
                for (col, text) in cells.iter().enumerate() {
                    if col >= start && col < end {
                        prop_assert_eq!(text.as_str(), "x");
                    } else if col == start + repeat {
                        prop_assert_eq!(text.as_str(), "tail");
                    } else {
                        prop_assert_eq!(text.as_str(), "");
                    }
                }
            }
        }
    }
}
