//! Relational grouping into the alignment matrix.
//!
//! The matrix sheet holds a small fixed grid of alignment names, followed by
//! free-text description rows that are not positionally tied to any cell.
//! Each description is attached to the cells whose name keywords it mentions.

use crate::grid::Grid;
use crate::policy::{LongestMatchWins, MatchPolicy};
use crate::record::MatrixCell;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Where names and descriptions sit on the matrix sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatrixLayout {
    /// Sheet holding the matrix
    pub sheet: String,
    /// Columns read from each name row
    pub columns: usize,
    /// Grid rows holding the cell names, top to bottom
    pub name_rows: Vec<usize>,
    /// Grid rows holding descriptions, half-open
    pub descriptions: Range<usize>,
    /// Leading words of a name considered as keywords
    pub keyword_count: usize,
    /// Shortest word, in characters, that counts as a keyword
    pub min_keyword_chars: usize,
}

impl Default for MatrixLayout {
    fn default() -> Self {
        Self {
            sheet: "Gesinnung".to_string(),
            columns: 3,
            name_rows: vec![0, 2, 4],
            descriptions: 6..30,
            keyword_count: 2,
            min_keyword_chars: 4,
        }
    }
}

impl MatrixLayout {
    /// Keywords of a cell name.
    ///
    /// Only the first `keyword_count` words are considered, and only those of
    /// at least `min_keyword_chars` characters are kept.
    pub fn keywords<'n>(&self, name: &'n str) -> Vec<&'n str> {
        name.split_whitespace()
            .take(self.keyword_count)
            .filter(|word| word.chars().count() >= self.min_keyword_chars)
            .collect()
    }
}

/// Matrix cells with their associated descriptions.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlignmentMatrix {
    rows: Vec<Vec<MatrixCell>>,
}

impl AlignmentMatrix {
    /// Build the matrix with the default longest-description policy.
    pub fn build(grid: &Grid, layout: &MatrixLayout) -> Self {
        Self::build_with(grid, layout, &LongestMatchWins)
    }

    /// Build the matrix, settling competing descriptions with `policy`.
    ///
    /// Description rows are visited top to bottom; a row's first cell is
    /// offered to every cell whose keywords it contains. A cell whose name
    /// yields no keyword never receives a description.
    pub fn build_with<P: MatchPolicy>(grid: &Grid, layout: &MatrixLayout, policy: &P) -> Self {
        let mut rows: Vec<Vec<MatrixCell>> = layout
            .name_rows
            .iter()
            .enumerate()
            .map(|(row, &grid_row)| {
                (0..layout.columns)
                    .map(|col| MatrixCell {
                        row,
                        col,
                        name: grid.cell(grid_row, col).trim().to_string(),
                        description: String::new(),
                    })
                    .collect()
            })
            .collect();

        let keywords: Vec<Vec<Vec<String>>> = rows
            .iter()
            .map(|cells| {
                cells
                    .iter()
                    .map(|cell| layout.keywords(&cell.name).into_iter().map(String::from).collect())
                    .collect()
            })
            .collect();

        let mut slots: Vec<Vec<Option<String>>> =
            rows.iter().map(|cells| vec![None; cells.len()]).collect();

        for (index, row) in grid.rows_in(layout.descriptions.clone()) {
            let text = row.first().map_or("", |cell| cell.trim());
            if text.is_empty() {
                continue;
            }
            for (r, cell_keywords) in keywords.iter().enumerate() {
                for (c, words) in cell_keywords.iter().enumerate() {
                    if words.iter().any(|word| text.contains(word.as_str()))
                        && policy.offer(&mut slots[r][c], text)
                    {
                        tracing::trace!(
                            row = index,
                            cell_row = r,
                            cell_col = c,
                            "description attached"
                        );
                    }
                }
            }
        }

        for (cells, cell_slots) in rows.iter_mut().zip(slots) {
            for (cell, slot) in cells.iter_mut().zip(cell_slots) {
                cell.description = slot.unwrap_or_default();
            }
        }

        Self { rows }
    }

    /// Rows of cells, top to bottom.
    pub fn rows(&self) -> &[Vec<MatrixCell>] {
        &self.rows
    }

    /// Cell at a matrix position.
    pub fn cell(&self, row: usize, col: usize) -> Option<&MatrixCell> {
        self.rows.get(row).and_then(|cells| cells.get(col))
    }

    /// Iterate over all cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &MatrixCell> {
        self.rows.iter().flatten()
    }

    /// Number of cells that received a description.
    pub fn described(&self) -> usize {
        self.cells().filter(|cell| !cell.description.is_empty()).count()
    }
}
