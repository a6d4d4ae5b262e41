//! Cell elements of an ODS table and their logical text.

/// One `table:table-cell` or `table:covered-table-cell` element.
///
/// Only what the grid needs is kept: the paragraph texts in document order,
/// the column repeat count and whether the cell is a covered (merged-away)
/// cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellElement {
    /// Concatenated run text of each `text:p` paragraph
    pub paragraphs: Vec<String>,
    /// Value of `table:number-columns-repeated`, at least 1
    pub repeated: usize,
    /// True for `table:covered-table-cell`
    pub covered: bool,
}

impl CellElement {
    /// Create an empty, non-repeated cell.
    pub fn new() -> Self {
        Self {
            paragraphs: Vec::new(),
            repeated: 1,
            covered: false,
        }
    }

    /// Create a cell holding a single paragraph.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            paragraphs: vec![text.into()],
            ..Self::new()
        }
    }

    /// Set the column repeat count (clamped to at least 1).
    pub fn repeated(mut self, count: usize) -> Self {
        self.repeated = count.max(1);
        self
    }

    /// Get the logical text of the cell.
    ///
    /// See [`extract_cell_text`].
    pub fn text(&self) -> String {
        extract_cell_text(self.paragraphs.iter().map(String::as_str))
    }
}

impl Default for CellElement {
    fn default() -> Self {
        Self::new()
    }
}

/// Join the paragraphs of a cell into its logical text.
///
/// Each paragraph is trimmed, blank paragraphs are dropped, and the rest are
/// joined with a single space. A cell without text yields an empty string.
pub fn extract_cell_text<'a, I>(paragraphs: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut text = String::new();
    for paragraph in paragraphs {
        let paragraph = paragraph.trim();
        if paragraph.is_empty() {
            continue;
        }
        if !text.is_empty() {
            text.push(' ');
        }
        text.push_str(paragraph);
    }
    text
}
