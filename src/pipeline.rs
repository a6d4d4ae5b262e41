//! End-to-end extraction over an opened spreadsheet.
//!
//! The pipeline ties the pieces together: the catalog decides which sheets
//! make up each character, every sheet is expanded into a grid, scanned for
//! fields and skill groups, and base and revision records are merged.
//! Characters are independent, so they are extracted in parallel; the
//! output keeps the catalog's sorted order.

use crate::catalog::{CatalogEntry, SheetCatalog};
use crate::common::Result;
use crate::config::ExtractConfig;
use crate::grid::GridBuilder;
use crate::group::{AlignmentMatrix, group_sections};
use crate::locate::{FieldLocator, Vocabulary, row_signature};
use crate::merge::merge_records;
use crate::odf::{Sheet, Spreadsheet};
use crate::record::{AttributeGroup, CharacterRecord};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Extract every character of the workbook.
///
/// Only compiling the vocabulary can fail; missing or malformed data shows
/// up as absent fields. Characters with neither a name nor any attribute are
/// left out.
pub fn extract_characters(
    spreadsheet: &Spreadsheet,
    config: &ExtractConfig,
) -> Result<Vec<CharacterRecord>> {
    let vocabulary = config.vocabulary()?;
    let catalog = SheetCatalog::from_spreadsheet(spreadsheet, &config.catalog);

    let layout = &config.character;
    if layout.width <= layout.offsets.max_column() {
        tracing::warn!(
            width = layout.width,
            max_column = layout.offsets.max_column(),
            "grid width cuts off value columns, those fields will stay empty"
        );
    }

    let entries: Vec<(&String, &CatalogEntry)> = catalog.entries().iter().collect();
    let records: Vec<CharacterRecord> = entries
        .par_iter()
        .filter_map(|(base_name, entry)| {
            let record = extract_entry(spreadsheet, config, &vocabulary, base_name, entry);
            if record.is_blank() {
                tracing::debug!(character = %base_name, "no name and no attributes, skipped");
                None
            } else {
                Some(record)
            }
        })
        .collect();

    tracing::info!(
        sheets = spreadsheet.sheet_count(),
        candidates = entries.len(),
        characters = records.len(),
        "character extraction finished"
    );
    Ok(records)
}

fn extract_entry(
    spreadsheet: &Spreadsheet,
    config: &ExtractConfig,
    vocabulary: &Vocabulary,
    base_name: &str,
    entry: &CatalogEntry,
) -> CharacterRecord {
    let read = |sheet_name: &Option<String>| {
        sheet_name
            .as_deref()
            .and_then(|name| spreadsheet.sheet_by_name(name))
            .map(|sheet| extract_sheet_record(sheet, config, vocabulary, base_name))
    };
    merge_records(read(&entry.base), read(&entry.revision))
}

/// Extract the record held by a single sheet.
///
/// `default_player` is used as the player name when the sheet has none.
pub fn extract_sheet_record(
    sheet: &Sheet,
    config: &ExtractConfig,
    vocabulary: &Vocabulary,
    default_player: &str,
) -> CharacterRecord {
    let layout = &config.character;
    let grid = layout.grid_builder().build(sheet);

    let fields =
        FieldLocator::new(vocabulary, &layout.offsets, &config.dice, layout.window).locate(&grid);
    let mut record = fields.into_record(default_player);
    record.skills = group_sections(&grid, config.skills.rows.clone(), vocabulary, &layout.offsets)
        .iter()
        .flat_map(AttributeGroup::skills)
        .collect();

    tracing::debug!(
        sheet = %sheet.name(),
        name = %record.name,
        attributes = record.attributes.len(),
        skills = record.skills.len(),
        "sheet extracted"
    );
    record
}

/// Build the alignment matrix from `sheet_name`, or from the configured
/// matrix sheet.
///
/// Returns `None` when the sheet does not exist.
pub fn extract_alignment_matrix(
    spreadsheet: &Spreadsheet,
    config: &ExtractConfig,
    sheet_name: Option<&str>,
) -> Option<AlignmentMatrix> {
    let layout = &config.matrix;
    let name = sheet_name.unwrap_or(&layout.sheet);
    let Some(sheet) = spreadsheet.sheet_by_name(name) else {
        tracing::warn!(sheet = %name, "matrix sheet not found");
        return None;
    };

    let grid = GridBuilder::new(layout.columns)
        .covered_cells(config.character.covered_cells)
        .build(sheet);
    let matrix = AlignmentMatrix::build(&grid, layout);
    tracing::info!(
        sheet = %name,
        cells = matrix.cells().count(),
        described = matrix.described(),
        "alignment matrix extracted"
    );
    Some(matrix)
}

/// A row that looks like it carries data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InspectedRow {
    /// Grid row index
    pub row: usize,
    /// Leading cells, up to the signature window, without trailing blanks
    pub cells: Vec<String>,
}

/// List the rows of a sheet that mention a vocabulary token or hold a dice
/// value.
///
/// Useful when adapting the offsets to a new sheet layout. Returns
/// `Ok(None)` when the sheet does not exist.
pub fn inspect_sheet(
    spreadsheet: &Spreadsheet,
    config: &ExtractConfig,
    sheet_name: &str,
) -> Result<Option<Vec<InspectedRow>>> {
    let Some(sheet) = spreadsheet.sheet_by_name(sheet_name) else {
        return Ok(None);
    };
    let vocabulary = config.vocabulary()?;
    let layout = &config.character;
    let grid = layout.grid_builder().build(sheet);

    let rows = grid
        .rows()
        .enumerate()
        .filter(|(_, row)| {
            let signature = row_signature(row, layout.window);
            !signature.is_empty()
                && (vocabulary.mentions_any(&signature)
                    || row.first().is_some_and(|first| vocabulary.classify_header(first).is_some())
                    || row.iter().any(|cell| config.dice.is_dice(cell)))
        })
        .map(|(index, row)| {
            let mut cells: Vec<String> = row.iter().take(layout.window).cloned().collect();
            while cells.last().is_some_and(|cell| cell.is_empty()) {
                cells.pop();
            }
            InspectedRow { row: index, cells }
        })
        .collect();
    Ok(Some(rows))
}
