//! OpenDocument container access.
//!
//! The package reader and the table parser are the collaborators the
//! extraction engine sits on: bytes in, named sheets of row and cell
//! elements out.

/// Core ODF package handling
mod core;
/// ODF spreadsheet (.ods) support
pub mod ods;

pub use ods::{CellElement, RowElement, Sheet, Spreadsheet};

/// ODF document flavours, as named by the package `mimetype`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OdfFormat {
    /// OpenDocument Text (.odt)
    Text,
    /// OpenDocument Spreadsheet (.ods)
    Spreadsheet,
    /// OpenDocument Presentation (.odp)
    Presentation,
    /// OpenDocument Drawing (.odg)
    Drawing,
}

/// MIME types of the ODF flavours, templates included
pub const ODF_MIME_TYPES: &[(&str, OdfFormat)] = &[
    ("application/vnd.oasis.opendocument.text", OdfFormat::Text),
    ("application/vnd.oasis.opendocument.spreadsheet", OdfFormat::Spreadsheet),
    ("application/vnd.oasis.opendocument.presentation", OdfFormat::Presentation),
    ("application/vnd.oasis.opendocument.graphics", OdfFormat::Drawing),
    ("application/vnd.oasis.opendocument.text-template", OdfFormat::Text),
    ("application/vnd.oasis.opendocument.spreadsheet-template", OdfFormat::Spreadsheet),
    ("application/vnd.oasis.opendocument.presentation-template", OdfFormat::Presentation),
    ("application/vnd.oasis.opendocument.graphics-template", OdfFormat::Drawing),
];

/// Detect ODF format from MIME type
pub fn detect_format_from_mime(mime_type: &str) -> Option<OdfFormat> {
    ODF_MIME_TYPES
        .iter()
        .find(|(mime, _)| *mime == mime_type)
        .map(|(_, format)| *format)
}
