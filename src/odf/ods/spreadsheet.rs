//! The opened spreadsheet document.

use super::Sheet;
use super::parser::OdsParser;
use crate::common::{Error, Result};
use crate::odf::core::{Content, Package};
use crate::odf::{OdfFormat, detect_format_from_mime};
use std::io::Cursor;
use std::path::Path;

/// Local file header signature of a ZIP archive.
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

/// An OpenDocument spreadsheet (.ods, or flat .fods).
///
/// The document is read once: `content.xml` is parsed into its named sheets
/// and the package is dropped. Sheets are read-only afterwards.
///
/// # Examples
///
/// ```no_run
/// use charsheet::odf::Spreadsheet;
///
/// # fn main() -> charsheet::Result<()> {
/// let spreadsheet = Spreadsheet::open("P&P V2.ods")?;
/// for sheet in spreadsheet.sheets() {
///     println!("{} ({} rows)", sheet.name(), sheet.logical_row_count());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Spreadsheet {
    sheets: Vec<Sheet>,
}

impl Spreadsheet {
    /// Open a spreadsheet from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid
    /// OpenDocument spreadsheet.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let bytes = std::fs::read(path.as_ref())?;
        Self::from_bytes(bytes)
    }

    /// Create a Spreadsheet from a byte buffer.
    ///
    /// Zipped packages are recognised by their ZIP signature; anything else
    /// is parsed as a flat XML document.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        if !bytes.starts_with(ZIP_MAGIC) {
            let xml = String::from_utf8(bytes)
                .map_err(|_| Error::InvalidFormat("Invalid UTF-8 in flat document".to_string()))?;
            return Self::from_flat_xml(&xml);
        }

        let package = Package::from_reader(Cursor::new(bytes))?;

        // Verify this is a spreadsheet
        let mime_type = package.mimetype();
        if detect_format_from_mime(mime_type) != Some(OdfFormat::Spreadsheet) {
            return Err(Error::InvalidFormat(format!(
                "Not an ODS file: MIME type is {}",
                mime_type
            )));
        }

        let content = Content::from_bytes(&package.get_file("content.xml")?)?;
        Self::from_content_xml(content.xml_content())
    }

    /// Parse a flat OpenDocument spreadsheet (`.fods`).
    pub fn from_flat_xml(xml: &str) -> Result<Self> {
        if !xml.contains("office:spreadsheet") {
            return Err(Error::InvalidFormat(
                "Flat document has no spreadsheet body".to_string(),
            ));
        }
        Self::from_content_xml(xml)
    }

    /// Parse the body of an already extracted `content.xml`.
    pub fn from_content_xml(xml: &str) -> Result<Self> {
        let sheets = OdsParser::parse_sheets(xml)?;
        tracing::debug!(sheets = sheets.len(), "parsed spreadsheet content");
        Ok(Self { sheets })
    }

    /// Build a spreadsheet from sheets assembled in memory.
    pub fn from_sheets(sheets: Vec<Sheet>) -> Self {
        Self { sheets }
    }

    /// Get all sheets in document order.
    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    /// Get the number of sheets in the spreadsheet.
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// Names of all sheets in document order.
    pub fn sheet_names(&self) -> impl Iterator<Item = &str> {
        self.sheets.iter().map(Sheet::name)
    }

    /// Get a sheet by name.
    ///
    /// Returns `None` when no sheet carries that name; a missing sheet is
    /// not an error.
    pub fn sheet_by_name(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|sheet| sheet.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FLAT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<office:document xmlns:office="urn:oasis:names:tc:opendocument:xmlns:office:1.0" xmlns:table="urn:oasis:names:tc:opendocument:xmlns:table:1.0" xmlns:text="urn:oasis:names:tc:opendocument:xmlns:text:1.0" office:mimetype="application/vnd.oasis.opendocument.spreadsheet"><office:body><office:spreadsheet><table:table table:name="Gesinnung"><table:table-row><table:table-cell><text:p>Lawful Good</text:p></table:table-cell></table:table-row></table:table><table:table table:name="Georg"/></office:spreadsheet></office:body></office:document>"#;

    #[test]
    fn test_flat_document() {
        let spreadsheet = Spreadsheet::from_bytes(FLAT.as_bytes().to_vec()).unwrap();
        assert_eq!(spreadsheet.sheet_count(), 2);
        assert_eq!(
            spreadsheet.sheet_names().collect::<Vec<_>>(),
            vec!["Gesinnung", "Georg"]
        );
    }

    #[test]
    fn test_flat_document_with_huge_space_run() {
        let flat = FLAT.replace(
            "<text:p>Lawful Good</text:p>",
            r#"<text:p>a<text:s text:c="1099511627776"/>b</text:p>"#,
        );
        let spreadsheet = Spreadsheet::from_bytes(flat.into_bytes()).unwrap();
        let sheet = spreadsheet.sheet_by_name("Gesinnung").unwrap();
        let text = sheet.rows[0].cells[0].text();
        assert!(text.starts_with('a') && text.ends_with('b'));
        assert!(text.len() <= crate::odf::ods::parser::MAX_SPACE_RUN + 2);
    }

    #[test]
    fn test_missing_sheet_is_none() {
        let spreadsheet = Spreadsheet::from_flat_xml(FLAT).unwrap();
        assert!(spreadsheet.sheet_by_name("Gesinnung").is_some());
        assert!(spreadsheet.sheet_by_name("Spielleiter").is_none());
    }

    #[test]
    fn test_non_spreadsheet_is_rejected() {
        let err = Spreadsheet::from_bytes(b"<office:document/>".to_vec()).unwrap_err();
        assert!(matches!(err, Error::InvalidFormat(_)));

        let err = Spreadsheet::from_bytes(b"PK\x03\x04garbage".to_vec()).unwrap_err();
        assert!(matches!(err, Error::InvalidFormat(_)));
    }
}
