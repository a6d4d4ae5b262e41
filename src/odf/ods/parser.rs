//! ODS-specific parsing of `content.xml`.
//!
//! Builds the [`Sheet`] / [`RowElement`] / [`CellElement`] tree the grid
//! builder consumes. Repeat counts are recorded, not expanded.

use super::{CellElement, RowElement, Sheet};
use crate::common::{Error, Result};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// Longest run of spaces a single `text:s` element may expand to.
pub(crate) const MAX_SPACE_RUN: usize = 64;

/// Parser for the table structures of an ODS body.
pub(crate) struct OdsParser;

impl OdsParser {
    /// Parse all sheets from ODS content.xml (or a flat `.fods` document).
    pub fn parse_sheets(xml_content: &str) -> Result<Vec<Sheet>> {
        let mut reader = Reader::from_str(xml_content);
        let mut buf = Vec::new();
        let mut sheets = Vec::new();

        // Parser state
        let mut current_sheet: Option<Sheet> = None;
        let mut current_row: Option<RowElement> = None;
        let mut current_cell: Option<CellElement> = None;
        let mut paragraph: Option<String> = None;
        // Sub-tables inside cells and annotations are not part of the grid
        let mut nested_tables = 0usize;
        let mut annotation_depth = 0usize;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => match e.name().as_ref() {
                    b"table:table" => {
                        if current_sheet.is_some() {
                            nested_tables += 1;
                        } else {
                            current_sheet = Some(Sheet::new(Self::extract_table_name(e)?));
                        }
                    },
                    b"table:table-row" if nested_tables == 0 && current_sheet.is_some() => {
                        current_row = Some(RowElement::new().repeated(Self::repeat_count(
                            e,
                            b"table:number-rows-repeated",
                        )?));
                    },
                    b"table:table-cell" | b"table:covered-table-cell"
                        if nested_tables == 0 && current_row.is_some() =>
                    {
                        current_cell = Some(Self::parse_cell_start(e)?);
                    },
                    b"office:annotation" => annotation_depth += 1,
                    b"text:p" | b"text:h"
                        if Self::collecting(&current_cell, nested_tables, annotation_depth) =>
                    {
                        paragraph = Some(String::new());
                    },
                    _ => {},
                },
                Ok(Event::Empty(ref e)) => match e.name().as_ref() {
                    b"table:table" if current_sheet.is_none() => {
                        sheets.push(Sheet::new(Self::extract_table_name(e)?));
                    },
                    b"table:table-row" if nested_tables == 0 => {
                        if let Some(ref mut sheet) = current_sheet {
                            sheet.rows.push(RowElement::new().repeated(Self::repeat_count(
                                e,
                                b"table:number-rows-repeated",
                            )?));
                        }
                    },
                    b"table:table-cell" | b"table:covered-table-cell" if nested_tables == 0 => {
                        let cell = Self::parse_cell_start(e)?;
                        if let Some(ref mut row) = current_row {
                            row.push(cell);
                        }
                    },
                    b"text:s" => {
                        if let Some(ref mut text) = paragraph {
                            let count = Self::repeat_count(e, b"text:c")?;
                            if count > MAX_SPACE_RUN {
                                tracing::warn!(count, "space run too long, truncating");
                            }
                            text.extend(std::iter::repeat_n(' ', count.min(MAX_SPACE_RUN)));
                        }
                    },
                    b"text:tab" | b"text:line-break" => {
                        if let Some(ref mut text) = paragraph {
                            text.push(' ');
                        }
                    },
                    _ => {},
                },
                Ok(Event::Text(ref t)) => {
                    if let Some(ref mut text) = paragraph {
                        text.push_str(&String::from_utf8_lossy(t));
                    }
                },
                Ok(Event::CData(ref t)) => {
                    if let Some(ref mut text) = paragraph {
                        text.push_str(&String::from_utf8_lossy(t));
                    }
                },
                Ok(Event::GeneralRef(ref r)) => {
                    if let Some(ref mut text) = paragraph {
                        match r.resolve_char_ref() {
                            Ok(Some(ch)) => text.push(ch),
                            _ => {
                                let name = String::from_utf8_lossy(r);
                                if let Some(resolved) =
                                    quick_xml::escape::resolve_predefined_entity(&name)
                                {
                                    text.push_str(resolved);
                                }
                            },
                        }
                    }
                },
                Ok(Event::End(ref e)) => match e.name().as_ref() {
                    b"text:p" | b"text:h" => {
                        if let (Some(text), Some(cell)) = (paragraph.take(), current_cell.as_mut())
                        {
                            cell.paragraphs.push(text);
                        }
                    },
                    b"office:annotation" => {
                        annotation_depth = annotation_depth.saturating_sub(1);
                    },
                    b"table:table-cell" | b"table:covered-table-cell" if nested_tables == 0 => {
                        if let (Some(cell), Some(row)) = (current_cell.take(), current_row.as_mut())
                        {
                            row.push(cell);
                        }
                    },
                    b"table:table-row" if nested_tables == 0 => {
                        if let (Some(row), Some(sheet)) =
                            (current_row.take(), current_sheet.as_mut())
                        {
                            sheet.rows.push(row);
                        }
                    },
                    b"table:table" => {
                        if nested_tables > 0 {
                            nested_tables -= 1;
                        } else if let Some(sheet) = current_sheet.take() {
                            tracing::trace!(
                                sheet = %sheet.name,
                                rows = sheet.rows.len(),
                                "parsed sheet"
                            );
                            sheets.push(sheet);
                        }
                    },
                    _ => {},
                },
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::XmlError(format!(
                        "error at position {}: {}",
                        reader.error_position(),
                        e
                    )));
                },
                _ => {},
            }
            buf.clear();
        }

        Ok(sheets)
    }

    /// Paragraph text is collected only inside a grid cell, outside
    /// annotations and sub-tables.
    fn collecting(
        cell: &Option<CellElement>,
        nested_tables: usize,
        annotation_depth: usize,
    ) -> bool {
        cell.is_some() && nested_tables == 0 && annotation_depth == 0
    }

    /// Extract table name from table:table element
    fn extract_table_name(e: &BytesStart) -> Result<String> {
        for attr_result in e.attributes() {
            let attr = attr_result.map_err(quick_xml::Error::from)?;
            if attr.key.as_ref() == b"table:name" {
                let value = attr.unescape_value()?;
                return Ok(value.into_owned());
            }
        }
        Ok(String::new())
    }

    /// Build a cell from its start tag, without text yet.
    fn parse_cell_start(e: &BytesStart) -> Result<CellElement> {
        let mut cell = CellElement::new().repeated(Self::repeat_count(
            e,
            b"table:number-columns-repeated",
        )?);
        cell.covered = e.name().as_ref() == b"table:covered-table-cell";
        Ok(cell)
    }

    /// Read a positive count attribute, defaulting to 1.
    ///
    /// Unparsable counts are logged and treated as 1 so a single odd element
    /// never aborts the document.
    fn repeat_count(e: &BytesStart, key: &[u8]) -> Result<usize> {
        for attr_result in e.attributes() {
            let attr = attr_result.map_err(quick_xml::Error::from)?;
            if attr.key.as_ref() != key {
                continue;
            }
            let raw = String::from_utf8_lossy(&attr.value);
            return Ok(match raw.trim().parse::<usize>() {
                Ok(count) => count.max(1),
                Err(_) => {
                    tracing::warn!(
                        attribute = %String::from_utf8_lossy(key),
                        value = %raw,
                        "unparsable repeat count, using 1"
                    );
                    1
                },
            });
        }
        Ok(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wrap(body: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<office:document-content xmlns:office="urn:oasis:names:tc:opendocument:xmlns:office:1.0" xmlns:table="urn:oasis:names:tc:opendocument:xmlns:table:1.0" xmlns:text="urn:oasis:names:tc:opendocument:xmlns:text:1.0"><office:body><office:spreadsheet>{body}</office:spreadsheet></office:body></office:document-content>"#
        )
    }

    #[test]
    fn test_parse_sheet_names_and_rows() {
        let xml = wrap(
            r#"<table:table table:name="Georg"><table:table-row><table:table-cell><text:p>Name Charakter</text:p></table:table-cell><table:table-cell><text:p>Alriik</text:p></table:table-cell></table:table-row></table:table><table:table table:name="Georg_V2"/>"#,
        );
        let sheets = OdsParser::parse_sheets(&xml).unwrap();
        assert_eq!(sheets.len(), 2);
        assert_eq!(sheets[0].name(), "Georg");
        assert_eq!(sheets[0].rows.len(), 1);
        assert_eq!(sheets[0].rows[0].cells[1].text(), "Alriik");
        assert_eq!(sheets[1].name(), "Georg_V2");
        assert!(sheets[1].rows.is_empty());
    }

    #[test]
    fn test_repeat_attributes_are_recorded() {
        let xml = wrap(
            r#"<table:table table:name="S"><table:table-row table:number-rows-repeated="3"><table:table-cell table:number-columns-repeated="4"><text:p>x</text:p></table:table-cell><table:table-cell table:number-columns-repeated="1020"/></table:table-row><table:table-row table:number-rows-repeated="bogus"/></table:table>"#,
        );
        let sheets = OdsParser::parse_sheets(&xml).unwrap();
        let rows = &sheets[0].rows;
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].repeated, 3);
        assert_eq!(rows[0].cells[0].repeated, 4);
        assert_eq!(rows[0].cells[1].repeated, 1020);
        assert_eq!(rows[0].cells[1].text(), "");
        assert_eq!(rows[1].repeated, 1);
        assert_eq!(sheets[0].logical_row_count(), 4);
    }

    #[test]
    fn test_inline_markup_and_entities() {
        let xml = wrap(
            r#"<table:table table:name="S"><table:table-row><table:table-cell><text:p><text:span>Lawful</text:span><text:s/>Good &amp; <text:span>Co</text:span></text:p><text:p>  </text:p><text:p>zwei<text:s text:c="2"/>Leer</text:p></table:table-cell></table:table-row></table:table>"#,
        );
        let sheets = OdsParser::parse_sheets(&xml).unwrap();
        assert_eq!(sheets[0].rows[0].cells[0].text(), "Lawful Good & Co zwei  Leer");
    }

    #[test]
    fn test_covered_cells_and_annotations() {
        let xml = wrap(
            r#"<table:table table:name="S"><table:table-row><table:table-cell><office:annotation><text:p>note</text:p></office:annotation><text:p>Wert</text:p></table:table-cell><table:covered-table-cell table:number-columns-repeated="2"/><table:table-cell><text:p>4</text:p></table:table-cell></table:table-row></table:table>"#,
        );
        let sheets = OdsParser::parse_sheets(&xml).unwrap();
        let cells = &sheets[0].rows[0].cells;
        assert_eq!(cells.len(), 3);
        assert_eq!(cells[0].text(), "Wert");
        assert!(cells[1].covered);
        assert_eq!(cells[1].repeated, 2);
        assert!(!cells[2].covered);
    }

    #[test]
    fn test_nested_table_is_not_part_of_grid() {
        let xml = wrap(
            r#"<table:table table:name="Outer"><table:table-row><table:table-cell><table:table table:name="Inner"><table:table-row><table:table-cell><text:p>inner</text:p></table:table-cell></table:table-row></table:table></table:table-cell><table:table-cell><text:p>outer</text:p></table:table-cell></table:table-row></table:table>"#,
        );
        let sheets = OdsParser::parse_sheets(&xml).unwrap();
        assert_eq!(sheets.len(), 1);
        assert_eq!(sheets[0].name(), "Outer");
        let cells = &sheets[0].rows[0].cells;
        assert_eq!(cells.len(), 2);
        assert_eq!(cells[0].text(), "");
        assert_eq!(cells[1].text(), "outer");
    }

    #[test]
    fn test_space_run_is_bounded() {
        let xml = wrap(
            r#"<table:table table:name="S"><table:table-row><table:table-cell><text:p>a<text:s text:c="1099511627776"/>b</text:p></table:table-cell></table:table-row></table:table>"#,
        );
        let sheets = OdsParser::parse_sheets(&xml).unwrap();
        let text = &sheets[0].rows[0].cells[0].paragraphs[0];
        assert_eq!(text.len(), MAX_SPACE_RUN + 2);
        assert!(text.starts_with("a "));
        assert!(text.ends_with(" b"));
    }

    #[test]
    fn test_invalid_attribute_is_an_xml_error() {
        let xml = wrap(r#"<table:table table:name="A" table:name="B"/>"#);
        assert!(matches!(
            OdsParser::parse_sheets(&xml),
            Err(Error::XmlError(_))
        ));
    }

    #[test]
    fn test_malformed_xml_is_an_error() {
        let xml = wrap(r#"<table:table table:name="S"><table:table-row></table:table>"#);
        assert!(matches!(
            OdsParser::parse_sheets(&xml),
            Err(Error::XmlError(_))
        ));
    }
}
