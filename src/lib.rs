//! Charsheet - extraction of character records from OpenDocument workbooks
//!
//! Character sheets kept as spreadsheets have no declared schema: labels,
//! row positions and column layouts drift between sheets and between
//! revisions of one sheet. This library expands each sheet into a dense text
//! grid and locates the fields by keyword matching, fixed column offsets and
//! header grouping.
//!
//! # Features
//!
//! - **ODS reader**: zipped `.ods` packages and flat `.fods` documents
//! - **Grid expansion**: repeated rows and cells become a rectangular grid
//! - **Field location**: name, player, class, race, level and attributes,
//!   with dice values normalized to canonical notation
//! - **Grouping**: skills under their attribute headers, and the alignment
//!   matrix with its descriptions
//! - **Revisions**: revision sheets are merged over their base sheet
//!
//! # Example - Extracting characters
//!
//! ```no_run
//! use charsheet::{ExtractConfig, Spreadsheet, extract_characters};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let spreadsheet = Spreadsheet::open("P&P V2.ods")?;
//! let config = ExtractConfig::default();
//!
//! for character in extract_characters(&spreadsheet, &config)? {
//!     println!("{} ({}): {:?}", character.name, character.player_name, character.attributes);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Reading the alignment matrix
//!
//! ```no_run
//! use charsheet::{ExtractConfig, Spreadsheet, extract_alignment_matrix};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let spreadsheet = Spreadsheet::open("Spielleiter-Infos.ods")?;
//! if let Some(matrix) = extract_alignment_matrix(&spreadsheet, &ExtractConfig::default(), None) {
//!     for cell in matrix.cells() {
//!         println!("{}: {}", cell.name, cell.description);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod common;
pub mod config;
pub mod grid;
pub mod group;
pub mod locate;
pub mod merge;

/// OpenDocument spreadsheet reader
///
/// Opens the package, parses `content.xml` and exposes the named sheets with
/// their row and cell repeat counts.
pub mod odf;
pub mod pipeline;
pub mod policy;
pub mod record;

// Re-export commonly used types for convenience
pub use common::{Error, Result};
pub use config::ExtractConfig;
pub use odf::Spreadsheet;
pub use pipeline::{extract_alignment_matrix, extract_characters, inspect_sheet};
pub use record::{CharacterRecord, MatrixCell, SkillEntry};
