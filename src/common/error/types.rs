//! Unified error type for charsheet.
//!
//! Only failures that make a whole document unusable surface here. Missing
//! sheets, malformed field values and truncated grids are not errors; they
//! show up as absent values in the extracted records.
use thiserror::Error;

/// Main error type for charsheet operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The input is not an OpenDocument spreadsheet
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// A required part of the package is missing
    #[error("Component not found: {0}")]
    ComponentNotFound(String),

    /// XML parsing error
    #[error("XML error: {0}")]
    XmlError(String),

    /// ZIP archive error
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// Extraction configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for charsheet operations.
pub type Result<T> = std::result::Result<T, Error>;
