//! ODF package (ZIP archive) handling.
//!
//! An OpenDocument file is a ZIP archive whose `mimetype` entry names the
//! document flavour and whose `content.xml` entry holds the body.

use crate::common::{Error, Result};
use std::cell::RefCell;
use std::io::{Read, Seek};
use zip::result::ZipError;

/// An ODF package (ZIP file containing XML documents)
pub struct Package<R> {
    archive: RefCell<zip::ZipArchive<R>>,
    mimetype: String,
}

impl<R: Read + Seek> Package<R> {
    /// Open an ODF package from a reader
    pub fn from_reader(reader: R) -> Result<Self> {
        let mut archive = zip::ZipArchive::new(reader)
            .map_err(|_| Error::InvalidFormat("Invalid ZIP archive".to_string()))?;

        let mimetype = Self::read_mimetype(&mut archive)?;

        Ok(Self {
            archive: RefCell::new(archive),
            mimetype,
        })
    }

    /// Read MIME type from the mimetype file
    fn read_mimetype(archive: &mut zip::ZipArchive<R>) -> Result<String> {
        let mut mimetype_file = match archive.by_name("mimetype") {
            Err(ZipError::FileNotFound) => {
                return Err(Error::InvalidFormat(
                    "No mimetype file found in ODF package".to_string(),
                ));
            },
            entry => entry?,
        };

        let mut content = String::new();
        mimetype_file.read_to_string(&mut content)?;
        Ok(content.trim().to_string())
    }

    /// Get the MIME type from the mimetype file
    pub fn mimetype(&self) -> &str {
        &self.mimetype
    }

    /// Get a file from the package by path
    pub fn get_file(&self, path: &str) -> Result<Vec<u8>> {
        let mut archive = self.archive.borrow_mut();
        let mut file = match archive.by_name(path) {
            Err(ZipError::FileNotFound) => return Err(Error::ComponentNotFound(path.to_string())),
            entry => entry?,
        };

        let mut content = Vec::new();
        file.read_to_end(&mut content)?;
        Ok(content)
    }
}
