//! XML part handling for ODF packages.

use crate::common::{Error, Result};

/// Parsed content.xml part
#[derive(Debug)]
pub struct Content {
    content: String,
}

impl Content {
    /// Parse content from bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let content = String::from_utf8(bytes.to_vec())
            .map_err(|_| Error::InvalidFormat("Invalid UTF-8 in XML content".to_string()))?;
        Ok(Self { content })
    }

    /// Get the raw XML content
    pub fn xml_content(&self) -> &str {
        &self.content
    }
}
