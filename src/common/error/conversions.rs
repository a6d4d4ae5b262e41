//! Error conversion implementations.
//!
//! This module contains From trait implementations to convert from the
//! collaborating crates' error types to the unified Error type.

use super::types::Error;

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::XmlError(err.to_string())
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::ZipError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collaborator_errors_keep_their_kind() {
        let err = Error::from(zip::result::ZipError::FileNotFound);
        assert!(matches!(err, Error::ZipError(_)));

        let attr = quick_xml::events::attributes::AttrError::Duplicated(10, 2);
        let err = Error::from(quick_xml::Error::from(attr));
        assert!(matches!(err, Error::XmlError(message) if !message.is_empty()));
    }
}
