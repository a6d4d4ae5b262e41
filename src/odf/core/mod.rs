//! Core ODF package access.
//!
//! Opening the ZIP container, checking its MIME type and pulling the
//! `content.xml` part out as text. Everything spreadsheet specific lives in
//! [`crate::odf::ods`].

/// ODF package handling
mod package;
/// ODF XML parts
mod xml;

pub use package::Package;
pub use xml::Content;
