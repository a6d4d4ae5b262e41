//! Unified error types for charsheet.
//!
//! This module provides a single error type for opening and parsing
//! spreadsheet packages, presenting a consistent API to callers.

// Submodule declarations
pub mod conversions;
pub mod types;

// Re-exports
pub use types::{Error, Result};
