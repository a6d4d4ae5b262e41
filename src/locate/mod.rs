//! Heuristic location of named fields in a grid.
//!
//! The sheets carry no schema. Fields are found by keyword tests on a row's
//! leading cells and read from fixed columns of the matching row:
//!
//! - [`label`]: the vocabularies and the single classification step that
//!   turns a row into [`Label`] variants
//! - [`offsets`]: which column each kind of value is read from
//! - [`dice`]: normalization of `3W+1` style values
//! - [`locator`]: the top-to-bottom scan

pub mod dice;
pub mod label;
pub mod locator;
pub mod offsets;

pub use dice::DiceNotation;
pub use label::{AttributeLabel, Label, ScalarField, ScalarRule, Vocabulary, row_signature};
pub use locator::{FieldLocator, LocatedFields};
pub use offsets::{FieldKind, FieldOffsets};
