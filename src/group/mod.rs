//! Section grouping.
//!
//! Two shapes of grouping are recovered from flat grids:
//!
//! - hierarchical: attribute header rows followed by their skill rows
//!   ([`group_sections`])
//! - relational: a fixed name grid whose descriptions are matched by keyword
//!   ([`AlignmentMatrix`])

mod hierarchy;
mod matrix;

pub use hierarchy::{GroupAccumulator, GroupState, SectionRow, SkillSection, group_sections};
pub use matrix::{AlignmentMatrix, MatrixLayout};
