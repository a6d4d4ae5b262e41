//! Attribute to skill grouping.
//!
//! A row whose first cell is exactly an attribute header opens a group;
//! every following row with a non-empty first cell joins it until the next
//! header or the end of the range. The scan is a fold over the rows with an
//! explicit [`GroupState`].

use crate::grid::Grid;
use crate::locate::{FieldKind, FieldOffsets, Label, Vocabulary};
use crate::record::{AttributeGroup, GroupMember};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Where the skill section sits and which headers open its groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillSection {
    /// First cell texts that open a group
    pub headers: Vec<String>,
    /// Grid rows scanned, half-open
    pub rows: Range<usize>,
}

impl Default for SkillSection {
    fn default() -> Self {
        Self {
            headers: [
                "Reflexe",
                "Koordination",
                "Stärke",
                "Wissen",
                "Wahrnehmung",
                "Ausstrahlung",
                "Magie",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            rows: 32..136,
        }
    }
}

/// What a single row means to the grouping scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionRow<'v> {
    /// The first cell is a header label
    Header(&'v str),
    /// A non-empty, non-header first cell
    Member(GroupMember),
    /// An empty first cell
    Blank,
}

impl<'v> SectionRow<'v> {
    /// Classify a grid row.
    pub fn classify(
        index: usize,
        row: &[String],
        vocabulary: &'v Vocabulary,
        offsets: &FieldOffsets,
    ) -> Self {
        let first = row.first().map_or("", |cell| cell.trim());
        if first.is_empty() {
            return SectionRow::Blank;
        }
        match vocabulary.classify_header(first) {
            Some(Label::SectionHeader(header)) => SectionRow::Header(header),
            _ => SectionRow::Member(GroupMember {
                row: index,
                name: first.to_string(),
                base: offsets.read(row, FieldKind::SkillBase).to_string(),
                bonus: offsets.read(row, FieldKind::SkillBonus).to_string(),
                total: offsets.read(row, FieldKind::SkillTotal).to_string(),
            }),
        }
    }
}

/// State of the grouping scan.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GroupState {
    /// No header seen yet
    #[default]
    NoGroup,
    /// Collecting members under an open header
    InGroup(AttributeGroup),
}

/// Accumulator threaded through the fold.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GroupAccumulator {
    state: GroupState,
    closed: Vec<AttributeGroup>,
    dropped: usize,
}

impl GroupAccumulator {
    /// Start with no open group.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> &GroupState {
        &self.state
    }

    /// Member rows seen before any header.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Advance by one row.
    pub fn step(mut self, row: SectionRow<'_>) -> Self {
        self.state = match (std::mem::take(&mut self.state), row) {
            (state, SectionRow::Blank) => state,
            (GroupState::NoGroup, SectionRow::Header(header)) => {
                GroupState::InGroup(AttributeGroup {
                    attribute: header.to_string(),
                    members: Vec::new(),
                })
            },
            (GroupState::InGroup(group), SectionRow::Header(header)) => {
                self.closed.push(group);
                GroupState::InGroup(AttributeGroup {
                    attribute: header.to_string(),
                    members: Vec::new(),
                })
            },
            (GroupState::InGroup(mut group), SectionRow::Member(member)) => {
                group.members.push(member);
                GroupState::InGroup(group)
            },
            (GroupState::NoGroup, SectionRow::Member(member)) => {
                tracing::debug!(
                    row = member.row,
                    name = %member.name,
                    "row precedes any attribute header, dropped"
                );
                self.dropped += 1;
                GroupState::NoGroup
            },
        };
        self
    }

    /// Close the open group and return all groups in order.
    pub fn finish(mut self) -> Vec<AttributeGroup> {
        if let GroupState::InGroup(group) = self.state {
            self.closed.push(group);
        }
        self.closed
    }
}

/// Group the rows of `range` under their attribute headers.
pub fn group_sections(
    grid: &Grid,
    range: Range<usize>,
    vocabulary: &Vocabulary,
    offsets: &FieldOffsets,
) -> Vec<AttributeGroup> {
    grid.rows_in(range)
        .fold(GroupAccumulator::new(), |acc, (index, row)| {
            acc.step(SectionRow::classify(index, row, vocabulary, offsets))
        })
        .finish()
}
