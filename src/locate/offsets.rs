//! Column offsets of field values.
//!
//! The sheets have no declared schema; values sit at fixed columns relative
//! to the row start, and the column differs per kind of field. The table is
//! explicit configuration rather than numbers scattered through the scan.

use super::ScalarField;
use serde::{Deserialize, Serialize};

/// Kinds of values read from a matched row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Character name, on the name row
    Name,
    /// Player name, on the name row
    PlayerName,
    /// Character class
    Class,
    /// Character race
    Race,
    /// Character level
    Level,
    /// Attribute dice value
    Attribute,
    /// Skill base value
    SkillBase,
    /// Skill bonus value
    SkillBonus,
    /// Skill total value
    SkillTotal,
}

impl From<ScalarField> for FieldKind {
    fn from(field: ScalarField) -> Self {
        match field {
            ScalarField::Name => FieldKind::Name,
            ScalarField::Class => FieldKind::Class,
            ScalarField::Race => FieldKind::Race,
            ScalarField::Level => FieldKind::Level,
        }
    }
}

/// Column index of each field kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldOffsets {
    pub name: usize,
    pub player_name: usize,
    pub class: usize,
    pub race: usize,
    pub level: usize,
    pub attribute: usize,
    pub skill_base: usize,
    pub skill_bonus: usize,
    pub skill_total: usize,
}

impl Default for FieldOffsets {
    fn default() -> Self {
        Self {
            name: 1,
            player_name: 7,
            class: 1,
            race: 4,
            level: 7,
            attribute: 4,
            skill_base: 1,
            skill_bonus: 2,
            skill_total: 4,
        }
    }
}

impl FieldOffsets {
    /// Column holding values of `kind`.
    pub fn column(&self, kind: FieldKind) -> usize {
        match kind {
            FieldKind::Name => self.name,
            FieldKind::PlayerName => self.player_name,
            FieldKind::Class => self.class,
            FieldKind::Race => self.race,
            FieldKind::Level => self.level,
            FieldKind::Attribute => self.attribute,
            FieldKind::SkillBase => self.skill_base,
            FieldKind::SkillBonus => self.skill_bonus,
            FieldKind::SkillTotal => self.skill_total,
        }
    }

    /// Read the value of `kind` from a row; missing columns read as empty.
    pub fn read<'r>(&self, row: &'r [String], kind: FieldKind) -> &'r str {
        row.get(self.column(kind)).map_or("", |cell| cell.trim())
    }

    /// Widest column any field is read from.
    pub fn max_column(&self) -> usize {
        [
            self.name,
            self.player_name,
            self.class,
            self.race,
            self.level,
            self.attribute,
            self.skill_base,
            self.skill_bonus,
            self.skill_total,
        ]
        .into_iter()
        .max()
        .unwrap_or(0)
    }
}
