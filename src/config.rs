//! Extraction configuration.
//!
//! Every vocabulary, cap and column offset the heuristics rely on lives
//! here. [`ExtractConfig::default`] reproduces the stock layout of the
//! German character-sheet workbook; a YAML file may override any part of it,
//! missing keys keep their defaults.

use crate::catalog::CatalogConfig;
use crate::common::{Error, Result};
use crate::grid::{CoveredCells, DEFAULT_ROW_CEILING, GridBuilder, RowCap};
use crate::group::{MatrixLayout, SkillSection};
use crate::locate::{
    AttributeLabel, DiceNotation, FieldOffsets, ScalarField, ScalarRule, Vocabulary,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Layout of a character sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterLayout {
    /// Column cap of the character grid
    pub width: usize,
    /// Row cap of the character grid
    pub rows: RowCap,
    /// Hard bound on rows when `rows` is `all`
    pub row_ceiling: usize,
    pub covered_cells: CoveredCells,
    /// Leading cells that make up a row signature
    pub window: usize,
    pub scalars: Vec<ScalarRule>,
    pub attributes: Vec<AttributeLabel>,
    pub offsets: FieldOffsets,
}

impl Default for CharacterLayout {
    fn default() -> Self {
        Self {
            width: 15,
            rows: RowCap::All,
            row_ceiling: DEFAULT_ROW_CEILING,
            covered_cells: CoveredCells::Skip,
            window: 8,
            scalars: vec![
                ScalarRule {
                    field: ScalarField::Name,
                    markers: vec!["name".to_string()],
                    co_markers: vec!["charakter".to_string(), "karakter".to_string()],
                },
                ScalarRule::new(ScalarField::Class, "klasse"),
                ScalarRule::new(ScalarField::Race, "rasse"),
                ScalarRule::new(ScalarField::Level, "stufe"),
            ],
            attributes: [
                "Stärke",
                "Geschicklichkeit",
                "Intelligenz",
                "Weisheit",
                "Charisma",
                "Konstitution",
            ]
            .into_iter()
            .map(AttributeLabel::new)
            .collect(),
            offsets: FieldOffsets::default(),
        }
    }
}

impl CharacterLayout {
    /// Grid builder for character sheets.
    pub fn grid_builder(&self) -> GridBuilder {
        GridBuilder::new(self.width)
            .rows(self.rows)
            .covered_cells(self.covered_cells)
            .row_ceiling(self.row_ceiling)
    }
}

/// Complete extraction configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    pub catalog: CatalogConfig,
    pub character: CharacterLayout,
    pub skills: SkillSection,
    pub dice: DiceNotation,
    pub matrix: MatrixLayout,
}

impl ExtractConfig {
    /// Parse a YAML configuration.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_saphyr::from_str(yaml)
            .map_err(|e| Error::Config(format!("invalid configuration: {}", e)))
    }

    /// Load a YAML configuration file.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    /// Compile the label vocabulary of character and skill rows.
    pub fn vocabulary(&self) -> Result<Vocabulary> {
        Vocabulary::new(&self.character.scalars, &self.character.attributes, &self.skills.headers)
    }
}
