//! Row-by-row field location.

use super::{DiceNotation, FieldKind, FieldOffsets, Label, ScalarField, Vocabulary, row_signature};
use crate::grid::Grid;
use crate::policy::{LastMatchWins, MatchPolicy};
use crate::record::CharacterRecord;
use std::collections::BTreeMap;

/// Fields found in one grid.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LocatedFields {
    pub name: Option<String>,
    pub player_name: Option<String>,
    pub class: Option<String>,
    pub race: Option<String>,
    pub level: Option<String>,
    /// Attribute display name to canonical dice value
    pub attributes: BTreeMap<String, String>,
}

impl LocatedFields {
    /// Turn the located fields into a record.
    ///
    /// `default_player` names the player when the sheet does not.
    pub fn into_record(self, default_player: &str) -> CharacterRecord {
        CharacterRecord {
            name: self.name.unwrap_or_default(),
            player_name: self
                .player_name
                .unwrap_or_else(|| default_player.to_string()),
            class: self.class.unwrap_or_default(),
            race: self.race.unwrap_or_default(),
            level: self.level.unwrap_or_default(),
            attributes: self.attributes,
            skills: Vec::new(),
        }
    }

    fn slot(&mut self, kind: FieldKind) -> Option<&mut Option<String>> {
        match kind {
            FieldKind::Name => Some(&mut self.name),
            FieldKind::PlayerName => Some(&mut self.player_name),
            FieldKind::Class => Some(&mut self.class),
            FieldKind::Race => Some(&mut self.race),
            FieldKind::Level => Some(&mut self.level),
            _ => None,
        }
    }
}

/// Scans a grid for labelled rows and reads their values.
///
/// Rows are scanned top to bottom. For every row the first `window` cells
/// form a lowercase signature that is classified by the [`Vocabulary`]; each
/// recognised field reads its value at the column given by the
/// [`FieldOffsets`]. Empty values and values rejected by dice normalization
/// leave the field untouched, so a later row may still supply it. Repeated
/// matches are settled by the policy (last match wins by default).
#[derive(Debug, Clone)]
pub struct FieldLocator<'a, P = LastMatchWins> {
    vocabulary: &'a Vocabulary,
    offsets: &'a FieldOffsets,
    dice: &'a DiceNotation,
    window: usize,
    policy: P,
}

impl<'a> FieldLocator<'a> {
    /// Create a locator with the last-match-wins policy.
    pub fn new(
        vocabulary: &'a Vocabulary,
        offsets: &'a FieldOffsets,
        dice: &'a DiceNotation,
        window: usize,
    ) -> Self {
        Self {
            vocabulary,
            offsets,
            dice,
            window,
            policy: LastMatchWins,
        }
    }
}

impl<'a, P: MatchPolicy> FieldLocator<'a, P> {
    /// Swap the tie-break policy.
    pub fn with_policy<Q: MatchPolicy>(self, policy: Q) -> FieldLocator<'a, Q> {
        FieldLocator {
            vocabulary: self.vocabulary,
            offsets: self.offsets,
            dice: self.dice,
            window: self.window,
            policy,
        }
    }

    /// Locate all fields in a grid.
    pub fn locate(&self, grid: &Grid) -> LocatedFields {
        let mut found = LocatedFields::default();

        for (index, row) in grid.rows().enumerate() {
            let signature = row_signature(row, self.window);
            if signature.is_empty() {
                continue;
            }
            for label in self.vocabulary.classify_signature(&signature) {
                match label {
                    Label::Scalar(field) => self.read_scalar(field, row, &mut found),
                    Label::Attribute(attribute) => {
                        let raw = self.offsets.read(row, FieldKind::Attribute);
                        match self.dice.normalize(raw) {
                            Some(value) => {
                                let mut slot = found.attributes.get(&attribute.display).cloned();
                                if self.policy.offer(&mut slot, &value) {
                                    found.attributes.insert(attribute.display.clone(), value);
                                }
                            },
                            None if !raw.is_empty() => {
                                tracing::debug!(
                                    row = index,
                                    attribute = %attribute.display,
                                    value = %raw,
                                    "value is not dice notation, ignored"
                                );
                            },
                            None => {},
                        }
                    },
                    Label::SectionHeader(_) => {},
                }
            }
        }

        found
    }

    fn read_scalar(&self, field: ScalarField, row: &[String], found: &mut LocatedFields) {
        let kinds: &[FieldKind] = match field {
            ScalarField::Name => &[FieldKind::Name, FieldKind::PlayerName],
            ScalarField::Class => &[FieldKind::Class],
            ScalarField::Race => &[FieldKind::Race],
            ScalarField::Level => &[FieldKind::Level],
        };
        for &kind in kinds {
            let value = self.offsets.read(row, kind);
            if value.is_empty() {
                continue;
            }
            if let Some(slot) = found.slot(kind) {
                self.policy.offer(slot, value);
            }
        }
    }
}
