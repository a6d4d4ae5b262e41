//! Extracted records.
//!
//! Plain in-memory structures; serializing them is left to the caller (the
//! binary writes JSON).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One character, as found on a base sheet and its revision.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterRecord {
    pub name: String,
    pub player_name: String,
    pub class: String,
    pub race: String,
    pub level: String,
    /// Attribute display name to canonical dice value
    pub attributes: BTreeMap<String, String>,
    pub skills: Vec<SkillEntry>,
}

impl CharacterRecord {
    /// A record with neither a name nor attributes carries nothing worth
    /// emitting.
    pub fn is_blank(&self) -> bool {
        self.name.is_empty() && self.attributes.is_empty()
    }
}

/// A skill row, flattened with the attribute it was grouped under.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SkillEntry {
    pub attribute: String,
    pub name: String,
    pub base: String,
    pub bonus: String,
    pub total: String,
}

/// A member row of a section.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GroupMember {
    /// Grid row the member was read from
    pub row: usize,
    pub name: String,
    pub base: String,
    pub bonus: String,
    pub total: String,
}

/// An attribute header and the skills listed beneath it, in sheet order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AttributeGroup {
    pub attribute: String,
    pub members: Vec<GroupMember>,
}

impl AttributeGroup {
    /// Flatten the members into skill entries.
    pub fn skills(&self) -> impl Iterator<Item = SkillEntry> + '_ {
        self.members.iter().map(|member| SkillEntry {
            attribute: self.attribute.clone(),
            name: member.name.clone(),
            base: member.base.clone(),
            bonus: member.bonus.clone(),
            total: member.total.clone(),
        })
    }
}

/// One cell of the alignment matrix.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MatrixCell {
    pub row: usize,
    pub col: usize,
    pub name: String,
    pub description: String,
}
