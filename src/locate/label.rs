//! Label vocabularies and row classification.
//!
//! All keyword tests run once per row against a compiled Aho-Corasick
//! automaton; downstream code only sees the finite [`Label`] variants.

use crate::common::{Error, Result};
use aho_corasick::{AhoCorasick, MatchKind};
use fixedbitset::FixedBitSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::HashMap;

/// Single-valued character fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarField {
    /// Character name (its row also carries the player name)
    Name,
    /// Character class
    Class,
    /// Character race
    Race,
    /// Character level
    Level,
}

/// Recognition rule for a scalar field.
///
/// A row signature matches when it contains one of `markers` and, if
/// `co_markers` is non-empty, also one of `co_markers`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScalarRule {
    /// Field this rule recognises
    pub field: ScalarField,
    /// Tokens of which one must occur
    pub markers: Vec<String>,
    /// Tokens of which one must also occur
    #[serde(default)]
    pub co_markers: Vec<String>,
}

impl ScalarRule {
    /// Rule with a single marker and no co-marker.
    pub fn new(field: ScalarField, marker: &str) -> Self {
        Self {
            field,
            markers: vec![marker.to_string()],
            co_markers: Vec::new(),
        }
    }
}

/// An attribute as it is searched for and as it is reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeLabel {
    /// Substring looked for in row signatures
    pub marker: String,
    /// Key used in the extracted record
    pub display: String,
}

impl AttributeLabel {
    /// Label whose marker is the lowercased display name.
    pub fn new(display: &str) -> Self {
        Self {
            marker: display.to_lowercase(),
            display: display.to_string(),
        }
    }
}

/// Result of classifying a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label<'v> {
    /// The row holds a scalar field
    Scalar(ScalarField),
    /// The row holds an attribute value
    Attribute(&'v AttributeLabel),
    /// The row opens a section of the given header
    SectionHeader(&'v str),
}

/// Compiled label vocabulary.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    automaton: AhoCorasick,
    pattern_count: usize,
    scalars: Vec<(ScalarField, Vec<usize>, Vec<usize>)>,
    attributes: Vec<(AttributeLabel, usize)>,
    headers: Vec<String>,
}

impl Vocabulary {
    /// Compile scalar rules, attribute labels and section headers.
    ///
    /// Markers are matched case-insensitively against lowercase row
    /// signatures; section headers must equal a row's first cell exactly.
    pub fn new(
        scalars: &[ScalarRule],
        attributes: &[AttributeLabel],
        headers: &[String],
    ) -> Result<Self> {
        let mut patterns: Vec<String> = Vec::new();
        let mut ids: HashMap<String, usize> = HashMap::new();
        let mut intern = |token: &str| -> Option<usize> {
            let token = token.trim().to_lowercase();
            if token.is_empty() {
                return None;
            }
            Some(*ids.entry(token.clone()).or_insert_with(|| {
                patterns.push(token);
                patterns.len() - 1
            }))
        };

        let scalars = scalars
            .iter()
            .map(|rule| {
                let markers = rule.markers.iter().filter_map(|m| intern(m.as_str())).collect();
                let co_markers =
                    rule.co_markers.iter().filter_map(|m| intern(m.as_str())).collect();
                (rule.field, markers, co_markers)
            })
            .collect();
        let attributes = attributes
            .iter()
            .filter_map(|label| intern(label.marker.as_str()).map(|id| (label.clone(), id)))
            .collect();

        let automaton = AhoCorasick::builder()
            .match_kind(MatchKind::Standard)
            .build(&patterns)
            .map_err(|e| Error::Config(format!("invalid label vocabulary: {}", e)))?;

        Ok(Self {
            automaton,
            pattern_count: patterns.len(),
            scalars,
            attributes,
            headers: headers.to_vec(),
        })
    }

    /// Classify a lowercase row signature.
    ///
    /// A row can carry several fields at once (class and race share a row in
    /// the stock layout), so every matching label is returned, scalars first.
    pub fn classify_signature(&self, signature: &str) -> SmallVec<[Label<'_>; 4]> {
        let mut seen = FixedBitSet::with_capacity(self.pattern_count);
        for found in self.automaton.find_overlapping_iter(signature) {
            seen.insert(found.pattern().as_usize());
        }

        let any = |ids: &[usize]| ids.iter().any(|&id| seen.contains(id));
        let mut labels = SmallVec::new();
        for (field, markers, co_markers) in &self.scalars {
            if any(markers) && (co_markers.is_empty() || any(co_markers)) {
                labels.push(Label::Scalar(*field));
            }
        }
        for (label, id) in &self.attributes {
            if seen.contains(*id) {
                labels.push(Label::Attribute(label));
            }
        }
        labels
    }

    /// Classify a row's first cell as a section header.
    pub fn classify_header(&self, first_cell: &str) -> Option<Label<'_>> {
        let first_cell = first_cell.trim();
        self.headers
            .iter()
            .find(|header| header.as_str() == first_cell)
            .map(|header| Label::SectionHeader(header.as_str()))
    }

    /// Check whether a signature contains any vocabulary token.
    pub fn mentions_any(&self, signature: &str) -> bool {
        self.automaton.is_match(signature)
    }
}

/// Build the row signature: the non-empty cells of the first `window`
/// columns, lowercased and joined by single spaces.
pub fn row_signature(row: &[String], window: usize) -> String {
    let mut signature = String::new();
    for cell in row.iter().take(window).filter(|cell| !cell.is_empty()) {
        if !signature.is_empty() {
            signature.push(' ');
        }
        signature.push_str(&cell.to_lowercase());
    }
    signature
}
